use serde::Deserialize;
use validator::Validate;

/// Query for `GET /get-activities`.
#[derive(Debug, Deserialize, Validate)]
pub struct ActivitySuggestionQuery {
    #[validate(length(min = 1, message = "user_prompt must not be empty"))]
    pub user_prompt: String,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
}

/// Query for `GET /get-images`. `activities` is free text, usually a comma
/// separated list.
#[derive(Debug, Deserialize, Validate)]
pub struct ImageMatchQuery {
    #[validate(length(min = 1, message = "activities must not be empty"))]
    pub activities: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fail_validation() {
        let query = ActivitySuggestionQuery {
            user_prompt: String::new(),
            location: "Chicago".to_string(),
        };
        let errors = query.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_prompt"));
        assert!(!errors.field_errors().contains_key("location"));
    }

    #[test]
    fn any_non_empty_text_is_accepted() {
        let query = ImageMatchQuery {
            activities: "Kayaking, Zoo Visit; <script>".to_string(),
        };
        assert!(query.validate().is_ok());
    }
}
