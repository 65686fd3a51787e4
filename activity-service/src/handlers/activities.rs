use super::record_reply;
use crate::dtos::ActivitySuggestionQuery;
use crate::services::{prompts, sanitize};
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

/// `GET /get-activities`: ask the model for 3-5 activities.
///
/// A provider failure is returned as a 500 as-is; a reply that is not JSON
/// comes back as `{"error", "raw"}` with a 200.
pub async fn get_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivitySuggestionQuery>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;

    let prompt = prompts::activity_suggestions_prompt(&query.user_prompt, &query.location);

    let response = state
        .text_provider
        .generate(&prompt)
        .await
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    tracing::debug!(
        model = %state.text_provider.model(),
        reply_len = response.text.len(),
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Activity suggestions received"
    );

    let sanitized = sanitize(&response.text);
    record_reply("get_activities", &sanitized);

    Ok(Json(sanitized.into_payload("activities")))
}
