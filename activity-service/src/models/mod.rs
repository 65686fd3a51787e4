//! Shapes the model is asked to produce. Replies are never parsed into
//! these; they exist to render the prompt examples.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySuggestion {
    pub activity: String,
    pub location: String,
}

impl ActivitySuggestion {
    pub fn new(activity: &str, location: &str) -> Self {
        Self {
            activity: activity.to_string(),
            location: location.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMatch {
    pub activity: String,
    /// Bare filename inside the bucket, no path.
    pub image: String,
}

impl ImageMatch {
    pub fn new(activity: &str, image: &str) -> Self {
        Self {
            activity: activity.to_string(),
            image: image.to_string(),
        }
    }
}
