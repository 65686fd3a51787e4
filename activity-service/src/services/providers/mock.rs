//! Mock provider implementations for testing.

use super::{GeneratedPart, ImageProvider, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock text provider that answers every prompt with a fixed reply.
pub struct MockTextProvider {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Provider that always returns `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            Some(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
            }),
            None => Err(ProviderError::NetworkError(
                "mock text provider unavailable".to_string(),
            )),
        }
    }

    fn model(&self) -> &str {
        "mock-text"
    }
}

/// Mock image provider that returns fixed parts.
pub struct MockImageProvider {
    parts: Option<Vec<GeneratedPart>>,
    prompts: Mutex<Vec<String>>,
}

impl MockImageProvider {
    pub fn with_parts(parts: Vec<GeneratedPart>) -> Self {
        Self {
            parts: Some(parts),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            parts: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<GeneratedPart>, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        self.parts.clone().ok_or_else(|| {
            ProviderError::ApiError("mock image provider unavailable".to_string())
        })
    }

    fn model(&self) -> &str {
        "mock-image"
    }
}
