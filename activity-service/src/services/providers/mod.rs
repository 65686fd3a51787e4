//! AI provider abstractions and implementations.
//!
//! Handlers and the image generator only see these traits, so the Gemini
//! backends can be swapped for the mocks in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Text reply from a model.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
}

/// One part of an image-model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedPart {
    Text(String),
    Image { mime_type: String, data: Vec<u8> },
}

/// Text generation (suggestions, image matching).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `prompt` once and return the model's text.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    fn model(&self) -> &str;
}

/// Image generation (banner illustrations).
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Send `prompt` once and return every part of the reply in order.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<GeneratedPart>, ProviderError>;

    fn model(&self) -> &str;
}
