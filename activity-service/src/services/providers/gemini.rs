//! Gemini AI provider implementation.
//!
//! Text and image generation both go through a single non-streaming
//! `generateContent` call. There is no retry.

use super::{GeneratedPart, ImageProvider, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Upper bound on a single model call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
}

/// HTTP plumbing shared by the text and image providers.
struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_content(
        &self,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let started = Instant::now();
        let result = self.send(&request).await;
        let elapsed = started.elapsed().as_secs_f64();

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::counter!(
            "genai_provider_requests_total",
            "model" => self.config.model.clone(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!(
            "genai_provider_latency_seconds",
            "model" => self.config.model.clone()
        )
        .record(elapsed);

        result
    }

    async fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        if api_response.candidates.is_empty() {
            if let Some(reason) = api_response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                tracing::warn!(block_reason = %reason, "Gemini blocked the prompt");
                return Err(ProviderError::ContentFiltered);
            }
        }

        Ok(api_response)
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    inner: GeminiClient,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            inner: GeminiClient::new(config)?,
        })
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let api_response = self.inner.generate_content(prompt).await?;

        let candidate = api_response.candidates.first();

        if candidate.is_some_and(Candidate::was_filtered) {
            return Err(ProviderError::ContentFiltered);
        }

        // Concatenate every text part of the first candidate.
        let text: String = candidate
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought.unwrap_or(false))
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        let usage = api_response.usage_metadata.unwrap_or_default();

        Ok(ProviderResponse {
            text,
            input_tokens: usage.prompt_token_count.unwrap_or(0),
            output_tokens: usage.candidates_token_count.unwrap_or(0),
        })
    }

    fn model(&self) -> &str {
        &self.inner.config.model
    }
}

/// Gemini image provider.
pub struct GeminiImageProvider {
    inner: GeminiClient,
}

impl GeminiImageProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            inner: GeminiClient::new(config)?,
        })
    }
}

#[async_trait]
impl ImageProvider for GeminiImageProvider {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<GeneratedPart>, ProviderError> {
        let api_response = self.inner.generate_content(prompt).await?;

        let Some(candidate) = api_response.candidates.into_iter().next() else {
            return Ok(Vec::new());
        };

        if candidate.was_filtered() {
            return Err(ProviderError::ContentFiltered);
        }

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        let mut generated = Vec::with_capacity(parts.len());

        for part in parts {
            if let Some(inline) = part.inline_data {
                let data = BASE64.decode(inline.data.as_bytes()).map_err(|e| {
                    ProviderError::ApiError(format!("Invalid inline image data: {}", e))
                })?;
                generated.push(GeneratedPart::Image {
                    mime_type: inline.mime_type,
                    data,
                });
            } else if let Some(text) = part.text {
                generated.push(GeneratedPart::Text(text));
            }
        }

        Ok(generated)
    }

    fn model(&self) -> &str {
        &self.inner.config.model
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl Candidate {
    /// Generation stopped on a safety rule.
    fn was_filtered(&self) -> bool {
        matches!(
            self.finish_reason.as_deref(),
            Some("SAFETY" | "PROHIBITED_CONTENT" | "IMAGE_SAFETY")
        )
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
