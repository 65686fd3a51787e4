//! Banner image generation for the offline `generate-image` tool.
//!
//! Each activity gets one image-model call. Every image part is written to
//! the output directory and then uploaded to the bucket. A failed upload is
//! logged and recorded but does not stop the remaining parts.

use crate::services::prompts::banner_image_prompt;
use crate::services::providers::{GeneratedPart, ImageProvider, ProviderError};
use crate::services::storage::ObjectStorage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

const DEFAULT_CONTENT_TYPE: &str = "image/png";

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Image generation failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to save {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SavedImage {
    pub local_path: PathBuf,
    /// Path inside the bucket.
    pub object_path: String,
    pub upload: UploadOutcome,
}

/// What one `generate` call produced, in reply order.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub activity: String,
    pub texts: Vec<String>,
    pub images: Vec<SavedImage>,
}

/// Replace spaces and path separators with underscores.
pub fn safe_filename(activity: &str) -> String {
    activity
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

pub struct ImageGenerator {
    provider: Arc<dyn ImageProvider>,
    storage: Arc<dyn ObjectStorage>,
    output_dir: PathBuf,
}

impl ImageGenerator {
    pub fn new(
        provider: Arc<dyn ImageProvider>,
        storage: Arc<dyn ObjectStorage>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            storage,
            output_dir: output_dir.into(),
        }
    }

    pub async fn generate(&self, activity: &str) -> Result<GenerationReport, GeneratorError> {
        tracing::info!(
            activity = %activity,
            model = %self.provider.model(),
            "Generating banner image"
        );

        let prompt = banner_image_prompt(activity);
        let parts = self.provider.generate_image(&prompt).await?;
        let safe_name = safe_filename(activity);

        let mut report = GenerationReport {
            activity: activity.to_string(),
            ..Default::default()
        };

        for part in parts {
            match part {
                GeneratedPart::Text(text) => {
                    tracing::info!(activity = %activity, text = %text, "Model returned text");
                    report.texts.push(text);
                }
                GeneratedPart::Image { mime_type, data } => {
                    let image = self.store(&safe_name, &mime_type, data).await?;
                    report.images.push(image);
                }
            }
        }

        Ok(report)
    }

    async fn store(
        &self,
        safe_name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<SavedImage, GeneratorError> {
        let object_path = format!("{}.{}", safe_name, extension_for(mime_type));
        let local_path = self.output_dir.join(&object_path);

        self.save_locally(&local_path, &data).await?;
        tracing::info!(path = %local_path.display(), bytes = data.len(), "Saved image locally");

        let content_type = if mime_type.is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            mime_type
        };

        let upload = match self.storage.upload(&object_path, data, content_type).await {
            Ok(()) => {
                tracing::info!(
                    bucket = %self.storage.bucket(),
                    path = %object_path,
                    "Uploaded image"
                );
                UploadOutcome::Uploaded
            }
            Err(e) => {
                tracing::warn!(path = %object_path, error = %e, "Upload failed");
                UploadOutcome::Failed(e.to_string())
            }
        };

        Ok(SavedImage {
            local_path,
            object_path,
            upload,
        })
    }

    async fn save_locally(&self, path: &Path, data: &[u8]) -> Result<(), GeneratorError> {
        let io_err = |source| GeneratorError::Io {
            path: path.to_path_buf(),
            source,
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(io_err)?;

        let mut file = tokio::fs::File::create(path).await.map_err(io_err)?;
        file.write_all(data).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }
}
