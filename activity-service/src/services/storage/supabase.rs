//! Supabase Storage client over its REST API.

use super::{ObjectStorage, StorageError, StorageObject};
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde_json::json;

/// Page size the Supabase client libraries use for listings.
const LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: Secret<String>,
    pub bucket: String,
}

pub struct SupabaseStorage {
    client: Client,
    base_url: Url,
    key: Secret<String>,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig) -> Result<Self, StorageError> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(config.url));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            key: config.key,
            bucket: config.bucket,
        })
    }

    /// `{base}/storage/v1/object/{segments...}` with each segment escaped.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["storage", "v1", "object"])
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.key.expose_secret();
        request
            .header("apikey", key)
            .header(header::AUTHORIZATION, format!("Bearer {}", key))
    }

    async fn error_from(response: reqwest::Response) -> StorageError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        StorageError::ApiError { status, message }
    }
}

fn record(operation: &'static str, ok: bool) {
    metrics::counter!(
        "storage_operations_total",
        "operation" => operation,
        "outcome" => if ok { "ok" } else { "error" }
    )
    .increment(1);
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>, StorageError> {
        let url = self.endpoint(["list", self.bucket.as_str()])?;
        let body = json!({
            "prefix": prefix,
            "limit": LIST_LIMIT,
            "offset": 0,
            "sortBy": { "column": "name", "order": "asc" },
        });

        let result: Result<Vec<StorageObject>, StorageError> = async {
            let response = self
                .authorized(self.client.post(url))
                .json(&body)
                .send()
                .await
                .map_err(|e| StorageError::NetworkError(e.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::error_from(response).await);
            }

            response
                .json::<Vec<StorageObject>>()
                .await
                .map_err(|e| StorageError::InvalidResponse(e.to_string()))
        }
        .await;

        record("list", result.is_ok());
        result
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let segments = std::iter::once(self.bucket.as_str()).chain(path.split('/'));
        let url = self.endpoint(segments)?;

        let result: Result<(), StorageError> = async {
            let response = self
                .authorized(self.client.post(url))
                .header(header::CONTENT_TYPE, content_type)
                .header("x-upsert", "false")
                .body(data)
                .send()
                .await
                .map_err(|e| StorageError::NetworkError(e.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::error_from(response).await);
            }
            Ok(())
        }
        .await;

        record("upload", result.is_ok());
        result
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
