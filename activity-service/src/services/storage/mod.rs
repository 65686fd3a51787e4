pub mod mock;
pub mod supabase;

pub use supabase::{SupabaseConfig, SupabaseStorage};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Storage API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid storage response: {0}")]
    InvalidResponse(String),
}

/// One row of a bucket listing. Only `name` matters here; the rest is kept
/// for logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl StorageObject {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// List the objects under `prefix`. An empty prefix is the bucket root.
    async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>, StorageError>;

    /// Store `data` at `path` inside the bucket.
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    fn bucket(&self) -> &str;
}

/// Filenames from a listing, in listing order. Entries without a name are
/// skipped.
pub fn filenames_from_listing(objects: &[StorageObject]) -> Vec<String> {
    objects.iter().filter_map(|o| o.name.clone()).collect()
}
