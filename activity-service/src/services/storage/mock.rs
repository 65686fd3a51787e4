//! In-memory storage for testing.

use super::{ObjectStorage, StorageError, StorageObject};
use async_trait::async_trait;
use std::sync::Mutex;

/// An object recorded by [`MockStorage::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    pub path: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

pub struct MockStorage {
    bucket: String,
    objects: Vec<StorageObject>,
    fail_list: bool,
    fail_upload: bool,
    uploads: Mutex<Vec<UploadedObject>>,
    list_calls: Mutex<usize>,
}

impl MockStorage {
    pub fn new(objects: Vec<StorageObject>) -> Self {
        Self {
            bucket: "activity-images".to_string(),
            objects,
            fail_list: false,
            fail_upload: false,
            uploads: Mutex::new(Vec::new()),
            list_calls: Mutex::new(0),
        }
    }

    /// Storage whose bucket holds the given filenames.
    pub fn with_files(names: &[&str]) -> Self {
        Self::new(names.iter().map(|n| StorageObject::named(n)).collect())
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn uploads(&self) -> Vec<UploadedObject> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.lock().map(|c| *c).unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn list(&self, _prefix: &str) -> Result<Vec<StorageObject>, StorageError> {
        if let Ok(mut calls) = self.list_calls.lock() {
            *calls += 1;
        }

        if self.fail_list {
            return Err(StorageError::NetworkError(
                "mock storage unavailable".to_string(),
            ));
        }
        Ok(self.objects.clone())
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail_upload {
            return Err(StorageError::ApiError {
                status: 409,
                message: "The resource already exists".to_string(),
            });
        }

        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push(UploadedObject {
                path: path.to_string(),
                data,
                content_type: content_type.to_string(),
            });
        }
        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
