pub mod generator;
pub mod prompts;
pub mod providers;
pub mod sanitizer;
pub mod storage;

pub use generator::{safe_filename, GenerationReport, ImageGenerator, UploadOutcome};
pub use providers::{ImageProvider, ProviderError, TextProvider};
pub use sanitizer::{sanitize, SanitizedResponse};
pub use storage::{filenames_from_listing, ObjectStorage, StorageError, StorageObject};
