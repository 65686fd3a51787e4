//! service-core: Shared infrastructure for the activity service binaries.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

