//! Activity suggestions and activity-to-image matching backed by Gemini and
//! Supabase Storage, plus the banner generator used to fill the bucket.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
