use super::record_reply;
use crate::dtos::ImageMatchQuery;
use crate::services::{filenames_from_listing, prompts, sanitize};
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

/// `GET /get-images`: pair each activity with a file from the bucket.
///
/// The bucket is listed on every call. The model is told to choose only
/// from that listing, but its choices are not checked against it.
pub async fn get_images(
    State(state): State<AppState>,
    Query(query): Query<ImageMatchQuery>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;

    tracing::info!(activities = %query.activities, "Getting images for activities");

    let objects = state.storage.list("").await.map_err(|e| {
        tracing::error!(bucket = %state.storage.bucket(), error = %e, "Failed to list bucket");
        AppError::InternalError(anyhow::Error::new(e).context("listing image bucket"))
    })?;

    let filenames = filenames_from_listing(&objects);
    tracing::info!(
        bucket = %state.storage.bucket(),
        objects = objects.len(),
        filenames = filenames.len(),
        "Retrieved files from bucket"
    );

    let prompt = prompts::image_match_prompt(&query.activities, &filenames);

    let response = state.text_provider.generate(&prompt).await.map_err(|e| {
        tracing::error!(model = %state.text_provider.model(), error = %e, "Image matching failed");
        AppError::InternalError(anyhow::Error::new(e).context("matching images"))
    })?;

    tracing::debug!(reply_len = response.text.len(), "Image matches received");

    let sanitized = sanitize(&response.text);
    record_reply("get_images", &sanitized);

    Ok(Json(sanitized.into_payload("activity_images")))
}
