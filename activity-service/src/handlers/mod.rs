//! HTTP handlers for the activity service.

pub mod activities;
pub mod health;
pub mod images;

pub use activities::get_activities;
pub use health::{health_check, prometheus_metrics, root};
pub use images::get_images;

use crate::services::SanitizedResponse;

/// Count valid and invalid model replies per endpoint.
fn record_reply(endpoint: &'static str, reply: &SanitizedResponse) {
    let result = if reply.is_valid() { "valid" } else { "invalid" };
    metrics::counter!("model_replies_total", "endpoint" => endpoint, "result" => result)
        .increment(1);
}
