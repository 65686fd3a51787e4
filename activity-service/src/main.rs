use activity_service::config::ActivityConfig;
use activity_service::startup::Application;
use service_core::config::{process_env, Config as CoreConfig};
use service_core::observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let common = CoreConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let otlp_endpoint = process_env("OTLP_ENDPOINT");
    init_tracing("activity-service", &common.log_level, otlp_endpoint.as_deref());

    // Nothing is built or bound until every required variable is present.
    let config = ActivityConfig::from_lookup(&process_env).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_metrics();

    let app = Application::build(config)
        .await
        .map_err(|e| std::io::Error::other(format!("Startup error: {}", e)))?;

    app.run_until_stopped().await
}
