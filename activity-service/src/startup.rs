//! Application startup and lifecycle management.

use crate::config::ActivityConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::storage::{ObjectStorage, SupabaseConfig, SupabaseStorage};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Both clients are built once at startup and
/// never mutated.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
    pub storage: Arc<dyn ObjectStorage>,
}

/// Build the HTTP router for `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::prometheus_metrics))
        .route("/get-images", get(handlers::get_images))
        .route("/get-activities", get(handlers::get_activities))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with Gemini and Supabase clients from `config`.
    pub async fn build(config: ActivityConfig) -> Result<Self, AppError> {
        let text_provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.models.text_model.clone(),
            api_base: config.gemini.api_base.clone(),
        })
        .map_err(|e| {
            tracing::error!("Failed to initialize Gemini text provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            model = %config.models.text_model,
            "Initialized Gemini text provider"
        );

        let storage = SupabaseStorage::new(SupabaseConfig {
            url: config.supabase.url.clone(),
            key: config.supabase.key.clone(),
            bucket: config.supabase.bucket.clone(),
        })
        .map_err(|e| {
            tracing::error!("Failed to initialize Supabase storage: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            url = %config.supabase.url,
            bucket = %config.supabase.bucket,
            "Initialized Supabase storage"
        );

        let state = AppState {
            text_provider: Arc::new(text_provider),
            storage: Arc::new(storage),
        };

        Self::build_with_state(&config, state).await
    }

    /// Build the application around already constructed clients.
    pub async fn build_with_state(
        config: &ActivityConfig,
        state: AppState,
    ) -> Result<Self, AppError> {
        let app = router(state);

        let host = config.server.host.as_str();
        let port = config.server.port;

        // port 0 = random port for testing
        let listener = TcpListener::bind((host, port)).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}:{}: {}", host, port, e);
            AppError::from(e)
        })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Listening on {}", local_addr);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port: local_addr.port(),
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
