//! HTTP surface for the processing pipeline.

pub mod api;
pub mod state;

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{EduError, Result};
use crate::pipeline::Pipeline;

pub use api::create_router;
pub use state::AppState;

/// Build the CORS layer from configured origins; unparsable entries are skipped.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim_end_matches('/')) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Full application: routes plus CORS and request tracing.
#[must_use]
pub fn app(state: Arc<AppState>, config: &Config) -> axum::Router {
    create_router(state)
        .layer(cors_layer(&config.settings.server.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and run until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let pipeline = Pipeline::from_config(&config)?;
    let formats = pipeline.dispatcher().extensions().join(", ");
    let state = Arc::new(AppState::new(pipeline, &config));
    let app = app(state, &config);

    let addr = format!(
        "{}:{}",
        config.settings.server.host, config.settings.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(formats = %formats, "edunarrator listening on http://{addr}");
    if config.credentials.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set, generation requests will return empty results");
    }
    if config.credentials.murf_api_key.is_none() {
        tracing::warn!("MURF_API_KEY is not set, audio will be empty");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EduError::Other(format!("server error: {e}")))?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
