//! HTTP request handlers for the Tabrelay API

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppResult;
use crate::middleware::request_id_middleware;
use crate::upstream::UpstreamClient;

pub mod analyze;
pub mod validate;

/// Application state shared across all handlers
///
/// Holds the configuration and the upstream client. Both are Arc'd for cheap
/// cloning across Axum handlers; no per-request mutable state exists.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    upstream: Arc<UpstreamClient>,
}

impl AppState {
    /// Create a new AppState from configuration
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let upstream = Arc::new(UpstreamClient::new(&config)?);
        Ok(Self { config, upstream })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the upstream client
    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }
}

/// Build the relay's router with all routes and layers registered
///
/// Cross-origin access is permitted from any origin, matching the open
/// posture expected by browser-based callers.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/validate_credentials/", post(validate::handler))
        .route("/analyze_document/", post(analyze::handler))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
