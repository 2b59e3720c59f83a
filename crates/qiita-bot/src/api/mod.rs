//! HTTP surface: health check and the LINE webhook endpoint.

mod handlers;

pub use handlers::{ERROR_TEXT, FALLBACK_TEXT};

use crate::router::TextRouter;
use axum::routing::{get, post};
use axum::Router;
use line_client::LineClient;
use secrecy::SecretString;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Composed application context, built once at startup and injected
/// into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Command route table, immutable after registration
    pub router: Arc<TextRouter>,
    /// Reply-message client
    pub line: Arc<LineClient>,
    /// Channel secret for webhook signature verification
    pub channel_secret: SecretString,
}

impl AppState {
    pub fn new(
        router: TextRouter,
        line: LineClient,
        channel_secret: impl Into<String>,
    ) -> Self {
        Self {
            router: Arc::new(router),
            line: Arc::new(line),
            channel_secret: SecretString::new(channel_secret.into()),
        }
    }
}

/// Create the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/callback", post(handlers::callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
