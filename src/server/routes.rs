//! Router setup.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::server::handlers;
use crate::server::state::AppState;

/// `/` serves the chat page, or answers as the query API when a query string is
/// present. `/api` is always the query API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root).post(handlers::root))
        .route("/api", get(handlers::api).post(handlers::api))
        .route("/chat", post(handlers::ui_chat))
        .route("/knowledge", post(handlers::ui_add_knowledge))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
