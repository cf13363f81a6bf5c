//! codesnip-server
//!
//! HTTP surface for the snippet collection: routing, handlers, error
//! mapping, and the serve/shutdown lifecycle.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware as axum_mw;
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

use state::AppState;

/// Build the application router. Snippet routes live under
/// `/code-snippets`; `/health` sits outside it.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health (outside the snippet prefix)
        .route("/health", get(routes::health::health_check))
        .route(
            "/code-snippets",
            get(routes::snippets::list_snippets).post(routes::snippets::create_snippet),
        )
        .route(
            "/code-snippets/",
            get(routes::snippets::list_snippets).post(routes::snippets::create_snippet),
        )
        // One path parameter serves as name (GET) or id (PUT, DELETE).
        .route(
            "/code-snippets/{key}",
            get(routes::snippets::get_snippet)
                .put(routes::snippets::update_snippet)
                .delete(routes::snippets::delete_snippet),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(axum_mw::from_fn(middleware::request_log::log_request))
        .with_state(state)
}
