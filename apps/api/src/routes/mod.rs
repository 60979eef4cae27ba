pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::errors::panic_response;
use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/parse-resume", post(handlers::handle_parse_resume))
        .route("/api/v1/evaluate-role", post(handlers::handle_evaluate_role))
        .with_state(state)
}

/// Router plus the middleware stack the server runs with.
pub fn build_app(state: AppState, config: &Config) -> Router {
    build_router(state)
        .layer(DefaultBodyLimit::max(config.max_request_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // browser frontend is served from another origin
}
