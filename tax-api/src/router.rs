//! Router construction for the tax calculator service.

use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::app::AppState;
use crate::handlers;

/// Build the axum router with all routes and middleware.
pub fn build_router(
    state: AppState,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/v1/tax-calculator", get(handlers::calculate_income_tax))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
