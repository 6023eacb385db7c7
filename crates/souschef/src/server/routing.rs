//! Axum router configuration for all endpoints

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::server::handlers::{plan, status};
use crate::server::AppState;

/// Create the application router over shared planner state
pub fn create_router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/", get(plan::index))
    .route("/api/plan", get(plan::api_plan))
    .route("/status", get(status::status))
    .with_state(state)
}
