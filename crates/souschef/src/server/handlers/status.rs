//! Health check

use axum::{extract::State, response::Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::server::types::{BaseResponse, StatusResponse};
use crate::server::AppState;

/// GET /status - Health check endpoint
pub async fn status(State(state): State<Arc<AppState>>) -> Json<BaseResponse<StatusResponse>> {
  let response = StatusResponse {
    status: "healthy".to_string(),
    started_at: state.started_at,
    uptime_secs: (Utc::now() - state.started_at).num_seconds(),
  };

  Json(BaseResponse::success(response, Uuid::new_v4()))
}
