//! JSON response envelope and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping every JSON response
#[derive(Debug, Serialize, Deserialize)]
pub struct BaseResponse<T> {
  pub version: String,

  /// Correlates the response with server log lines
  pub transaction_id: Uuid,

  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub errors: Vec<ApiError>,

  #[serde(flatten)]
  pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
  pub key: String,
  pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
  pub status: String,
  pub started_at: DateTime<Utc>,
  pub uptime_secs: i64,
}

impl<T> BaseResponse<T> {
  pub fn success(data: T, transaction_id: Uuid) -> Self {
    Self { version: env!("CARGO_PKG_VERSION").to_string(), transaction_id, errors: Vec::new(), data }
  }

  pub fn error(errors: Vec<ApiError>, transaction_id: Uuid) -> BaseResponse<()> {
    BaseResponse { version: env!("CARGO_PKG_VERSION").to_string(), transaction_id, errors, data: () }
  }
}

impl ApiError {
  pub fn new(key: &str, message: &str) -> Self {
    Self { key: key.to_string(), message: message.to_string() }
  }
}
