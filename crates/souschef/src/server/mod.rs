//! Web surface for the planner
//!
//! A single page that takes a recipe link and shows its timeline, a JSON
//! endpoint returning the cleaned table, and a health check.

use chrono::{DateTime, Utc};

use crate::pipeline::Planner;

pub mod handlers;
pub mod page;
pub mod routing;
pub mod startup;
pub mod types;

/// State shared by every request
pub struct AppState {
  pub planner: Planner,
  pub started_at: DateTime<Utc>,
}

impl AppState {
  pub fn new(planner: Planner) -> Self {
    Self { planner, started_at: Utc::now() }
  }
}
