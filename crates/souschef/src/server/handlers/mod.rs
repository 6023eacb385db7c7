//! HTTP endpoint handlers

use axum::http::StatusCode;

use crate::error::SousChefError;

pub mod plan;
pub mod status;

/// HTTP status reported for a failed plan
pub fn status_for(error: &SousChefError) -> StatusCode {
  match error {
    SousChefError::RecipeNotFound { .. } => StatusCode::NOT_FOUND,
    SousChefError::MissingApiKey { .. } | SousChefError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    _ => StatusCode::BAD_GATEWAY,
  }
}

/// Stable key identifying the kind of failure in API responses
pub fn error_key(error: &SousChefError) -> &'static str {
  match error {
    SousChefError::MissingApiKey { .. } => "missing_api_key",
    SousChefError::RecipeNotFound { .. } => "recipe_not_found",
    SousChefError::RecipeService { .. } => "recipe_service_failed",
    SousChefError::ParserService { .. } | SousChefError::MalformedDoc { .. } => "parser_service_failed",
    SousChefError::Config { .. } => "configuration_error",
    SousChefError::Http(_) | SousChefError::Json(_) => "upstream_unavailable",
  }
}
