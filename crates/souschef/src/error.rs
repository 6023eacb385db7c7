//! Error types shared across the recipe pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SousChefError {
  #[error("Missing API credential: set {var}")]
  MissingApiKey { var: String },

  #[error("No recipe found for '{slug}'")]
  RecipeNotFound { slug: String },

  #[error("Recipe service returned HTTP {status}: {message}")]
  RecipeService { status: u16, message: String },

  #[error("Parser service returned HTTP {status}: {message}")]
  ParserService { status: u16, message: String },

  #[error("Parser returned a malformed document: {message}")]
  MalformedDoc { message: String },

  #[error("Invalid configuration: {message}")]
  Config { message: String },

  #[error(transparent)]
  Http(#[from] reqwest::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl SousChefError {
  pub fn missing_api_key(var: impl Into<String>) -> Self {
    Self::MissingApiKey { var: var.into() }
  }

  pub fn recipe_not_found(slug: impl Into<String>) -> Self {
    Self::RecipeNotFound { slug: slug.into() }
  }

  pub fn recipe_service(status: u16, message: impl Into<String>) -> Self {
    Self::RecipeService { status, message: message.into() }
  }

  pub fn parser_service(status: u16, message: impl Into<String>) -> Self {
    Self::ParserService { status, message: message.into() }
  }

  pub fn malformed_doc(message: impl Into<String>) -> Self {
    Self::MalformedDoc { message: message.into() }
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config { message: message.into() }
  }
}

pub type Result<T> = std::result::Result<T, SousChefError>;
