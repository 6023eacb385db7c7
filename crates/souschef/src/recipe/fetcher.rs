//! Tasty recipe service client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::TastyConfig;
use crate::error::{Result, SousChefError};
use crate::recipe::Recipe;

/// Anything that can look up a recipe by its dashed slug
#[async_trait]
pub trait RecipeSource: Send + Sync {
  async fn fetch(&self, slug: &str) -> Result<Recipe>;
}

#[derive(Debug, Deserialize)]
struct RecipeList {
  #[serde(default)]
  results: Vec<Recipe>,
}

pub struct TastyClient {
  client: Client,
  config: TastyConfig,
  api_key: Option<String>,
}

impl TastyClient {
  /// Build a client whose credential is read from the configured environment variable
  pub fn from_env(config: TastyConfig) -> Result<Self> {
    let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
    Self::with_api_key(config, api_key)
  }

  pub fn with_api_key(config: TastyConfig, api_key: Option<String>) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Self { client, config, api_key })
  }

  fn list_url(&self) -> String {
    format!("{}/recipes/list", self.config.base_url.trim_end_matches('/'))
  }
}

#[async_trait]
impl RecipeSource for TastyClient {
  async fn fetch(&self, slug: &str) -> Result<Recipe> {
    let api_key =
      self.api_key.as_deref().ok_or_else(|| SousChefError::missing_api_key(&self.config.api_key_env))?;

    tracing::info!(slug, "fetching recipe");
    let response = self
      .client
      .get(self.list_url())
      .query(&[("from", "0"), ("size", "1"), ("q", slug)])
      .header("X-RapidAPI-Key", api_key)
      .header("X-RapidAPI-Host", &self.config.host)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(SousChefError::recipe_service(status.as_u16(), body));
    }

    let list: RecipeList = response.json().await?;
    list.results.into_iter().next().ok_or_else(|| SousChefError::recipe_not_found(slug))
  }
}
