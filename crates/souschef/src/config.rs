//! Configuration management for SousChef
//!
//! Settings come from a JSON file (every field optional) and fall back to
//! defaults that talk to the public Tasty endpoint and a local parser service.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::cache::CachePolicy;
use crate::error::{Result, SousChefError};

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV: &str = "SOUSCHEF_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub tasty: TastyConfig,
  #[serde(default)]
  pub parser: ParserConfig,
  #[serde(default)]
  pub cache: CachePolicy,
  #[serde(default)]
  pub server: ServerConfig,
}

/// Recipe service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TastyConfig {
  #[serde(default = "default_tasty_base_url")]
  pub base_url: String,
  /// Value sent in the `X-RapidAPI-Host` header
  #[serde(default = "default_tasty_host")]
  pub host: String,
  /// Name of the environment variable holding the API key
  #[serde(default = "default_api_key_env")]
  pub api_key_env: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

/// Dependency parser service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
  #[serde(default = "default_parser_url")]
  pub url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_bind")]
  pub bind: SocketAddr,
}

fn default_tasty_base_url() -> String {
  "https://tasty.p.rapidapi.com".to_string()
}
fn default_tasty_host() -> String {
  "tasty.p.rapidapi.com".to_string()
}
fn default_api_key_env() -> String {
  "TASTY_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
  30
}
fn default_parser_url() -> String {
  "http://127.0.0.1:8080/parse".to_string()
}
fn default_bind() -> SocketAddr {
  SocketAddr::from(([127, 0, 0, 1], 8501))
}

impl Default for TastyConfig {
  fn default() -> Self {
    Self {
      base_url: default_tasty_base_url(),
      host: default_tasty_host(),
      api_key_env: default_api_key_env(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl Default for ParserConfig {
  fn default() -> Self {
    Self { url: default_parser_url(), timeout_secs: default_timeout_secs() }
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { bind: default_bind() }
  }
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|e| SousChefError::config(format!("cannot read {}: {e}", path.display())))?;
    let config: Config = serde_json::from_str(&content)
      .map_err(|e| SousChefError::config(format!("cannot parse {}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
  }

  /// Load from `$SOUSCHEF_CONFIG`, the working directory, the home directory, or defaults
  pub fn load() -> Result<Self> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
      return Self::load_from_file(explicit);
    }

    for path in candidate_paths() {
      if path.exists() {
        tracing::debug!(path = %path.display(), "loading config");
        return Self::load_from_file(path);
      }
    }

    Ok(Config::default())
  }

  pub fn validate(&self) -> Result<()> {
    if self.tasty.api_key_env.trim().is_empty() {
      return Err(SousChefError::config("tasty.api_key_env must name an environment variable"));
    }
    if self.cache.max_entries == 0 {
      return Err(SousChefError::config("cache.max_entries must be at least 1"));
    }
    Ok(())
  }
}

fn candidate_paths() -> Vec<PathBuf> {
  let mut paths = vec![PathBuf::from("souschef.json"), PathBuf::from(".souschef.json")];
  if let Some(home) = dirs::home_dir() {
    paths.push(home.join(".souschef").join("config.json"));
  }
  paths
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn test_partial_file_keeps_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("souschef.json");
    fs::write(&path, r#"{"parser": {"url": "http://parser:9000/parse"}, "cache": {"max_entries": 8}}"#)
      .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.parser.url, "http://parser:9000/parse");
    assert_eq!(config.parser.timeout_secs, 30);
    assert_eq!(config.cache.max_entries, 8);
    assert_eq!(config.cache.ttl_secs, None);
    assert_eq!(config.tasty, TastyConfig::default());
  }

  #[test]
  fn test_invalid_cache_size_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("souschef.json");
    fs::write(&path, r#"{"cache": {"max_entries": 0}}"#).unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("max_entries"));
  }

  #[test]
  fn test_unreadable_file_reports_path() {
    let err = Config::load_from_file("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
  }

  #[test]
  #[serial]
  fn test_load_prefers_explicit_env_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.json");
    fs::write(&path, r#"{"server": {"bind": "0.0.0.0:9999"}}"#).unwrap();

    std::env::set_var(CONFIG_ENV, &path);
    let config = Config::load();
    std::env::remove_var(CONFIG_ENV);

    assert_eq!(config.unwrap().server.bind, "0.0.0.0:9999".parse().unwrap());
  }
}
