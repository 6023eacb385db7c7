use anyhow::{Context, Result};
use colored::*;
use std::net::SocketAddr;
use std::path::Path;

use crate::cli::display::display_plan;
use crate::config::Config;
use crate::pipeline::Planner;
use crate::recipe::{RecipeUrl, URL_PROMPT};
use crate::server::startup::start_server;

/// Plan one recipe and print its timeline, optionally saving the chart
pub async fn plan(config: &Config, input: &str, svg_path: Option<&Path>) -> Result<()> {
  let Some(url) = RecipeUrl::parse(input) else {
    println!("{URL_PROMPT}");
    return Ok(());
  };

  let planner = Planner::from_config(config)?;
  let plan = planner.plan(&url).await?;
  display_plan(&plan);

  if let Some(path) = svg_path {
    std::fs::write(path, &plan.svg).with_context(|| format!("Failed to write chart to {}", path.display()))?;
    println!("{} Wrote chart to {}", "✓".green(), path.display().to_string().cyan());
  }

  Ok(())
}

/// Run the web surface
pub async fn serve(config: &Config, bind: SocketAddr) -> Result<()> {
  let planner = Planner::from_config(config)?;
  start_server(bind, planner).await
}
