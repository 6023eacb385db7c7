use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use souschef::cli::commands;
use souschef::config::Config;

#[derive(Parser)]
#[command(name = "souschef")]
#[command(about = "SousChef - turn a Tasty recipe into a cooking timeline")]
#[command(version)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the planner page and JSON API
  Serve {
    /// Server bind address (defaults to the configured address)
    #[arg(long, env = "SOUSCHEF_BIND")]
    bind: Option<SocketAddr>,
  },
  /// Plan a single recipe and print its timeline
  Plan {
    /// Recipe link, e.g. https://tasty.co/recipe/classic-chicken-noodle-soup
    url: String,
    /// Also write the chart to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if cli.verbose {
      EnvFilter::new("souschef=debug,tower_http=debug,info")
    } else {
      EnvFilter::new("souschef=info,warn")
    }
  });
  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

  let config = Config::load()?;
  config.validate()?;

  match cli.command {
    Command::Serve { bind } => commands::serve(&config, bind.unwrap_or(config.server.bind)).await,
    Command::Plan { url, svg } => commands::plan(&config, &url, svg.as_deref()).await,
  }
}
