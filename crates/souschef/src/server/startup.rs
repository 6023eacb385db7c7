//! Server startup

use anyhow::{Context, Result};
use axum::serve;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::pipeline::Planner;
use crate::server::routing::create_router;
use crate::server::AppState;

/// Serve the planner until the process is stopped
pub async fn start_server(addr: SocketAddr, planner: Planner) -> Result<()> {
  let state = Arc::new(AppState::new(planner));
  let app = create_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

  let listener = TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {addr}"))?;
  tracing::info!("SousChef listening on http://{addr}");

  serve(listener, app).await.context("Server error")?;
  tracing::info!("Server shutdown gracefully");
  Ok(())
}
