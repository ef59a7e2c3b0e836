//! quorum-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), overlays
//! `QUORUM__*` environment variables, and serves the availability API over
//! HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use quorum_server::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Quorum availability engine server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured port.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut config = ServerConfig::load(&cli.config).with_context(|| {
    format!("failed to load configuration from {}", cli.config.display())
  })?;
  if let Some(port) = cli.port {
    config.port = port;
  }

  tracing::debug!(?config, "configuration loaded");

  let app = quorum_server::router(&config);
  let address = config.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
