//! HTTP server wiring for the Quorum availability engine.
//!
//! Loads a [`ServerConfig`] and mounts the JSON API from [`quorum_api`]
//! under `/api` with request tracing.

use std::{path::Path, sync::Arc};

use axum::{Router, routing::get};
use quorum_api::Defaults;
use quorum_core::{HeatmapOptions, SuggestOptions};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `QUORUM__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  /// Defaults for `/api/suggestions` requests.
  #[serde(default)]
  pub suggest: SuggestOptions,
  /// Defaults for `/api/heatmap` requests.
  #[serde(default)]
  pub heatmap: HeatmapOptions,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 7878 }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path).required(false)),
    )
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> Result<Self, config::ConfigError> {
    let cfg: ServerConfig = builder
      .add_source(config::Environment::with_prefix("QUORUM").separator("__"))
      .build()?
      .try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&self) -> Result<(), config::ConfigError> {
    self
      .suggest
      .validate()
      .and_then(|()| self.heatmap.validate())
      .map_err(|e| config::ConfigError::Message(e.to_string()))
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn defaults(&self) -> Defaults {
    Defaults {
      suggest: self.suggest,
      heatmap: self.heatmap,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `config`.
pub fn router(config: &ServerConfig) -> Router {
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", quorum_api::api_router(Arc::new(config.defaults())))
    .layer(TraceLayer::new_for_http())
}
