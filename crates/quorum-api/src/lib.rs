//! JSON REST API for the Quorum availability engine.
//!
//! Exposes an axum [`Router`] over the engine in [`quorum_core`]. The API is
//! stateless: every request carries the snapshot (events, teams, users) it
//! should be evaluated against. Only the default tuning options live in the
//! router state.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", quorum_api::api_router(Arc::new(Defaults::default())))
//! ```

pub mod conflicts;
pub mod error;
pub mod heatmap;
pub mod suggestions;

use std::sync::Arc;

use axum::{Router, routing::post};
use quorum_core::{
  HeatmapOptions, SuggestOptions,
  model::{Candidate, Event},
};

pub use error::ApiError;

/// Options applied when a request leaves a field out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaults {
  pub suggest: SuggestOptions,
  pub heatmap: HeatmapOptions,
}

/// Build the API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(defaults: Arc<Defaults>) -> Router<()> {
  Router::new()
    .route("/conflicts", post(conflicts::check))
    .route("/conflicts/recompute", post(conflicts::recompute))
    .route("/suggestions", post(suggestions::handler))
    .route("/heatmap", post(heatmap::handler))
    .with_state(defaults)
}

/// Reject reversed intervals in the candidate or the corpus before the
/// engine sees them, reporting every offender at once.
pub(crate) fn validate_input(
  candidate: Option<&Candidate>,
  events: &[Event],
) -> Result<(), ApiError> {
  let mut errors: Vec<quorum_core::Error> =
    candidate.and_then(|c| c.validate().err()).into_iter().collect();
  if let Err(corpus) = quorum_core::model::validate_events(events) {
    errors.extend(corpus);
  }
  if errors.is_empty() { Ok(()) } else { Err(errors.into()) }
}

// ─── Integration tests ────────────────────────────────────────────────────────
