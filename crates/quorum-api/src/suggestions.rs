//! Handler for `POST /suggestions`.
//!
//! `options` is optional and partial; any field left out falls back to the
//! server's configured [`SuggestOptions`].

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::NaiveDateTime;
use quorum_core::{Snapshot, SuggestOptions, model::Candidate, suggest_slots};
use serde::{Deserialize, Serialize};

use crate::{Defaults, error::ApiError, validate_input};

/// Per-request overrides for [`SuggestOptions`].
#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
  pub max_suggestions: Option<usize>,
  pub max_probes:      Option<u32>,
  pub step_minutes:    Option<u32>,
  pub business_hours:  Option<(u32, u32)>,
}

impl SuggestParams {
  pub fn apply(self, base: SuggestOptions) -> SuggestOptions {
    SuggestOptions {
      max_suggestions: self.max_suggestions.unwrap_or(base.max_suggestions),
      max_probes:      self.max_probes.unwrap_or(base.max_probes),
      step_minutes:    self.step_minutes.unwrap_or(base.step_minutes),
      business_hours:  self.business_hours.unwrap_or(base.business_hours),
    }
  }
}

/// JSON body accepted by `POST /suggestions`.
#[derive(Debug, Deserialize)]
pub struct SuggestBody {
  pub candidate: Candidate,
  #[serde(flatten)]
  pub snapshot:  Snapshot,
  #[serde(default)]
  pub options:   SuggestParams,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
  /// Start times, earliest first. Empty when nothing free was found.
  pub slots: Vec<NaiveDateTime>,
}

/// `POST /suggestions`
pub async fn handler(
  State(defaults): State<Arc<Defaults>>,
  Json(body): Json<SuggestBody>,
) -> Result<Json<SuggestResponse>, ApiError> {
  let options = body.options.apply(defaults.suggest);
  options.validate()?;
  validate_input(Some(&body.candidate), &body.snapshot.events)?;

  let snap = &body.snapshot;
  let slots = suggest_slots(&body.candidate, &snap.events, snap, snap, &options);
  Ok(Json(SuggestResponse { slots }))
}
