//! Handlers for `/conflicts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/conflicts` | Body: [`CheckBody`]; returns per-attendee conflicts |
//! | `POST` | `/conflicts/recompute` | Body: a [`Snapshot`]; returns the annotated corpus |

use axum::Json;
use quorum_core::{
  Snapshot, detect_conflicts,
  model::{AnnotatedEvent, Candidate, Conflict},
  recompute_all_conflicts,
};
use serde::Deserialize;

use crate::{error::ApiError, validate_input};

// ─── Check one candidate ─────────────────────────────────────────────────────

/// JSON body accepted by `POST /conflicts`.
#[derive(Debug, Deserialize)]
pub struct CheckBody {
  pub candidate: Candidate,
  #[serde(flatten)]
  pub snapshot:  Snapshot,
}

/// `POST /conflicts`
pub async fn check(
  Json(body): Json<CheckBody>,
) -> Result<Json<Vec<Conflict>>, ApiError> {
  validate_input(Some(&body.candidate), &body.snapshot.events)?;
  let snap = &body.snapshot;
  Ok(Json(detect_conflicts(&body.candidate, &snap.events, snap, snap)))
}

// ─── Recompute the corpus ────────────────────────────────────────────────────

/// `POST /conflicts/recompute` — body: `{"events":[...],"teams":[...],"users":[...]}`
pub async fn recompute(
  Json(snap): Json<Snapshot>,
) -> Result<Json<Vec<AnnotatedEvent>>, ApiError> {
  validate_input(None, &snap.events)?;
  Ok(Json(recompute_all_conflicts(&snap.events, &snap, &snap)))
}
