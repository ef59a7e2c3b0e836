//! Error types for `quorum-core`.
//!
//! The engine operations themselves are total. These errors are produced
//! only by the validation helpers that callers run at their boundary.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::model::EventId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{} ends before it starts ({start} > {end})", describe(.id))]
  ReversedInterval {
    id:    Option<EventId>,
    start: NaiveDateTime,
    end:   NaiveDateTime,
  },

  #[error("invalid options: {0}")]
  InvalidOptions(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

fn describe(id: &Option<EventId>) -> String {
  match id {
    Some(id) => format!("event {id}"),
    None => "candidate".to_string(),
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
