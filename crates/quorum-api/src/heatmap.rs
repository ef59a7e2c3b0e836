//! Handler for `POST /heatmap`.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::NaiveDate;
use quorum_core::{
  HeatmapOptions, compute_heatmap,
  model::{Attendee, Event, HeatmapSlot},
};
use serde::Deserialize;

use crate::{Defaults, error::ApiError, validate_input};

/// Per-request overrides for [`HeatmapOptions`].
#[derive(Debug, Default, Deserialize)]
pub struct HeatmapParams {
  pub slot_count:   Option<usize>,
  pub slot_minutes: Option<u32>,
  pub start_hour:   Option<u32>,
}

impl HeatmapParams {
  pub fn apply(self, base: HeatmapOptions) -> HeatmapOptions {
    HeatmapOptions {
      slot_count:   self.slot_count.unwrap_or(base.slot_count),
      slot_minutes: self.slot_minutes.unwrap_or(base.slot_minutes),
      start_hour:   self.start_hour.unwrap_or(base.start_hour),
    }
  }
}

/// JSON body accepted by `POST /heatmap`. Attendees are already expanded.
#[derive(Debug, Deserialize)]
pub struct HeatmapBody {
  pub day:       NaiveDate,
  #[serde(default)]
  pub attendees: Vec<Attendee>,
  #[serde(default)]
  pub events:    Vec<Event>,
  #[serde(default)]
  pub options:   HeatmapParams,
}

/// `POST /heatmap`
pub async fn handler(
  State(defaults): State<Arc<Defaults>>,
  Json(body): Json<HeatmapBody>,
) -> Result<Json<Vec<HeatmapSlot>>, ApiError> {
  let options = body.options.apply(defaults.heatmap);
  options.validate()?;
  validate_input(None, &body.events)?;

  Ok(Json(compute_heatmap(
    body.day,
    &body.attendees,
    &body.events,
    &options,
  )))
}
