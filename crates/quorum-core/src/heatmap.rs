//! Per-slot busy counts across one day for a group of attendees.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  Error, Result,
  conflict::conflicts_for,
  interval::Interval,
  model::{Attendee, Event, HeatmapSlot},
};

/// Longest span a heat-map grid may cover.
pub const MAX_GRID_MINUTES: usize = 24 * 60;

/// Shape of the grid produced by [`compute_heatmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
  pub slot_count:   usize,
  pub slot_minutes: u32,
  /// Hour of day the first slot starts at.
  pub start_hour:   u32,
}

impl Default for HeatmapOptions {
  fn default() -> Self {
    Self {
      slot_count:   18,
      slot_minutes: 30,
      start_hour:   9,
    }
  }
}

impl HeatmapOptions {
  pub fn validate(&self) -> Result<()> {
    if self.slot_minutes == 0 {
      return Err(Error::InvalidOptions(
        "slot_minutes must be positive".to_string(),
      ));
    }
    let span = usize::try_from(self.slot_minutes)
      .ok()
      .and_then(|minutes| minutes.checked_mul(self.slot_count));
    if !span.is_some_and(|span| span <= MAX_GRID_MINUTES) {
      return Err(Error::InvalidOptions(format!(
        "slot_count * slot_minutes must be at most {MAX_GRID_MINUTES}, got {} \
         slots of {} minutes",
        self.slot_count, self.slot_minutes
      )));
    }
    if self.start_hour > 23 {
      return Err(Error::InvalidOptions(format!(
        "start_hour must be at most 23, got {}",
        self.start_hour
      )));
    }
    Ok(())
  }
}

/// Count, for each of `slot_count` consecutive slots starting at
/// `start_hour:00` on `day`, how many of `attendees` are busy.
///
/// Attendees are taken as given (no team expansion); an attendee listed
/// twice is counted once. Slots come back in chronological order and the
/// grid always has `slot_count` entries, all zero when `attendees` is empty.
pub fn compute_heatmap(
  day: NaiveDate,
  attendees: &[Attendee],
  existing: &[Event],
  options: &HeatmapOptions,
) -> Vec<HeatmapSlot> {
  let mut seen = HashSet::new();
  let attendees: Vec<Attendee> = attendees
    .iter()
    .filter(|a| seen.insert(&a.id))
    .cloned()
    .collect();

  let first = day
    .and_time(NaiveTime::MIN)
    .checked_add_signed(Duration::hours(i64::from(options.start_hour)));
  let length = Duration::minutes(i64::from(options.slot_minutes));

  // Only calendar overflow near the end of representable time can cut the
  // grid short.
  let slots: Vec<HeatmapSlot> = (0..options.slot_count)
    .map_while(|i| slot_interval(first?, length, i))
    .map(|slot| HeatmapSlot {
      time:       slot.start,
      busy_count: conflicts_for(&attendees, slot, None, existing).len(),
    })
    .collect();

  debug!(
    %day,
    attendees = attendees.len(),
    slots = slots.len(),
    busiest = slots.iter().map(|s| s.busy_count).max().unwrap_or(0),
    "computed availability heatmap"
  );
  slots
}

fn slot_interval(
  first: NaiveDateTime,
  length: Duration,
  i: usize,
) -> Option<Interval<NaiveDateTime>> {
  let offset = length.checked_mul(i32::try_from(i).ok()?)?;
  let start = first.checked_add_signed(offset)?;
  Some(Interval::new(start, start.checked_add_signed(length)?))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{EventId, UserId};

  fn day() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 3, 10).unwrap() }

  fn at(h: u32, m: u32) -> NaiveDateTime { day().and_hms_opt(h, m, 0).unwrap() }

  fn event(
    id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    attendees: &[&str],
  ) -> Event {
    Event {
      id: EventId::new(id),
      title: id.to_string(),
      start,
      end,
      attendees: attendees.iter().map(|a| UserId::new(*a)).collect(),
      creator: UserId::new("a"),
    }
  }

  fn people(ids: &[&str]) -> Vec<Attendee> {
    ids.iter().map(|id| Attendee::new(*id, id.to_uppercase())).collect()
  }

  fn heatmap(attendees: &[Attendee], existing: &[Event]) -> Vec<HeatmapSlot> {
    compute_heatmap(day(), attendees, existing, &HeatmapOptions::default())
  }

  #[test]
  fn empty_attendee_list_gives_all_zero_grid() {
    let existing = vec![event("e1", at(9, 0), at(18, 0), &["a"])];
    let slots = heatmap(&[], &existing);
    assert_eq!(slots.len(), 18);
    assert!(slots.iter().all(|s| s.busy_count == 0));
  }

  #[test]
  fn default_grid_spans_nine_to_six() {
    let slots = heatmap(&people(&["a"]), &[]);
    assert_eq!(slots.len(), 18);
    assert_eq!(slots[0].time, at(9, 0));
    assert_eq!(slots[1].time, at(9, 30));
    assert_eq!(slots[17].time, at(17, 30));
  }

  #[test]
  fn counts_distinct_busy_attendees_per_slot() {
    let existing = vec![
      event("e1", at(10, 0), at(11, 0), &["a", "b"]),
      event("e2", at(10, 15), at(10, 45), &["a"]),
      event("e3", at(10, 30), at(12, 0), &["c"]),
    ];
    let slots = heatmap(&people(&["a", "b", "c"]), &existing);
    let count_at = |h, m| {
      slots.iter().find(|s| s.time == at(h, m)).unwrap().busy_count
    };

    assert_eq!(count_at(9, 30), 0);
    assert_eq!(count_at(10, 0), 2);
    assert_eq!(count_at(10, 30), 3);
    assert_eq!(count_at(11, 0), 1);
    assert_eq!(count_at(12, 0), 0);
  }

  #[test]
  fn event_ending_at_slot_start_does_not_count() {
    let existing = vec![event("e1", at(8, 0), at(9, 0), &["a"])];
    let slots = heatmap(&people(&["a"]), &existing);
    assert_eq!(slots[0].busy_count, 0);
  }

  #[test]
  fn repeated_attendee_counts_once() {
    let existing = vec![event("e1", at(9, 0), at(10, 0), &["a"])];
    let slots = heatmap(&people(&["a", "a"]), &existing);
    assert_eq!(slots[0].busy_count, 1);
  }

  #[test]
  fn busy_count_stays_within_bounds() {
    let attendees = people(&["a", "b", "c", "d"]);
    let existing: Vec<Event> = (0..12)
      .map(|i| {
        let start = at(8, 0) + Duration::minutes(i * 45);
        let who = ["a", "b", "c", "x"][(i % 4) as usize];
        event(&format!("e{i}"), start, start + Duration::minutes(70), &[who, "b"])
      })
      .collect();

    let options = HeatmapOptions {
      slot_count:   30,
      slot_minutes: 20,
      start_hour:   7,
    };
    let slots = compute_heatmap(day(), &attendees, &existing, &options);
    assert_eq!(slots.len(), 30);
    for pair in slots.windows(2) {
      assert!(pair[0].time < pair[1].time);
    }
    assert!(slots.iter().all(|s| s.busy_count <= attendees.len()));
  }

  #[test]
  fn zero_slots_requested() {
    let options = HeatmapOptions {
      slot_count: 0,
      ..HeatmapOptions::default()
    };
    assert!(compute_heatmap(day(), &people(&["a"]), &[], &options).is_empty());
  }

  #[test]
  fn grid_may_run_past_midnight() {
    let options = HeatmapOptions {
      slot_count:   4,
      slot_minutes: 60,
      start_hour:   22,
    };
    let slots = compute_heatmap(day(), &[], &[], &options);
    let next = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
    assert_eq!(slots[3].time, next.and_hms_opt(1, 0, 0).unwrap());
  }

  #[test]
  fn invalid_options_are_rejected() {
    let zero = HeatmapOptions {
      slot_minutes: 0,
      ..HeatmapOptions::default()
    };
    assert!(zero.validate().is_err());
    let late = HeatmapOptions {
      start_hour: 24,
      ..HeatmapOptions::default()
    };
    assert!(late.validate().is_err());
    assert!(HeatmapOptions::default().validate().is_ok());
  }

  #[test]
  fn grid_longer_than_a_day_is_rejected() {
    let huge = HeatmapOptions {
      slot_count: usize::MAX,
      ..HeatmapOptions::default()
    };
    assert!(matches!(huge.validate(), Err(Error::InvalidOptions(_))));

    let over = HeatmapOptions {
      slot_count: 49,
      ..HeatmapOptions::default()
    };
    assert!(over.validate().is_err());

    let whole_day = HeatmapOptions {
      slot_count: 48,
      ..HeatmapOptions::default()
    };
    assert!(whole_day.validate().is_ok());
  }
}
