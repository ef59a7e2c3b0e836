//! Forward search for conflict-free alternatives to a candidate's slot.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
  Error, Result,
  conflict::conflicts_for,
  directory::{TeamRoster, UserDirectory},
  expand::expand_attendees,
  interval::Interval,
  model::{Candidate, Event},
};

/// Largest `max_suggestions` accepted by [`SuggestOptions::validate`].
pub const MAX_SUGGESTIONS: usize = 100;
/// Largest `max_probes` accepted by [`SuggestOptions::validate`]; two weeks
/// of probes at the default 30-minute step.
pub const MAX_PROBES: u32 = 672;

/// Tuning knobs for [`suggest_slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestOptions {
  /// Stop once this many free slots are found.
  pub max_suggestions: usize,
  /// Total probes examined, including those skipped outside business hours.
  pub max_probes:      u32,
  /// Distance between consecutive probes.
  pub step_minutes:    u32,
  /// Inclusive `(first, last)` hour of day a suggested start may fall in.
  pub business_hours:  (u32, u32),
}

impl Default for SuggestOptions {
  fn default() -> Self {
    Self {
      max_suggestions: 3,
      max_probes:      96,
      step_minutes:    30,
      business_hours:  (8, 18),
    }
  }
}

impl SuggestOptions {
  pub fn validate(&self) -> Result<()> {
    if self.step_minutes == 0 {
      return Err(Error::InvalidOptions(
        "step_minutes must be positive".to_string(),
      ));
    }
    if self.max_suggestions > MAX_SUGGESTIONS {
      return Err(Error::InvalidOptions(format!(
        "max_suggestions must be at most {MAX_SUGGESTIONS}, got {}",
        self.max_suggestions
      )));
    }
    if self.max_probes > MAX_PROBES {
      return Err(Error::InvalidOptions(format!(
        "max_probes must be at most {MAX_PROBES}, got {}",
        self.max_probes
      )));
    }
    let (open, close) = self.business_hours;
    if open > close || close > 23 {
      return Err(Error::InvalidOptions(format!(
        "business_hours must satisfy first <= last <= 23, got [{open}, {close}]"
      )));
    }
    Ok(())
  }

  fn in_business_hours(&self, at: NaiveDateTime) -> bool {
    let (open, close) = self.business_hours;
    (open..=close).contains(&at.hour())
  }
}

/// Find up to `max_suggestions` start times, after the candidate's own start,
/// at which the candidate could be moved without conflicts.
///
/// Probe `i` (for `i` in `1..=max_probes`) sits `i * step_minutes` after the
/// original start and keeps the original duration. Probes whose start hour is
/// outside the business-hours window are skipped without a check but still
/// use up the probe budget. The result is strictly increasing and may be
/// empty; running out of probes is a normal outcome, and a zero step finds
/// nothing.
pub fn suggest_slots<R, D>(
  candidate: &Candidate,
  existing: &[Event],
  roster: &R,
  directory: &D,
  options: &SuggestOptions,
) -> Vec<NaiveDateTime>
where
  R: TeamRoster + ?Sized,
  D: UserDirectory + ?Sized,
{
  let Some(original) = candidate.interval() else {
    return Vec::new();
  };
  if options.step_minutes == 0 {
    return Vec::new();
  }
  let duration = original.duration();

  // Every trial keeps the candidate's attendees, teams and id, so expansion
  // is the same for all of them.
  let attendees = expand_attendees(
    &candidate.attendees,
    &candidate.team_ids,
    roster,
    directory,
  );

  let mut slots = Vec::new();
  let mut probes = 0;
  for i in 1..=options.max_probes {
    if slots.len() >= options.max_suggestions {
      break;
    }
    let Some(probe) = probe_start(original.start, options.step_minutes, i)
    else {
      break;
    };
    let Some(probe_end) = probe.checked_add_signed(duration) else {
      break;
    };
    probes = i;

    if !options.in_business_hours(probe) {
      trace!(%probe, "outside business hours");
      continue;
    }

    let trial = Interval::new(probe, probe_end);
    if conflicts_for(&attendees, trial, candidate.id.as_ref(), existing)
      .is_empty()
    {
      trace!(%probe, "free slot");
      slots.push(probe);
    }
  }

  debug!(
    candidate = ?candidate.id,
    probes,
    found = slots.len(),
    "searched for alternative slots"
  );
  slots
}

fn probe_start(
  origin: NaiveDateTime,
  step_minutes: u32,
  i: u32,
) -> Option<NaiveDateTime> {
  let minutes = i64::from(step_minutes).checked_mul(i64::from(i))?;
  origin.checked_add_signed(Duration::try_minutes(minutes)?)
}
