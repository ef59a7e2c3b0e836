//! Calendar entities as the engine sees them.
//!
//! Every type here is a read-only input or a freshly built output. The
//! engine never owns attendees or teams; it refers to them by identifier and
//! resolves them through the collaborators in [`crate::directory`].

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, interval::Interval};

// ─── Identifiers ─────────────────────────────────────────────────────────────

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub String);

    impl $name {
      pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

      pub fn as_str(&self) -> &str { &self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self { Self(s.to_owned()) }
    }
  };
}

string_id!(
  /// Identifies an individual user.
  UserId
);
string_id!(
  /// Identifies a team in the roster.
  TeamId
);
string_id!(
  /// Identifies a persisted event.
  EventId
);

// ─── People ──────────────────────────────────────────────────────────────────

/// An individual who can be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
  pub id:    UserId,
  pub name:  String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
}

impl Attendee {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id:    UserId::new(id),
      name:  name.into(),
      email: None,
    }
  }
}

/// A named group of users. Teams only exist to add many attendees at once;
/// nothing is ever scheduled against a team directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
  pub id:      TeamId,
  pub name:    String,
  #[serde(default)]
  pub members: Vec<UserId>,
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// A materialised event instance. Recurring series are expanded by the
/// caller before they reach the engine, one `Event` per occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:        EventId,
  pub title:     String,
  pub start:     NaiveDateTime,
  pub end:       NaiveDateTime,
  /// Already-resolved individual attendees.
  #[serde(default)]
  pub attendees: Vec<UserId>,
  pub creator:   UserId,
}

impl Event {
  pub fn interval(&self) -> Interval<NaiveDateTime> {
    Interval::new(self.start, self.end)
  }

  pub fn has_attendee(&self, user: &UserId) -> bool {
    self.attendees.iter().any(|a| a == user)
  }

  /// Reject events whose end precedes their start.
  pub fn validate(&self) -> Result<()> {
    if self.interval().is_reversed() {
      return Err(Error::ReversedInterval {
        id:    Some(self.id.clone()),
        start: self.start,
        end:   self.end,
      });
    }
    Ok(())
  }
}

/// Validate every event in a corpus, collecting all failures rather than
/// stopping at the first one.
pub fn validate_events(events: &[Event]) -> Result<(), Vec<Error>> {
  let errors: Vec<Error> =
    events.iter().filter_map(|e| e.validate().err()).collect();
  if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// An event being placed, previewed, or edited. Only the interval and the
/// attendee references matter; everything else is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
  /// Set when editing a persisted event, so it is not compared to itself.
  #[serde(default)]
  pub id:        Option<EventId>,
  #[serde(default)]
  pub title:     Option<String>,
  #[serde(default)]
  pub start:     Option<NaiveDateTime>,
  #[serde(default)]
  pub end:       Option<NaiveDateTime>,
  #[serde(default)]
  pub attendees: Vec<UserId>,
  #[serde(default)]
  pub team_ids:  Vec<TeamId>,
}

impl Candidate {
  /// A fresh candidate with no identifier.
  pub fn new(
    start: NaiveDateTime,
    end: NaiveDateTime,
    attendees: impl IntoIterator<Item = UserId>,
  ) -> Self {
    Self {
      start: Some(start),
      end: Some(end),
      attendees: attendees.into_iter().collect(),
      ..Self::default()
    }
  }

  pub fn with_id(mut self, id: impl Into<String>) -> Self {
    self.id = Some(EventId::new(id));
    self
  }

  pub fn with_teams(mut self, teams: impl IntoIterator<Item = TeamId>) -> Self {
    self.team_ids = teams.into_iter().collect();
    self
  }

  /// The candidate's time range, if both ends are present.
  pub fn interval(&self) -> Option<Interval<NaiveDateTime>> {
    Some(Interval::new(self.start?, self.end?))
  }

  /// Reject a reversed interval. A candidate with a missing end is valid;
  /// the engine treats it as having nothing to check.
  pub fn validate(&self) -> Result<()> {
    match self.interval() {
      Some(iv) if iv.is_reversed() => Err(Error::ReversedInterval {
        id:    self.id.clone(),
        start: iv.start,
        end:   iv.end,
      }),
      _ => Ok(()),
    }
  }
}

impl From<&Event> for Candidate {
  fn from(e: &Event) -> Self {
    Self {
      id:        Some(e.id.clone()),
      title:     Some(e.title.clone()),
      start:     Some(e.start),
      end:       Some(e.end),
      attendees: e.attendees.clone(),
      team_ids:  Vec::new(),
    }
  }
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// The part of an existing event reported inside a [`Conflict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingEvent {
  pub id:    EventId,
  pub title: String,
  pub start: NaiveDateTime,
  pub end:   NaiveDateTime,
}

impl From<&Event> for ConflictingEvent {
  fn from(e: &Event) -> Self {
    Self {
      id:    e.id.clone(),
      title: e.title.clone(),
      start: e.start,
      end:   e.end,
    }
  }
}

/// All existing events that overlap the candidate for one attendee.
/// Never empty: attendees without overlaps get no record at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
  pub attendee: Attendee,
  pub events:   Vec<ConflictingEvent>,
}

/// An event from the corpus with its conflict status materialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedEvent {
  #[serde(flatten)]
  pub event:        Event,
  pub has_conflict: bool,
  pub conflicts:    Vec<Conflict>,
}

/// One cell of an availability heat-map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapSlot {
  pub time:       NaiveDateTime,
  pub busy_count: usize,
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
      .unwrap()
      .and_hms_opt(h, m, 0)
      .unwrap()
  }

  fn event(start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event {
      id: EventId::new("evt-1"),
      title: "Planning".into(),
      start,
      end,
      attendees: vec![UserId::new("u")],
      creator: UserId::new("u"),
    }
  }

  #[test]
  fn reversed_event_fails_validation() {
    let err = event(at(11, 0), at(10, 0)).validate().unwrap_err();
    assert!(matches!(err, Error::ReversedInterval { id: Some(_), .. }));
    assert!(err.to_string().contains("evt-1"), "{err}");
  }

  #[test]
  fn zero_length_event_is_valid() {
    assert!(event(at(10, 0), at(10, 0)).validate().is_ok());
  }

  #[test]
  fn validate_events_reports_every_offender() {
    let mut bad = event(at(12, 0), at(9, 0));
    bad.id = EventId::new("evt-2");
    let events = vec![event(at(12, 0), at(9, 0)), event(at(9, 0), at(10, 0)), bad];
    let errors = validate_events(&events).unwrap_err();
    assert_eq!(errors.len(), 2);
  }

  #[test]
  fn candidate_without_end_is_valid() {
    let c = Candidate {
      start: Some(at(10, 0)),
      ..Candidate::default()
    };
    assert!(c.interval().is_none());
    assert!(c.validate().is_ok());
  }

  #[test]
  fn reversed_candidate_names_itself() {
    let c = Candidate::new(at(11, 0), at(10, 0), []);
    let err = c.validate().unwrap_err();
    assert!(err.to_string().starts_with("candidate"), "{err}");
  }

  #[test]
  fn annotated_event_serialises_flat() {
    let annotated = AnnotatedEvent {
      event:        event(at(10, 0), at(11, 0)),
      has_conflict: false,
      conflicts:    vec![],
    };
    let json = serde_json::to_value(&annotated).unwrap();
    assert_eq!(json["id"], "evt-1");
    assert_eq!(json["has_conflict"], false);
    assert_eq!(json["start"], "2025-03-10T10:00:00");
  }
}
