//! Conflict detection for a single candidate and for a whole corpus.
//!
//! A conflict is always per attendee: for each user who would attend the
//! candidate, the existing events they also attend whose interval overlaps
//! the candidate's. Team references are expanded before any comparison.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::{
  directory::{TeamRoster, UserDirectory},
  expand::expand_attendees,
  interval::Interval,
  model::{
    AnnotatedEvent, Attendee, Candidate, Conflict, ConflictingEvent, Event,
    EventId,
  },
};

/// Conflicts the candidate would introduce against `existing`.
///
/// Returns one [`Conflict`] per affected attendee, in expansion order, with
/// every overlapping event attached to it. A candidate missing its start or
/// end has nothing to check and yields an empty list. If the candidate has an
/// id, the stored event with that id is ignored, so re-checking an edited
/// event never reports it against its own previous version.
pub fn detect_conflicts<R, D>(
  candidate: &Candidate,
  existing: &[Event],
  roster: &R,
  directory: &D,
) -> Vec<Conflict>
where
  R: TeamRoster + ?Sized,
  D: UserDirectory + ?Sized,
{
  let Some(interval) = candidate.interval() else {
    return Vec::new();
  };

  let attendees = expand_attendees(
    &candidate.attendees,
    &candidate.team_ids,
    roster,
    directory,
  );

  let conflicts =
    conflicts_for(&attendees, interval, candidate.id.as_ref(), existing);
  debug!(
    candidate = ?candidate.id,
    attendees = attendees.len(),
    conflicted = conflicts.len(),
    "checked candidate for conflicts"
  );
  conflicts
}

/// The detection loop shared by every entry point: `attendees` are already
/// resolved, `exclude` is the self-exclusion id.
pub(crate) fn conflicts_for(
  attendees: &[Attendee],
  interval: Interval<NaiveDateTime>,
  exclude: Option<&EventId>,
  existing: &[Event],
) -> Vec<Conflict> {
  attendees
    .iter()
    .filter_map(|attendee| {
      let events: Vec<ConflictingEvent> = existing
        .iter()
        .filter(|e| exclude != Some(&e.id))
        .filter(|e| e.has_attendee(&attendee.id))
        .filter(|e| e.interval().overlaps(&interval))
        .map(ConflictingEvent::from)
        .collect();

      (!events.is_empty()).then(|| Conflict {
        attendee: attendee.clone(),
        events,
      })
    })
    .collect()
}

/// Recompute conflict annotations for every event in the corpus.
///
/// Each event is checked against all others as if it were a candidate being
/// edited. This is a full recompute rather than an incremental update;
/// callers run it whenever the authoritative corpus changes (create, update,
/// delete). The input is left untouched and an annotated copy is returned in
/// the same order.
pub fn recompute_all_conflicts<R, D>(
  events: &[Event],
  roster: &R,
  directory: &D,
) -> Vec<AnnotatedEvent>
where
  R: TeamRoster + ?Sized,
  D: UserDirectory + ?Sized,
{
  let annotated: Vec<AnnotatedEvent> = events
    .iter()
    .map(|event| {
      let conflicts =
        detect_conflicts(&Candidate::from(event), events, roster, directory);
      AnnotatedEvent {
        event: event.clone(),
        has_conflict: !conflicts.is_empty(),
        conflicts,
      }
    })
    .collect();

  debug!(
    events = annotated.len(),
    conflicted = annotated.iter().filter(|a| a.has_conflict).count(),
    "recomputed corpus conflicts"
  );
  annotated
}
