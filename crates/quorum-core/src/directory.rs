//! Read-only lookups the engine consults while expanding attendees.
//!
//! The surrounding application owns teams and users; the engine only needs
//! to resolve identifiers for the duration of one call. Both traits are
//! implemented for plain slices (linear scan) and for `HashMap` indices, and
//! [`Snapshot`] bundles everything a call needs into one serialisable value.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  model::{Attendee, Event, Team, TeamId, UserId},
};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Team id → member ids.
pub trait TeamRoster {
  /// Members of `team`, or `None` if the team is unknown.
  fn members(&self, team: &TeamId) -> Option<&[UserId]>;
}

/// User id → attendee record.
pub trait UserDirectory {
  fn user(&self, id: &UserId) -> Option<&Attendee>;
}

impl<R: TeamRoster + ?Sized> TeamRoster for &R {
  fn members(&self, team: &TeamId) -> Option<&[UserId]> {
    (**self).members(team)
  }
}

impl<D: UserDirectory + ?Sized> UserDirectory for &D {
  fn user(&self, id: &UserId) -> Option<&Attendee> { (**self).user(id) }
}

// ─── Slice implementations ───────────────────────────────────────────────────

impl TeamRoster for [Team] {
  fn members(&self, team: &TeamId) -> Option<&[UserId]> {
    self
      .iter()
      .find(|t| &t.id == team)
      .map(|t| t.members.as_slice())
  }
}

impl TeamRoster for Vec<Team> {
  fn members(&self, team: &TeamId) -> Option<&[UserId]> {
    self.as_slice().members(team)
  }
}

impl UserDirectory for [Attendee] {
  fn user(&self, id: &UserId) -> Option<&Attendee> {
    self.iter().find(|a| &a.id == id)
  }
}

impl UserDirectory for Vec<Attendee> {
  fn user(&self, id: &UserId) -> Option<&Attendee> {
    self.as_slice().user(id)
  }
}

// ─── Map implementations ─────────────────────────────────────────────────────

impl TeamRoster for HashMap<TeamId, Vec<UserId>> {
  fn members(&self, team: &TeamId) -> Option<&[UserId]> {
    HashMap::get(self, team).map(Vec::as_slice)
  }
}

impl UserDirectory for HashMap<UserId, Attendee> {
  fn user(&self, id: &UserId) -> Option<&Attendee> { self.get(id) }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// A consistent copy of everything the engine reads: the event corpus, the
/// team roster and the user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
  #[serde(default)]
  pub events: Vec<Event>,
  #[serde(default)]
  pub teams:  Vec<Team>,
  #[serde(default)]
  pub users:  Vec<Attendee>,
}

impl Snapshot {
  pub fn from_json(raw: &str) -> Result<Self> { Ok(serde_json::from_str(raw)?) }

  /// Resolve user ids through this snapshot's directory, dropping unknown
  /// ids and repeats.
  pub fn resolve_users<'a>(
    &self,
    ids: impl IntoIterator<Item = &'a UserId>,
  ) -> Vec<Attendee> {
    crate::expand::expand_attendees(
      &ids.into_iter().cloned().collect::<Vec<_>>(),
      &[],
      self,
      self,
    )
  }
}

impl TeamRoster for Snapshot {
  fn members(&self, team: &TeamId) -> Option<&[UserId]> {
    self.teams.members(team)
  }
}

impl UserDirectory for Snapshot {
  fn user(&self, id: &UserId) -> Option<&Attendee> { self.users.user(id) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn team(id: &str, members: &[&str]) -> Team {
    Team {
      id:      TeamId::new(id),
      name:    id.to_uppercase(),
      members: members.iter().map(|m| UserId::new(*m)).collect(),
    }
  }

  #[test]
  fn slice_roster_finds_members() {
    let teams = vec![team("eng", &["a", "b"]), team("ops", &["c"])];
    let members = teams.members(&TeamId::new("eng")).unwrap();
    assert_eq!(members, &[UserId::new("a"), UserId::new("b")]);
    assert!(teams.members(&TeamId::new("sales")).is_none());
  }

  #[test]
  fn map_directory_matches_slice_directory() {
    let users = vec![Attendee::new("a", "Ada"), Attendee::new("b", "Bo")];
    let map: HashMap<UserId, Attendee> =
      users.iter().map(|u| (u.id.clone(), u.clone())).collect();
    for id in ["a", "b", "z"] {
      let id = UserId::new(id);
      assert_eq!(users.user(&id), map.user(&id));
    }
  }

  #[test]
  fn snapshot_parses_with_missing_sections() {
    let snap = Snapshot::from_json(r#"{"users":[{"id":"a","name":"Ada"}]}"#)
      .unwrap();
    assert!(snap.events.is_empty());
    assert!(snap.teams.is_empty());
    assert_eq!(snap.users.len(), 1);
  }

  #[test]
  fn snapshot_rejects_malformed_json() {
    assert!(Snapshot::from_json("{\"events\": 3}").is_err());
  }

  #[test]
  fn resolve_users_drops_unknown_and_repeats() {
    let snap = Snapshot {
      users: vec![Attendee::new("a", "Ada"), Attendee::new("b", "Bo")],
      ..Snapshot::default()
    };
    let ids = [UserId::new("b"), UserId::new("ghost"), UserId::new("b")];
    let resolved = snap.resolve_users(&ids);
    assert_eq!(resolved, vec![Attendee::new("b", "Bo")]);
  }
}
