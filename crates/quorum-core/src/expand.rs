//! Resolve explicit attendees and team references to concrete users.

use std::collections::HashSet;

use tracing::trace;

use crate::{
  directory::{TeamRoster, UserDirectory},
  model::{Attendee, TeamId, UserId},
};

/// Union `explicit` with the members of every team in `team_ids`, drop
/// repeats, and resolve what remains through `directory`.
///
/// Unknown teams contribute nothing and ids missing from the directory are
/// dropped: only known users can be scheduled. The result keeps first-seen
/// order, explicit attendees before team members.
pub fn expand_attendees<R, D>(
  explicit: &[UserId],
  team_ids: &[TeamId],
  roster: &R,
  directory: &D,
) -> Vec<Attendee>
where
  R: TeamRoster + ?Sized,
  D: UserDirectory + ?Sized,
{
  let team_members = team_ids.iter().flat_map(|team| {
    let members = roster.members(team);
    if members.is_none() {
      trace!(%team, "unknown team, skipping");
    }
    members.unwrap_or_default()
  });

  let mut seen = HashSet::new();
  explicit
    .iter()
    .chain(team_members)
    .filter(|id| seen.insert(*id))
    .filter_map(|id| {
      let attendee = directory.user(id);
      if attendee.is_none() {
        trace!(user = %id, "user not in directory, dropping");
      }
      attendee.cloned()
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Team;

  fn users() -> Vec<Attendee> {
    ["a", "b", "c", "d"]
      .into_iter()
      .map(|id| Attendee::new(id, id.to_uppercase()))
      .collect()
  }

  fn teams() -> Vec<Team> {
    vec![
      Team {
        id:      TeamId::new("eng"),
        name:    "Eng".into(),
        members: vec![UserId::new("a"), UserId::new("b")],
      },
      Team {
        id:      TeamId::new("design"),
        name:    "Design".into(),
        members: vec![UserId::new("b"), UserId::new("c")],
      },
    ]
  }

  fn ids(attendees: &[Attendee]) -> Vec<&str> {
    let mut ids: Vec<&str> = attendees.iter().map(|a| a.id.as_str()).collect();
    ids.sort_unstable();
    ids
  }

  #[test]
  fn explicit_plus_team() {
    let out = expand_attendees(
      &[UserId::new("c")],
      &[TeamId::new("eng")],
      &teams(),
      &users(),
    );
    assert_eq!(ids(&out), vec!["a", "b", "c"]);
  }

  #[test]
  fn explicit_member_of_team_is_not_repeated() {
    let out = expand_attendees(
      &[UserId::new("a")],
      &[TeamId::new("eng")],
      &teams(),
      &users(),
    );
    assert_eq!(ids(&out), vec!["a", "b"]);
  }

  #[test]
  fn overlapping_teams_are_deduplicated() {
    let out = expand_attendees(
      &[],
      &[TeamId::new("eng"), TeamId::new("design"), TeamId::new("eng")],
      &teams(),
      &users(),
    );
    assert_eq!(ids(&out), vec!["a", "b", "c"]);
  }

  #[test]
  fn unknown_team_contributes_nothing() {
    let out = expand_attendees(
      &[UserId::new("d")],
      &[TeamId::new("ghosts")],
      &teams(),
      &users(),
    );
    assert_eq!(ids(&out), vec!["d"]);
  }

  #[test]
  fn unknown_user_is_dropped() {
    let out = expand_attendees(
      &[UserId::new("nobody"), UserId::new("a")],
      &[],
      &teams(),
      &users(),
    );
    assert_eq!(ids(&out), vec!["a"]);
  }

  #[test]
  fn empty_directory_yields_nobody() {
    let out = expand_attendees(
      &[UserId::new("a")],
      &[TeamId::new("eng")],
      &teams(),
      &Vec::<Attendee>::new(),
    );
    assert!(out.is_empty());
  }

  #[test]
  fn expansion_is_idempotent() {
    let explicit = [UserId::new("c"), UserId::new("a")];
    let team_ids = [TeamId::new("eng"), TeamId::new("design")];
    let first = expand_attendees(&explicit, &team_ids, &teams(), &users());
    let second = expand_attendees(&explicit, &team_ids, &teams(), &users());
    assert_eq!(first, second);
    assert_eq!(ids(&first), vec!["a", "b", "c"]);
  }
}
