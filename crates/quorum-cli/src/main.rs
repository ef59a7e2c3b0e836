//! `quorum` — run the availability engine against a snapshot file.
//!
//! # Usage
//!
//! ```
//! quorum --snapshot calendar.json check --candidate meeting.json
//! quorum --snapshot calendar.json suggest --candidate meeting.json --max-suggestions 5
//! quorum --snapshot calendar.json heatmap --day 2025-03-10 --attendee u1 --attendee u2
//! quorum --snapshot calendar.json recompute
//! ```
//!
//! The snapshot file holds `{"events": [...], "teams": [...], "users": [...]}`.
//! Results are printed to stdout as pretty JSON; logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use quorum_core::{
  HeatmapOptions, Snapshot, SuggestOptions, compute_heatmap, detect_conflicts,
  model::{Candidate, UserId, validate_events},
  recompute_all_conflicts, suggest_slots,
};
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "quorum", about = "Calendar conflict and availability engine")]
struct Args {
  /// JSON file with the events, teams and users to evaluate against.
  #[arg(short, long, value_name = "FILE", env = "QUORUM_SNAPSHOT")]
  snapshot: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List per-attendee conflicts for a candidate event.
  Check {
    /// JSON file describing the candidate.
    #[arg(short, long, value_name = "FILE")]
    candidate: PathBuf,
  },
  /// Annotate every event in the snapshot with its conflicts.
  Recompute,
  /// Propose conflict-free start times for a candidate event.
  Suggest {
    #[arg(short, long, value_name = "FILE")]
    candidate: PathBuf,
    #[command(flatten)]
    options:   SuggestFlags,
  },
  /// Busy counts per slot for a set of attendees on one day.
  Heatmap {
    #[arg(long)]
    day:       NaiveDate,
    /// User id to include; repeat for several.
    #[arg(long = "attendee", value_name = "ID")]
    attendees: Vec<String>,
    #[command(flatten)]
    options:   HeatmapFlags,
  },
}

#[derive(ClapArgs, Debug, Default)]
struct SuggestFlags {
  #[arg(long)]
  max_suggestions: Option<usize>,
  #[arg(long)]
  max_probes:      Option<u32>,
  #[arg(long)]
  step_minutes:    Option<u32>,
  /// First hour of day a suggestion may start in.
  #[arg(long)]
  business_start:  Option<u32>,
  /// Last hour of day a suggestion may start in (inclusive).
  #[arg(long)]
  business_end:    Option<u32>,
}

impl SuggestFlags {
  fn options(&self) -> SuggestOptions {
    let base = SuggestOptions::default();
    SuggestOptions {
      max_suggestions: self.max_suggestions.unwrap_or(base.max_suggestions),
      max_probes:      self.max_probes.unwrap_or(base.max_probes),
      step_minutes:    self.step_minutes.unwrap_or(base.step_minutes),
      business_hours:  (
        self.business_start.unwrap_or(base.business_hours.0),
        self.business_end.unwrap_or(base.business_hours.1),
      ),
    }
  }
}

#[derive(ClapArgs, Debug, Default)]
struct HeatmapFlags {
  #[arg(long)]
  slot_count:   Option<usize>,
  #[arg(long)]
  slot_minutes: Option<u32>,
  #[arg(long)]
  start_hour:   Option<u32>,
}

impl HeatmapFlags {
  fn options(&self) -> HeatmapOptions {
    let base = HeatmapOptions::default();
    HeatmapOptions {
      slot_count:   self.slot_count.unwrap_or(base.slot_count),
      slot_minutes: self.slot_minutes.unwrap_or(base.slot_minutes),
      start_hour:   self.start_hour.unwrap_or(base.start_hour),
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let raw = std::fs::read_to_string(&args.snapshot)
    .with_context(|| format!("reading snapshot {}", args.snapshot.display()))?;
  let snapshot = Snapshot::from_json(&raw).context("parsing snapshot")?;

  let output = run(&snapshot, &args.command)?;
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

/// Execute one command against `snapshot`, after rejecting reversed
/// intervals and invalid options.
fn run(snapshot: &Snapshot, command: &Command) -> Result<Value> {
  if let Err(errors) = validate_events(&snapshot.events) {
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    return Err(anyhow!("invalid snapshot: {}", details.join("; ")));
  }

  let value = match command {
    Command::Check { candidate } => {
      let candidate = load_candidate(candidate)?;
      serde_json::to_value(detect_conflicts(
        &candidate,
        &snapshot.events,
        snapshot,
        snapshot,
      ))?
    }
    Command::Recompute => serde_json::to_value(recompute_all_conflicts(
      &snapshot.events,
      snapshot,
      snapshot,
    ))?,
    Command::Suggest { candidate, options } => {
      let candidate = load_candidate(candidate)?;
      let options = options.options();
      options.validate()?;
      let slots = suggest_slots(
        &candidate,
        &snapshot.events,
        snapshot,
        snapshot,
        &options,
      );
      serde_json::json!({ "slots": slots })
    }
    Command::Heatmap { day, attendees, options } => {
      let options = options.options();
      options.validate()?;
      let ids: Vec<UserId> = attendees.iter().map(UserId::new).collect();
      let resolved = snapshot.resolve_users(&ids);
      if resolved.len() < ids.len() {
        tracing::warn!(
          requested = ids.len(),
          known = resolved.len(),
          "some attendees are not in the snapshot and were skipped"
        );
      }
      serde_json::to_value(compute_heatmap(
        *day,
        &resolved,
        &snapshot.events,
        &options,
      ))?
    }
  };
  Ok(value)
}

fn load_candidate(path: &Path) -> Result<Candidate> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading candidate {}", path.display()))?;
  let candidate: Candidate =
    serde_json::from_str(&raw).context("parsing candidate")?;
  candidate.validate()?;
  Ok(candidate)
}
