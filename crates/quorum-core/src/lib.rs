//! Core types and scheduling computations for the Quorum availability engine.
//!
//! This crate is deliberately free of HTTP and storage dependencies. Every
//! operation takes its event corpus, team roster and user directory as
//! arguments and returns freshly derived data; nothing here holds state
//! between calls.

pub mod conflict;
pub mod directory;
pub mod error;
pub mod expand;
pub mod heatmap;
pub mod interval;
pub mod model;
pub mod suggest;

pub use conflict::{detect_conflicts, recompute_all_conflicts};
pub use directory::{Snapshot, TeamRoster, UserDirectory};
pub use error::{Error, Result};
pub use expand::expand_attendees;
pub use heatmap::{HeatmapOptions, compute_heatmap};
pub use interval::{Interval, overlaps};
pub use suggest::{SuggestOptions, suggest_slots};
