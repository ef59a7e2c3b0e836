//! The overlap predicate every conflict decision reduces to.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// Whether `[a_start, a_end)` and `[b_start, b_end)` overlap.
///
/// Strict on both sides: a range ending exactly when the other begins does
/// not overlap it, so back-to-back meetings are allowed. Reversed ranges are
/// not rejected; the comparison runs on the literal values.
pub fn overlaps<T: PartialOrd>(
  a_start: &T,
  a_end: &T,
  b_start: &T,
  b_end: &T,
) -> bool {
  a_start < b_end && a_end > b_start
}

/// A `(start, end)` pair of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
  pub start: T,
  pub end:   T,
}

impl<T: PartialOrd> Interval<T> {
  pub fn new(start: T, end: T) -> Self { Self { start, end } }

  pub fn overlaps(&self, other: &Self) -> bool {
    overlaps(&self.start, &self.end, &other.start, &other.end)
  }

  pub fn is_reversed(&self) -> bool { self.start > self.end }
}

impl<T> Interval<T>
where
  T: Copy + Sub,
{
  pub fn duration(&self) -> <T as Sub>::Output { self.end - self.start }
}
