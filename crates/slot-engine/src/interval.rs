//! Half-open time intervals and the interval-set algebra built on them.
//!
//! Everything in the crate operates on UTC `[start, end)` intervals. The merge
//! and gap helpers produce sorted, non-overlapping sequences -- the form the
//! conflict path relies on for binary search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A half-open UTC time interval `[start, end)`.
///
/// Construction enforces `start < end`; deserialization runs through the same
/// check, so every `TimeInterval` in the crate satisfies the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = SlotError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Create an interval, rejecting empty or reversed bounds.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval(format!(
                "start {} must precede end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Constructor for bounds already known to be ordered.
    pub(crate) fn from_parts(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Two half-open intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Adjacent intervals (one ends exactly when the other starts) do NOT overlap.
    pub fn overlaps(&self, other: TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The overlapping portion of two intervals, if any.
    pub fn intersect(&self, other: TimeInterval) -> Option<TimeInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Self { start, end })
    }
}

/// Sort intervals and coalesce overlapping or adjacent runs into maximal ones.
pub(crate) fn coalesce(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    intervals.sort();

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                // Overlapping or adjacent -- extend the current run.
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }
    merged
}

/// Merge busy intervals clipped to `window`.
///
/// Intervals entirely outside the window are discarded; partially overlapping
/// ones are clipped. Returns a sorted, non-overlapping sequence.
pub fn merge_within(intervals: &[TimeInterval], window: TimeInterval) -> Vec<TimeInterval> {
    let clipped: Vec<TimeInterval> = intervals
        .iter()
        .filter(|iv| iv.overlaps(window))
        .map(|iv| TimeInterval::from_parts(iv.start.max(window.start), iv.end.min(window.end)))
        .collect();
    coalesce(clipped)
}

/// Complement of a merged busy sequence within `window`.
///
/// `merged` must be sorted, non-overlapping, and clipped to the window, as
/// produced by [`merge_within`]. Returns the free gaps sorted by start.
pub fn gaps_within(merged: &[TimeInterval], window: TimeInterval) -> Vec<TimeInterval> {
    let mut gaps = Vec::new();
    let mut cursor = window.start;

    for busy in merged {
        if cursor < busy.start {
            gaps.push(TimeInterval::from_parts(cursor, busy.start));
        }
        cursor = cursor.max(busy.end);
    }

    // Trailing gap after the last busy run.
    if cursor < window.end {
        gaps.push(TimeInterval::from_parts(cursor, window.end));
    }

    gaps
}
