//! Per-participant busy schedules.
//!
//! Raw calendar data may arrive unsorted or with overlapping events; a
//! schedule coalesces it at construction so the conflict path can rely on a
//! sorted, non-overlapping sequence.

use serde::{Deserialize, Serialize};

use crate::interval::{self, merge_within, TimeInterval};

/// One participant's busy time.
///
/// The busy sequence is private: it is merged and sorted when the schedule is
/// built (or deserialized) and stays that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSchedule")]
pub struct ParticipantSchedule {
    participant: String,
    busy: Vec<TimeInterval>,
}

#[derive(Deserialize)]
struct RawSchedule {
    participant: String,
    #[serde(default)]
    busy: Vec<TimeInterval>,
}

impl From<RawSchedule> for ParticipantSchedule {
    fn from(raw: RawSchedule) -> Self {
        Self::new(raw.participant, raw.busy)
    }
}

impl ParticipantSchedule {
    /// Build a schedule, merging overlapping or adjacent busy intervals.
    pub fn new(participant: impl Into<String>, busy: Vec<TimeInterval>) -> Self {
        Self {
            participant: participant.into(),
            busy: interval::coalesce(busy),
        }
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    /// Sorted, non-overlapping busy intervals.
    pub fn busy(&self) -> &[TimeInterval] {
        &self.busy
    }

    /// Busy intervals overlapping `interval`, located via binary search.
    ///
    /// Runs in O(log n + k) where k is the number of overlaps returned.
    pub fn busy_overlapping(&self, interval: TimeInterval) -> &[TimeInterval] {
        // First busy interval ending after the proposal starts.
        let first = self.busy.partition_point(|iv| iv.end() <= interval.start());
        let mut last = first;
        while last < self.busy.len() && self.busy[last].start() < interval.end() {
            last += 1;
        }
        &self.busy[first..last]
    }
}

/// Flatten all participants' busy time into one merged sequence clipped to
/// `window`.
pub fn union_busy(schedules: &[ParticipantSchedule], window: TimeInterval) -> Vec<TimeInterval> {
    let all: Vec<TimeInterval> = schedules
        .iter()
        .flat_map(|s| s.busy.iter().copied())
        .collect();
    merge_within(&all, window)
}
