//! Conflict detection against participant schedules.
//!
//! All tests are half-open: a slot ending exactly when a busy interval starts
//! is NOT a conflict.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;
use crate::schedule::ParticipantSchedule;

/// A single overlap between a proposed slot and one busy interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    pub participant: String,
    pub overlap: TimeInterval,
    pub overlap_minutes: i64,
}

/// Participants whose busy time overlaps `proposed`.
///
/// Each schedule is binary-searched (busy sequences are sorted and merged on
/// construction), so one participant costs O(log n + k).
pub fn check_conflict(
    proposed: TimeInterval,
    schedules: &[ParticipantSchedule],
) -> BTreeSet<String> {
    schedules
        .iter()
        .filter(|s| !s.busy_overlapping(proposed).is_empty())
        .map(|s| s.participant().to_string())
        .collect()
}

/// Detailed conflict records: one per overlapping busy interval, with the
/// overlap bounds and its length in minutes.
pub fn find_conflicts(
    proposed: TimeInterval,
    schedules: &[ParticipantSchedule],
) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();

    for schedule in schedules {
        for busy in schedule.busy_overlapping(proposed) {
            if let Some(overlap) = proposed.intersect(*busy) {
                conflicts.push(ScheduleConflict {
                    participant: schedule.participant().to_string(),
                    overlap,
                    overlap_minutes: overlap.duration_minutes(),
                });
            }
        }
    }

    conflicts
}
