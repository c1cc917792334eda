//! Alternatives for a conflicted proposal.
//!
//! Mirrors the strategies a human scheduler reaches for: push the meeting
//! later, trim it, or split the roster into a free group and a busy group.
//! Strategy confidences are fixed characteristics of each strategy, not
//! tunable scoring weights.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::check_conflict;
use crate::error::Result;
use crate::interval::TimeInterval;
use crate::request::MeetingRequest;
use crate::resolver::{check_duration, ResolverConfig};
use crate::schedule::ParticipantSchedule;

const RESCHEDULE_CONFIDENCE: f64 = 0.85;
const SHORTEN_CONFIDENCE: f64 = 0.70;
const SPLIT_CONFIDENCE: f64 = 0.60;

/// A conflict-resolution proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Alternative {
    /// Move the whole meeting to the next conflict-free aligned start.
    Reschedule { slot: TimeInterval, confidence: f64 },
    /// Keep the start, trim one granularity step off the end.
    Shorten {
        slot: TimeInterval,
        duration_minutes: i64,
        confidence: f64,
    },
    /// The free group keeps the proposed slot; the busy group meets later.
    Split {
        free_participants: BTreeSet<String>,
        free_slot: TimeInterval,
        busy_participants: BTreeSet<String>,
        busy_slot: TimeInterval,
        confidence: f64,
    },
}

/// Propose alternatives for a conflicted slot.
///
/// Returns an empty list when the proposal is already clean (and also when it
/// conflicts but no strategy applies). Proposals come out in descending
/// confidence order: reschedule (0.85), shorten (0.70), split (0.60).
///
/// - **Reschedule**: the first conflict-free start on the proposal's
///   granularity grid, strictly after the proposed start and inside the
///   request window.
/// - **Shorten**: gated on `duration > 2 * granularity`, and proposed only
///   when the trim strictly shrinks the conflicting set.
/// - **Split**: gated on a roster larger than 3 with a partial conflict. The
///   free group keeps the proposed slot; the busy group gets its own first
///   clear slot after the proposal, checked against only its schedules.
///
/// `proposed` is assumed to span the request's duration; new slots are cut to
/// `request.duration_minutes`.
pub fn suggest_alternatives(
    request: &MeetingRequest,
    proposed: TimeInterval,
    schedules: &[ParticipantSchedule],
    config: &ResolverConfig,
) -> Result<Vec<Alternative>> {
    config.validate()?;
    let window = request.window()?;
    check_duration(request)?;

    let conflicting = check_conflict(proposed, schedules);
    if conflicting.is_empty() {
        return Ok(Vec::new());
    }

    let mut alternatives = Vec::new();

    if let Some(slot) = next_clear_slot(proposed.start(), request.duration(), window, schedules, config)
    {
        alternatives.push(Alternative::Reschedule {
            slot,
            confidence: RESCHEDULE_CONFIDENCE,
        });
    }

    if request.duration_minutes > 2 * config.granularity_minutes {
        let trimmed = request.duration() - Duration::minutes(config.granularity_minutes);
        let slot = TimeInterval::from_parts(proposed.start(), proposed.start() + trimmed);
        // Only worth proposing when the trim actually frees someone.
        if check_conflict(slot, schedules).len() < conflicting.len() {
            alternatives.push(Alternative::Shorten {
                slot,
                duration_minutes: trimmed.num_minutes(),
                confidence: SHORTEN_CONFIDENCE,
            });
        }
    }

    if request.participants.len() > 3 {
        let busy: BTreeSet<String> = request
            .participants
            .intersection(&conflicting)
            .cloned()
            .collect();
        let free: BTreeSet<String> = request
            .participants
            .difference(&conflicting)
            .cloned()
            .collect();
        if !busy.is_empty() && !free.is_empty() {
            let busy_schedules: Vec<ParticipantSchedule> = schedules
                .iter()
                .filter(|s| busy.contains(s.participant()))
                .cloned()
                .collect();
            if let Some(busy_slot) = next_clear_slot(
                proposed.start(),
                request.duration(),
                window,
                &busy_schedules,
                config,
            ) {
                alternatives.push(Alternative::Split {
                    free_participants: free,
                    free_slot: proposed,
                    busy_participants: busy,
                    busy_slot,
                    confidence: SPLIT_CONFIDENCE,
                });
            }
        }
    }

    Ok(alternatives)
}

/// First conflict-free slot on the grid `after + k * granularity` (k >= 1)
/// that still fits inside `window`.
fn next_clear_slot(
    after: DateTime<Utc>,
    duration: Duration,
    window: TimeInterval,
    schedules: &[ParticipantSchedule],
    config: &ResolverConfig,
) -> Option<TimeInterval> {
    let step = Duration::minutes(config.granularity_minutes);
    let mut start = after + step;
    while start + duration <= window.end() {
        let slot = TimeInterval::from_parts(start, start + duration);
        if check_conflict(slot, schedules).is_empty() {
            return Some(slot);
        }
        start += step;
    }
    None
}
