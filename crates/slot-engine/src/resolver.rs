//! The slot resolver: free-gap enumeration, scoring, and ranked surveys.
//!
//! Pure, stateless computation -- no I/O, no shared state, deterministic for
//! identical inputs.

use std::collections::BTreeSet;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::{gaps_within, TimeInterval};
use crate::request::MeetingRequest;
use crate::schedule::{union_busy, ParticipantSchedule};
use crate::scoring::{score_candidate, SlotPreferences};

/// Resolver tuning. An explicit value passed per call, not global state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Step between enumerated candidate starts, in minutes.
    pub granularity_minutes: i64,
    /// Maximum number of candidates returned.
    pub top_k: usize,
    /// Weight of the linear falloff toward the window edges.
    pub edge_penalty_weight: f64,
    /// Weight of the off-preferred-hours penalty.
    pub preference_penalty_weight: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: 15,
            top_k: 5,
            edge_penalty_weight: 0.2,
            preference_penalty_weight: 0.2,
        }
    }
}

impl ResolverConfig {
    /// Reject values that would poison enumeration or scoring.
    pub fn validate(&self) -> Result<()> {
        if self.granularity_minutes <= 0 {
            return Err(SlotError::InvalidRequest(format!(
                "granularity must be positive, got {} minutes",
                self.granularity_minutes
            )));
        }
        for (name, weight) in [
            ("edge_penalty_weight", self.edge_penalty_weight),
            ("preference_penalty_weight", self.preference_penalty_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SlotError::InvalidRequest(format!(
                    "{} must be finite and non-negative, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

/// A proposed meeting time.
///
/// `conflicting_participants` is empty in [`find_slots`] output (candidates
/// come from fully-free gaps) and carries the busy roster members in
/// [`survey_slots`] output. Immutable once returned; the resolver never
/// persists anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub interval: TimeInterval,
    pub confidence_score: f64,
    #[serde(default)]
    pub conflicting_participants: BTreeSet<String>,
}

/// Rank conflict-free candidate slots for a meeting request.
///
/// All participants' busy intervals are merged and clipped to the request
/// window, candidate starts are enumerated at the configured granularity
/// inside each free gap (anchored at the gap start), scored, sorted by
/// descending confidence (ties by earliest start), and truncated to `top_k`.
///
/// A duration longer than the window is infeasible, not invalid: the result
/// is `Ok` and empty. A reversed window or non-positive duration is an
/// `InvalidRequest`.
pub fn find_slots(
    request: &MeetingRequest,
    schedules: &[ParticipantSchedule],
    config: &ResolverConfig,
) -> Result<Vec<CandidateSlot>> {
    find_slots_with_preferences(request, schedules, None, config)
}

/// Like [`find_slots`], additionally applying a preferred-hours penalty when
/// `preferences` is supplied.
pub fn find_slots_with_preferences(
    request: &MeetingRequest,
    schedules: &[ParticipantSchedule],
    preferences: Option<&SlotPreferences>,
    config: &ResolverConfig,
) -> Result<Vec<CandidateSlot>> {
    config.validate()?;
    let window = request.window()?;
    check_duration(request)?;

    if request.duration_minutes > request.span_minutes() {
        return Ok(Vec::new());
    }

    let mut candidates = enumerate_free(window, request, schedules, preferences, config);
    rank(&mut candidates, config.top_k);
    Ok(candidates)
}

/// Run the free-slot pipeline over several windows (typically one per
/// candidate day, from [`business_windows`](crate::business::business_windows)),
/// pool the results, and re-rank globally.
///
/// The request's own window bounds are ignored; each supplied window is
/// searched in full. Windows too short for the duration contribute nothing.
pub fn find_slots_in_windows(
    request: &MeetingRequest,
    windows: &[TimeInterval],
    schedules: &[ParticipantSchedule],
    preferences: Option<&SlotPreferences>,
    config: &ResolverConfig,
) -> Result<Vec<CandidateSlot>> {
    config.validate()?;
    check_duration(request)?;

    let mut pooled = Vec::new();
    for window in windows {
        if request.duration_minutes > window.duration_minutes() {
            continue;
        }
        pooled.extend(enumerate_free(*window, request, schedules, preferences, config));
    }
    rank(&mut pooled, config.top_k);
    Ok(pooled)
}

/// Rank every aligned slot in the window by how many roster members are free.
///
/// Unlike [`find_slots`], conflicted slots are kept and annotated with the
/// busy roster members. Confidence is `free / total` scaled by the request
/// priority weight and clamped to `[0, 1]`. Candidate starts are anchored at
/// the window start. Roster members without a schedule entry count as free;
/// schedules for identities outside the roster are ignored. An empty roster
/// counts as fully available.
pub fn survey_slots(
    request: &MeetingRequest,
    schedules: &[ParticipantSchedule],
    config: &ResolverConfig,
) -> Result<Vec<CandidateSlot>> {
    config.validate()?;
    let window = request.window()?;
    check_duration(request)?;

    if request.duration_minutes > request.span_minutes() {
        return Ok(Vec::new());
    }

    let roster: Vec<&ParticipantSchedule> = schedules
        .iter()
        .filter(|s| request.participants.contains(s.participant()))
        .collect();
    let total = request.participants.len();
    let duration = request.duration();
    let step = Duration::minutes(config.granularity_minutes);

    let mut candidates = Vec::new();
    let mut start = window.start();
    while start + duration <= window.end() {
        let interval = TimeInterval::from_parts(start, start + duration);
        let conflicting: BTreeSet<String> = roster
            .iter()
            .filter(|s| !s.busy_overlapping(interval).is_empty())
            .map(|s| s.participant().to_string())
            .collect();
        let ratio = if total == 0 {
            1.0
        } else {
            (total - conflicting.len()) as f64 / total as f64
        };
        candidates.push(CandidateSlot {
            interval,
            confidence_score: (ratio * request.priority.weight()).clamp(0.0, 1.0),
            conflicting_participants: conflicting,
        });
        start += step;
    }

    rank(&mut candidates, config.top_k);
    Ok(candidates)
}

pub(crate) fn check_duration(request: &MeetingRequest) -> Result<()> {
    if request.duration_minutes <= 0 {
        return Err(SlotError::InvalidRequest(format!(
            "duration must be positive, got {} minutes",
            request.duration_minutes
        )));
    }
    Ok(())
}

fn enumerate_free(
    window: TimeInterval,
    request: &MeetingRequest,
    schedules: &[ParticipantSchedule],
    preferences: Option<&SlotPreferences>,
    config: &ResolverConfig,
) -> Vec<CandidateSlot> {
    let busy = union_busy(schedules, window);
    let duration = request.duration();
    let step = Duration::minutes(config.granularity_minutes);

    let mut candidates = Vec::new();
    for gap in gaps_within(&busy, window) {
        let mut start = gap.start();
        while start + duration <= gap.end() {
            let interval = TimeInterval::from_parts(start, start + duration);
            candidates.push(CandidateSlot {
                interval,
                confidence_score: score_candidate(
                    interval,
                    window,
                    preferences,
                    config.edge_penalty_weight,
                    config.preference_penalty_weight,
                ),
                conflicting_participants: BTreeSet::new(),
            });
            start += step;
        }
    }
    candidates
}

/// Sort by descending confidence, ties by earliest start, then truncate.
fn rank(candidates: &mut Vec<CandidateSlot>, top_k: usize) {
    candidates.sort_by(|a, b| {
        b.confidence_score
            .total_cmp(&a.confidence_score)
            .then_with(|| a.interval.cmp(&b.interval))
    });
    candidates.truncate(top_k);
}
