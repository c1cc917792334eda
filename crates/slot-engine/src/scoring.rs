//! Candidate scoring: edge and preferred-hours penalties.
//!
//! A fully-free candidate starts at confidence 1.0 and loses weighted
//! penalties for sitting close to the window edges and for minutes spent
//! outside the caller's preferred wall-clock hours. Both falloffs are linear;
//! the weights come from the resolver configuration, never from constants.

use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::business::local_to_utc;
use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

/// Preferred wall-clock meeting hours in a participant timezone.
///
/// Ranges are half-open local times, validated and coalesced at construction.
/// An empty range list means "no preference" and incurs no penalty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPreferences {
    timezone: Tz,
    ranges: Vec<(NaiveTime, NaiveTime)>,
}

impl SlotPreferences {
    pub fn new(timezone: &str, ranges: Vec<(NaiveTime, NaiveTime)>) -> Result<Self> {
        let tz: Tz = timezone.parse().map_err(|_| {
            SlotError::InvalidPreference(format!("unknown IANA timezone: {}", timezone))
        })?;

        for &(open, close) in &ranges {
            if open >= close {
                return Err(SlotError::InvalidPreference(format!(
                    "preferred range start {} must precede end {}",
                    open, close
                )));
            }
        }

        let mut ranges = ranges;
        ranges.sort();
        let mut merged: Vec<(NaiveTime, NaiveTime)> = Vec::with_capacity(ranges.len());
        for (open, close) in ranges {
            if let Some(last) = merged.last_mut() {
                if open <= last.1 {
                    last.1 = last.1.max(close);
                    continue;
                }
            }
            merged.push((open, close));
        }

        Ok(Self {
            timezone: tz,
            ranges: merged,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Sorted, non-overlapping local ranges.
    pub fn ranges(&self) -> &[(NaiveTime, NaiveTime)] {
        &self.ranges
    }

    /// Minutes of `interval` falling inside the preferred local ranges.
    ///
    /// The interval is walked one local calendar day at a time; each preferred
    /// range is mapped to UTC for that day before intersecting. A local time
    /// erased by a DST gap contributes nothing for that day.
    pub fn preferred_minutes(&self, interval: TimeInterval) -> i64 {
        if self.ranges.is_empty() {
            return 0;
        }

        let mut total = 0;
        let mut day = interval.start().with_timezone(&self.timezone).date_naive();
        let last_day = interval.end().with_timezone(&self.timezone).date_naive();

        loop {
            for &(open, close) in &self.ranges {
                let (Some(open_utc), Some(close_utc)) = (
                    local_to_utc(self.timezone, day, open),
                    local_to_utc(self.timezone, day, close),
                ) else {
                    continue;
                };
                if open_utc >= close_utc {
                    continue;
                }
                let lo = open_utc.max(interval.start());
                let hi = close_utc.min(interval.end());
                if lo < hi {
                    total += (hi - lo).num_minutes();
                }
            }

            if day >= last_day {
                break;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        total
    }
}

/// Confidence for a fully-free candidate inside `window`.
///
/// Edge penalty: the smaller of the lead and trail margins is normalized
/// against the window slack (`span - duration`), so a centered slot scores
/// 1.0 and a slot flush against either edge takes the full weight. A slot
/// that exactly fills the window has no slack and takes no penalty.
///
/// Preference penalty: the fraction of the candidate's minutes outside the
/// preferred local ranges, weighted. Scores clamp to `[0, 1]`.
pub(crate) fn score_candidate(
    candidate: TimeInterval,
    window: TimeInterval,
    preferences: Option<&SlotPreferences>,
    edge_weight: f64,
    preference_weight: f64,
) -> f64 {
    let mut score = 1.0;

    let slack = window.duration_minutes() - candidate.duration_minutes();
    if slack > 0 && edge_weight > 0.0 {
        let lead = (candidate.start() - window.start()).num_minutes();
        let trail = (window.end() - candidate.end()).num_minutes();
        let margin = lead.min(trail) as f64;
        let falloff = (1.0 - 2.0 * margin / slack as f64).max(0.0);
        score -= edge_weight * falloff;
    }

    if let Some(prefs) = preferences {
        if preference_weight > 0.0 && !prefs.ranges().is_empty() {
            let duration = candidate.duration_minutes();
            let outside = duration - prefs.preferred_minutes(candidate);
            score -= preference_weight * outside as f64 / duration as f64;
        }
    }

    score.clamp(0.0, 1.0)
}
