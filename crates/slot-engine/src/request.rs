//! Meeting requests and priority levels.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

/// Meeting priority.
///
/// The weight scales survey confidence: urgent meetings tolerate partial
/// attendance better than low-priority ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Confidence multiplier applied by [`survey_slots`](crate::resolver::survey_slots).
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 0.9,
            Self::Medium => 1.0,
            Self::High => 1.1,
            Self::Urgent => 1.2,
        }
    }
}

/// A request to schedule one meeting within a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    /// Required attendees. The resolver searches whatever schedules it is
    /// given; the roster determines survey ratios and split groupings.
    pub participants: BTreeSet<String>,
    pub duration_minutes: i64,
    pub earliest_start: DateTime<Utc>,
    pub latest_end: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
}

impl MeetingRequest {
    /// The search window `[earliest_start, latest_end)`.
    pub fn window(&self) -> Result<TimeInterval> {
        TimeInterval::new(self.earliest_start, self.latest_end).map_err(|_| {
            SlotError::InvalidRequest(format!(
                "earliest_start {} must precede latest_end {}",
                self.earliest_start, self.latest_end
            ))
        })
    }

    /// Length of the search window in minutes.
    pub fn span_minutes(&self) -> i64 {
        (self.latest_end - self.earliest_start).num_minutes()
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    /// Strict up-front validation: window ordering, positive duration, and
    /// duration fitting the window.
    ///
    /// The resolver itself treats an over-long duration as infeasible (empty
    /// result) rather than an error; this check is for callers that want to
    /// reject such requests before searching.
    pub fn validate(&self) -> Result<()> {
        self.window()?;
        if self.duration_minutes <= 0 {
            return Err(SlotError::InvalidRequest(format!(
                "duration must be positive, got {} minutes",
                self.duration_minutes
            )));
        }
        if self.duration_minutes > self.span_minutes() {
            return Err(SlotError::InvalidRequest(format!(
                "duration of {} minutes exceeds the {}-minute window",
                self.duration_minutes,
                self.span_minutes()
            )));
        }
        Ok(())
    }
}
