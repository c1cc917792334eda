//! # slot-engine
//!
//! Availability-window computation and conflict resolution over calendar
//! free/busy data.
//!
//! The engine is the pure computational core of a meeting-scheduling
//! assistant: given participants' busy intervals and a requested window and
//! duration, it merges busy time, enumerates free candidate slots, scores
//! and ranks them, and checks proposals for conflicts. It performs no I/O --
//! calendars, persistence, and messaging are the embedding application's
//! concern.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use slot_engine::{find_slots, MeetingRequest, ParticipantSchedule, Priority, ResolverConfig, TimeInterval};
//!
//! let busy = TimeInterval::new(
//!     Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
//! )
//! .unwrap();
//! let schedules = vec![ParticipantSchedule::new("alice@example.com", vec![busy])];
//!
//! let request = MeetingRequest {
//!     participants: ["alice@example.com".to_string()].into_iter().collect(),
//!     duration_minutes: 30,
//!     earliest_start: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
//!     latest_end: Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap(),
//!     priority: Priority::Medium,
//! };
//!
//! let slots = find_slots(&request, &schedules, &ResolverConfig::default()).unwrap();
//! assert!(!slots.is_empty());
//! assert!(slots.iter().all(|s| !s.interval.overlaps(busy)));
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — Half-open UTC intervals, merge and gap algebra
//! - [`schedule`] — Per-participant busy schedules, merged on ingestion
//! - [`request`] — Meeting requests and priorities
//! - [`resolver`] — Free-slot search, scoring, ranked surveys
//! - [`conflict`] — Conflict detection against schedules
//! - [`scoring`] — Preferred-hours data and penalty math
//! - [`alternatives`] — Reschedule/shorten/split proposals for conflicted slots
//! - [`business`] — Business-day and business-hour windows
//! - [`error`] — Error types

pub mod alternatives;
pub mod business;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod request;
pub mod resolver;
pub mod schedule;
pub mod scoring;

pub use alternatives::{suggest_alternatives, Alternative};
pub use business::{business_windows, is_business_day, next_business_day, BusinessHours};
pub use conflict::{check_conflict, find_conflicts, ScheduleConflict};
pub use error::SlotError;
pub use interval::TimeInterval;
pub use request::{MeetingRequest, Priority};
pub use resolver::{
    find_slots, find_slots_in_windows, find_slots_with_preferences, survey_slots, CandidateSlot,
    ResolverConfig,
};
pub use schedule::{union_busy, ParticipantSchedule};
pub use scoring::SlotPreferences;
