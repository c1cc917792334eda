//! Tests for the availability survey: ratio scoring, priority weighting, and
//! conflict annotation.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::{
    survey_slots, MeetingRequest, ParticipantSchedule, Priority, ResolverConfig, SlotError,
    TimeInterval,
};
use std::collections::BTreeSet;

fn ts(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

fn iv(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeInterval {
    TimeInterval::new(ts(start_hour, start_min), ts(end_hour, end_min)).unwrap()
}

fn request(roster: &[&str], priority: Priority) -> MeetingRequest {
    MeetingRequest {
        participants: roster.iter().map(|s| s.to_string()).collect(),
        duration_minutes: 60,
        earliest_start: ts(9, 0),
        latest_end: ts(11, 0),
        priority,
    }
}

fn config() -> ResolverConfig {
    ResolverConfig {
        granularity_minutes: 30,
        top_k: 10,
        ..Default::default()
    }
}

#[test]
fn slots_are_ranked_by_free_ratio_and_annotated() {
    // Window 09:00-11:00, duration 60, granularity 30 → starts 09:00, 09:30, 10:00.
    // Alice is busy 09:00-10:00; Bob has no schedule entry (free).
    let schedules = vec![ParticipantSchedule::new(
        "alice@example.com",
        vec![iv(9, 0, 10, 0)],
    )];
    let request = request(&["alice@example.com", "bob@example.com"], Priority::Medium);

    let slots = survey_slots(&request, &schedules, &config()).unwrap();

    assert_eq!(slots.len(), 3);

    // Fully free slot first.
    assert_eq!(slots[0].interval, iv(10, 0, 11, 0));
    assert_eq!(slots[0].confidence_score, 1.0);
    assert!(slots[0].conflicting_participants.is_empty());

    // Conflicted slots tie at 0.5, ordered by start.
    assert_eq!(slots[1].interval, iv(9, 0, 10, 0));
    assert_eq!(slots[1].confidence_score, 0.5);
    assert_eq!(
        slots[1].conflicting_participants,
        BTreeSet::from(["alice@example.com".to_string()])
    );
    assert_eq!(slots[2].interval, iv(9, 30, 10, 30));
    assert_eq!(slots[2].confidence_score, 0.5);
}

#[test]
fn priority_scales_confidence_and_clamps_at_one() {
    let schedules = vec![ParticipantSchedule::new(
        "alice@example.com",
        vec![iv(9, 0, 10, 0)],
    )];
    let request = request(&["alice@example.com", "bob@example.com"], Priority::Urgent);

    let slots = survey_slots(&request, &schedules, &config()).unwrap();

    // 1.0 × 1.2 clamps to 1.0; 0.5 × 1.2 = 0.6.
    assert_eq!(slots[0].confidence_score, 1.0);
    assert!((slots[1].confidence_score - 0.6).abs() < 1e-9);
}

#[test]
fn low_priority_discounts_every_slot() {
    let request = request(&["alice@example.com"], Priority::Low);

    let slots = survey_slots(&request, &[], &config()).unwrap();

    assert_eq!(slots.len(), 3);
    for slot in &slots {
        assert!((slot.confidence_score - 0.9).abs() < 1e-9);
    }
}

#[test]
fn empty_roster_counts_as_fully_available() {
    let request = request(&[], Priority::Medium);

    let slots = survey_slots(&request, &[], &config()).unwrap();

    assert_eq!(slots.len(), 3);
    for slot in &slots {
        assert_eq!(slot.confidence_score, 1.0);
        assert!(slot.conflicting_participants.is_empty());
    }
}

#[test]
fn schedules_outside_the_roster_are_ignored() {
    // Mallory is booked solid but is not invited.
    let schedules = vec![ParticipantSchedule::new(
        "mallory@example.com",
        vec![iv(9, 0, 11, 0)],
    )];
    let request = request(&["alice@example.com"], Priority::Medium);

    let slots = survey_slots(&request, &schedules, &config()).unwrap();

    for slot in &slots {
        assert_eq!(slot.confidence_score, 1.0);
        assert!(slot.conflicting_participants.is_empty());
    }
}

#[test]
fn survey_shares_the_resolver_validation_semantics() {
    // Over-long duration: infeasible, empty, no error.
    let mut over_long = request(&["alice@example.com"], Priority::Medium);
    over_long.duration_minutes = 600;
    assert!(survey_slots(&over_long, &[], &config()).unwrap().is_empty());

    // Reversed window: invalid.
    let mut reversed = request(&["alice@example.com"], Priority::Medium);
    reversed.earliest_start = ts(11, 0);
    reversed.latest_end = ts(9, 0);
    assert!(matches!(
        survey_slots(&reversed, &[], &config()).unwrap_err(),
        SlotError::InvalidRequest(_)
    ));
}

#[test]
fn survey_is_idempotent() {
    let schedules = vec![ParticipantSchedule::new(
        "alice@example.com",
        vec![iv(9, 0, 10, 0)],
    )];
    let request = request(&["alice@example.com", "bob@example.com"], Priority::High);

    let first = survey_slots(&request, &schedules, &config()).unwrap();
    let second = survey_slots(&request, &schedules, &config()).unwrap();

    assert_eq!(first, second);
}
