//! Tests for the free-slot resolver: the search pipeline, scoring, ordering,
//! and validation semantics.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::{
    find_slots, find_slots_in_windows, find_slots_with_preferences, MeetingRequest,
    ParticipantSchedule, Priority, ResolverConfig, SlotError, SlotPreferences, TimeInterval,
};

fn ts(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn iv(day: u32, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeInterval {
    TimeInterval::new(ts(day, start_hour, start_min), ts(day, end_hour, end_min)).unwrap()
}

fn request(duration_minutes: i64, earliest: DateTime<Utc>, latest: DateTime<Utc>) -> MeetingRequest {
    MeetingRequest {
        participants: ["a@example.com".to_string(), "b@example.com".to_string()]
            .into_iter()
            .collect(),
        duration_minutes,
        earliest_start: earliest,
        latest_end: latest,
        priority: Priority::Medium,
    }
}

fn local_time(hour: u32, min: u32) -> chrono::NaiveTime {
    chrono::NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

#[test]
fn two_participant_scenario_avoids_all_busy_time() {
    // A busy 09:00-10:00 and 14:00-15:00, B busy 11:00-12:00, window 09:00-17:00,
    // 30-minute meeting at 15-minute granularity.
    let schedules = vec![
        ParticipantSchedule::new(
            "a@example.com",
            vec![iv(2, 9, 0, 10, 0), iv(2, 14, 0, 15, 0)],
        ),
        ParticipantSchedule::new("b@example.com", vec![iv(2, 11, 0, 12, 0)]),
    ];
    let request = request(30, ts(2, 9, 0), ts(2, 17, 0));
    let config = ResolverConfig {
        top_k: 20,
        ..Default::default()
    };

    let slots = find_slots(&request, &schedules, &config).unwrap();

    assert!(!slots.is_empty());
    for slot in &slots {
        for schedule in &schedules {
            for busy in schedule.busy() {
                assert!(
                    !slot.interval.overlaps(*busy),
                    "candidate {:?} overlaps busy {:?}",
                    slot.interval,
                    busy
                );
            }
        }
    }

    // The top candidate sits dead-center in the window slack: 12:45-13:15, no penalty.
    assert_eq!(slots[0].interval, iv(2, 12, 45, 13, 15));
    assert_eq!(slots[0].confidence_score, 1.0);
    assert!(slots[0].conflicting_participants.is_empty());

    // 10:00-10:30 is feasible; 09:30-10:00 (overlapping A) must not appear.
    assert!(slots.iter().any(|s| s.interval == iv(2, 10, 0, 10, 30)));
    assert!(slots.iter().all(|s| s.interval.start() != ts(2, 9, 30)));
}

#[test]
fn empty_schedules_and_exact_fit_yield_one_perfect_slot() {
    // Window 09:00-10:00, duration 60 → exactly one candidate at 09:00, confidence 1.0.
    let request = request(60, ts(2, 9, 0), ts(2, 10, 0));

    let slots = find_slots(&request, &[], &ResolverConfig::default()).unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].interval, iv(2, 9, 0, 10, 0));
    assert_eq!(slots[0].confidence_score, 1.0);
}

#[test]
fn duration_equal_to_gap_length_yields_one_slot_at_gap_start() {
    // Busy 09:00-10:00 and 11:00-12:00 leave a single 60-minute gap.
    let schedules = vec![ParticipantSchedule::new(
        "a@example.com",
        vec![iv(2, 9, 0, 10, 0), iv(2, 11, 0, 12, 0)],
    )];
    let request = request(60, ts(2, 9, 0), ts(2, 12, 0));
    let config = ResolverConfig {
        top_k: 20,
        ..Default::default()
    };

    let slots = find_slots(&request, &schedules, &config).unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].interval, iv(2, 10, 0, 11, 0));
}

#[test]
fn over_long_duration_is_infeasible_not_an_error() {
    let request = request(120, ts(2, 9, 0), ts(2, 10, 0));
    let slots = find_slots(&request, &[], &ResolverConfig::default()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn reversed_window_is_an_invalid_request() {
    let request = request(30, ts(2, 17, 0), ts(2, 9, 0));
    let err = find_slots(&request, &[], &ResolverConfig::default()).unwrap_err();
    assert!(matches!(err, SlotError::InvalidRequest(_)));
}

#[test]
fn non_positive_duration_is_an_invalid_request() {
    for duration in [0, -30] {
        let request = request(duration, ts(2, 9, 0), ts(2, 17, 0));
        let err = find_slots(&request, &[], &ResolverConfig::default()).unwrap_err();
        assert!(matches!(err, SlotError::InvalidRequest(_)));
    }
}

#[test]
fn strict_validation_rejects_all_three_conditions() {
    assert!(request(30, ts(2, 9, 0), ts(2, 17, 0)).validate().is_ok());
    assert!(request(30, ts(2, 17, 0), ts(2, 9, 0)).validate().is_err());
    assert!(request(0, ts(2, 9, 0), ts(2, 17, 0)).validate().is_err());
    // validate() is stricter than the resolver: over-long duration is rejected.
    assert!(request(600, ts(2, 9, 0), ts(2, 10, 0)).validate().is_err());
}

#[test]
fn candidates_are_anchored_at_the_gap_start() {
    // Free window 10:00-11:00, duration 30, granularity 20 → starts 10:00 and 10:20.
    let request = request(30, ts(2, 10, 0), ts(2, 11, 0));
    let config = ResolverConfig {
        granularity_minutes: 20,
        top_k: 20,
        ..Default::default()
    };

    let slots = find_slots(&request, &[], &config).unwrap();

    let mut starts: Vec<DateTime<Utc>> = slots.iter().map(|s| s.interval.start()).collect();
    starts.sort();
    assert_eq!(starts, vec![ts(2, 10, 0), ts(2, 10, 20)]);

    // 10:20 leaves margin on both sides; 10:00 is flush against the edge.
    assert_eq!(slots[0].interval.start(), ts(2, 10, 20));
    assert!(slots[0].confidence_score > slots[1].confidence_score);
}

#[test]
fn ties_break_by_earliest_start() {
    // With no penalties every slot scores 1.0, so ordering is purely by start.
    let request = request(30, ts(2, 9, 0), ts(2, 11, 0));
    let config = ResolverConfig {
        edge_penalty_weight: 0.0,
        top_k: 3,
        ..Default::default()
    };

    let slots = find_slots(&request, &[], &config).unwrap();

    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].interval.start(), ts(2, 9, 0));
    assert_eq!(slots[1].interval.start(), ts(2, 9, 15));
    assert_eq!(slots[2].interval.start(), ts(2, 9, 30));
    assert!(slots.iter().all(|s| s.confidence_score == 1.0));
}

#[test]
fn top_k_zero_returns_nothing() {
    let request = request(30, ts(2, 9, 0), ts(2, 17, 0));
    let config = ResolverConfig {
        top_k: 0,
        ..Default::default()
    };
    assert!(find_slots(&request, &[], &config).unwrap().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let request = request(30, ts(2, 9, 0), ts(2, 17, 0));

    let bad_granularity = ResolverConfig {
        granularity_minutes: 0,
        ..Default::default()
    };
    assert!(matches!(
        find_slots(&request, &[], &bad_granularity).unwrap_err(),
        SlotError::InvalidRequest(_)
    ));

    let negative_weight = ResolverConfig {
        edge_penalty_weight: -0.5,
        ..Default::default()
    };
    assert!(matches!(
        find_slots(&request, &[], &negative_weight).unwrap_err(),
        SlotError::InvalidRequest(_)
    ));

    let nan_weight = ResolverConfig {
        preference_penalty_weight: f64::NAN,
        ..Default::default()
    };
    assert!(matches!(
        find_slots(&request, &[], &nan_weight).unwrap_err(),
        SlotError::InvalidRequest(_)
    ));
}

#[test]
fn find_slots_is_idempotent() {
    let schedules = vec![
        ParticipantSchedule::new(
            "a@example.com",
            vec![iv(2, 9, 0, 10, 0), iv(2, 14, 0, 15, 0)],
        ),
        ParticipantSchedule::new("b@example.com", vec![iv(2, 11, 0, 12, 0)]),
    ];
    let request = request(45, ts(2, 9, 0), ts(2, 17, 0));
    let config = ResolverConfig::default();

    let first = find_slots(&request, &schedules, &config).unwrap();
    let second = find_slots(&request, &schedules, &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn preference_penalty_scales_with_off_preference_minutes() {
    // Preferred 09:00-12:00 UTC; edge penalty disabled to isolate the effect.
    let preferences = SlotPreferences::new("UTC", vec![(local_time(9, 0), local_time(12, 0))]).unwrap();
    let request = request(60, ts(2, 9, 0), ts(2, 17, 0));
    let config = ResolverConfig {
        granularity_minutes: 30,
        top_k: 20,
        edge_penalty_weight: 0.0,
        preference_penalty_weight: 0.2,
    };

    let slots =
        find_slots_with_preferences(&request, &[], Some(&preferences), &config).unwrap();

    let score_at = |start: DateTime<Utc>| {
        slots
            .iter()
            .find(|s| s.interval.start() == start)
            .map(|s| s.confidence_score)
            .expect("slot must exist")
    };

    // Fully inside the preferred hours: no penalty.
    assert_eq!(score_at(ts(2, 9, 0)), 1.0);
    assert_eq!(score_at(ts(2, 11, 0)), 1.0);
    // Half inside: half the weight.
    assert!((score_at(ts(2, 11, 30)) - 0.9).abs() < 1e-9);
    // Fully outside: the whole weight.
    assert!((score_at(ts(2, 13, 0)) - 0.8).abs() < 1e-9);
    // Preferred slots rank first.
    assert_eq!(slots[0].confidence_score, 1.0);
}

#[test]
fn preferences_resolve_through_the_given_timezone() {
    // 13:00-15:00 UTC on 2026-03-02 is 08:00-10:00 in New York (EST).
    // Preferred local hours 09:00-17:00 → the first hour is off-preference.
    let preferences = SlotPreferences::new(
        "America/New_York",
        vec![(local_time(9, 0), local_time(17, 0))],
    )
    .unwrap();
    let request = request(60, ts(2, 13, 0), ts(2, 15, 0));
    let config = ResolverConfig {
        granularity_minutes: 60,
        top_k: 20,
        edge_penalty_weight: 0.0,
        preference_penalty_weight: 0.2,
    };

    let slots =
        find_slots_with_preferences(&request, &[], Some(&preferences), &config).unwrap();

    assert_eq!(slots.len(), 2);
    // 14:00 UTC = 09:00 local, inside the preference.
    assert_eq!(slots[0].interval.start(), ts(2, 14, 0));
    assert_eq!(slots[0].confidence_score, 1.0);
    // 13:00 UTC = 08:00 local, fully outside.
    assert!((slots[1].confidence_score - 0.8).abs() < 1e-9);
}

#[test]
fn invalid_preferences_are_rejected_at_construction() {
    assert!(matches!(
        SlotPreferences::new("Not/AZone", vec![]).unwrap_err(),
        SlotError::InvalidPreference(_)
    ));
    assert!(matches!(
        SlotPreferences::new("UTC", vec![(local_time(12, 0), local_time(9, 0))]).unwrap_err(),
        SlotError::InvalidPreference(_)
    ));
}

#[test]
fn multi_window_search_pools_and_reranks() {
    // Day 2: a 60-minute window that the meeting exactly fills (no penalty).
    // Day 3: a 3-hour window whose centered slot also scores 1.0.
    // Tie → the earlier start (day 2) wins. A too-short window contributes nothing.
    let windows = vec![
        iv(2, 9, 0, 10, 0),
        iv(3, 9, 0, 12, 0),
        iv(4, 9, 0, 9, 30), // shorter than the duration
    ];
    let request = request(60, ts(2, 0, 0), ts(2, 1, 0));
    let config = ResolverConfig {
        granularity_minutes: 60,
        top_k: 10,
        ..Default::default()
    };

    let slots = find_slots_in_windows(&request, &windows, &[], None, &config).unwrap();

    assert!(!slots.is_empty());
    assert_eq!(slots[0].interval, iv(2, 9, 0, 10, 0));
    assert_eq!(slots[0].confidence_score, 1.0);
    assert!(slots.iter().all(|s| s.interval.start() < ts(4, 0, 0)));
}

#[test]
fn multi_window_search_validates_duration() {
    let request = request(0, ts(2, 9, 0), ts(2, 17, 0));
    let err =
        find_slots_in_windows(&request, &[iv(2, 9, 0, 17, 0)], &[], None, &ResolverConfig::default())
            .unwrap_err();
    assert!(matches!(err, SlotError::InvalidRequest(_)));
}

#[test]
fn schedules_with_overlapping_raw_data_are_merged_not_rejected() {
    let schedules = vec![ParticipantSchedule::new(
        "a@example.com",
        vec![iv(2, 9, 0, 11, 0), iv(2, 10, 0, 12, 0), iv(2, 10, 30, 10, 45)],
    )];
    assert_eq!(schedules[0].busy(), &[iv(2, 9, 0, 12, 0)]);

    let request = request(60, ts(2, 9, 0), ts(2, 13, 0));
    let slots = find_slots(&request, &schedules, &ResolverConfig::default()).unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].interval, iv(2, 12, 0, 13, 0));
}
