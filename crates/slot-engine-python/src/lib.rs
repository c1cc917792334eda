//! # slot-engine-python
//!
//! Python bindings for the slot-engine meeting-slot resolver, built with
//! PyO3. The host application is a Python scheduling assistant; it calls the
//! resolver in-process instead of shelling out.
//!
//! Exposes the following functions to Python as the `slot_engine` module:
//!
//! - `find_slots(request_json, schedules_json, preferences_json=None, config_json=None)`
//! - `survey_slots(request_json, schedules_json, config_json=None)`
//! - `check_conflict(start, end, schedules_json)`
//! - `suggest_alternatives(request_json, proposed_start, proposed_end, schedules_json, config_json=None)`
//! - `business_windows(from_date, to_date, timezone, open=None, close=None)`
//!
//! All structured data crosses the boundary as JSON strings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Deserialize;
use slot_engine::{
    BusinessHours, MeetingRequest, ParticipantSchedule, ResolverConfig, SlotPreferences,
    TimeInterval,
};

fn value_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: &str, what: &str) -> PyResult<T> {
    serde_json::from_str(raw).map_err(|e| PyValueError::new_err(format!("invalid {what} JSON: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(value_err)
}

fn parse_datetime(raw: &str) -> PyResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PyValueError::new_err(format!("invalid RFC 3339 datetime '{raw}': {e}")))
}

fn parse_date(raw: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("invalid date '{raw}': {e}")))
}

fn parse_time(raw: &str) -> PyResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| PyValueError::new_err(format!("invalid wall-clock time '{raw}': {e}")))
}

/// Preferred hours arrive as wall-clock strings and are parsed into core
/// types here, at the boundary.
#[derive(Deserialize)]
struct PreferencesInput {
    timezone: String,
    ranges: Vec<RangeInput>,
}

#[derive(Deserialize)]
struct RangeInput {
    start: String,
    end: String,
}

fn parse_preferences(raw: &str) -> PyResult<SlotPreferences> {
    let input: PreferencesInput = parse_json(raw, "preferences")?;
    let mut ranges = Vec::with_capacity(input.ranges.len());
    for range in &input.ranges {
        ranges.push((parse_time(&range.start)?, parse_time(&range.end)?));
    }
    SlotPreferences::new(&input.timezone, ranges).map_err(value_err)
}

/// Rank conflict-free candidate slots for a meeting request.
///
/// Args:
///     request_json: JSON-encoded meeting request (participants,
///         duration_minutes, earliest_start, latest_end, priority).
///     schedules_json: JSON array of participant schedules with their busy
///         intervals.
///     preferences_json: Optional preferred hours, e.g.
///         `{"timezone": "America/New_York", "ranges": [{"start": "09:00", "end": "12:00"}]}`.
///     config_json: Optional resolver configuration (granularity_minutes,
///         top_k, edge_penalty_weight, preference_penalty_weight).
///
/// Returns:
///     A JSON string containing the ranked candidate slots.
///
/// Raises:
///     ValueError: If any input fails to parse or the request is invalid.
#[pyfunction]
#[pyo3(signature = (request_json, schedules_json, preferences_json=None, config_json=None))]
fn find_slots(
    request_json: &str,
    schedules_json: &str,
    preferences_json: Option<&str>,
    config_json: Option<&str>,
) -> PyResult<String> {
    let request: MeetingRequest = parse_json(request_json, "request")?;
    let schedules: Vec<ParticipantSchedule> = parse_json(schedules_json, "schedules")?;
    let preferences = preferences_json.map(parse_preferences).transpose()?;
    let config: ResolverConfig = config_json
        .map(|c| parse_json(c, "config"))
        .transpose()?
        .unwrap_or_default();

    let slots = slot_engine::find_slots_with_preferences(
        &request,
        &schedules,
        preferences.as_ref(),
        &config,
    )
    .map_err(value_err)?;
    to_json(&slots)
}

/// Rank every aligned slot in the request window by roster availability.
///
/// Conflicted slots are kept and annotated with the busy roster members;
/// confidence is the free ratio scaled by the request priority.
///
/// Args:
///     request_json: JSON-encoded meeting request.
///     schedules_json: JSON array of participant schedules.
///     config_json: Optional resolver configuration.
///
/// Returns:
///     A JSON string containing the ranked, annotated candidate slots.
///
/// Raises:
///     ValueError: If any input fails to parse or the request is invalid.
#[pyfunction]
#[pyo3(signature = (request_json, schedules_json, config_json=None))]
fn survey_slots(
    request_json: &str,
    schedules_json: &str,
    config_json: Option<&str>,
) -> PyResult<String> {
    let request: MeetingRequest = parse_json(request_json, "request")?;
    let schedules: Vec<ParticipantSchedule> = parse_json(schedules_json, "schedules")?;
    let config: ResolverConfig = config_json
        .map(|c| parse_json(c, "config"))
        .transpose()?
        .unwrap_or_default();

    let slots = slot_engine::survey_slots(&request, &schedules, &config).map_err(value_err)?;
    to_json(&slots)
}

/// Report which participants are busy during a proposed slot.
///
/// Args:
///     start: Proposed start as an RFC 3339 datetime string.
///     end: Proposed end as an RFC 3339 datetime string.
///     schedules_json: JSON array of participant schedules.
///
/// Returns:
///     A JSON array of the conflicting participant identifiers.
///
/// Raises:
///     ValueError: If the datetimes are malformed or reversed, or the
///         schedules fail to parse.
#[pyfunction]
fn check_conflict(start: &str, end: &str, schedules_json: &str) -> PyResult<String> {
    let proposed =
        TimeInterval::new(parse_datetime(start)?, parse_datetime(end)?).map_err(value_err)?;
    let schedules: Vec<ParticipantSchedule> = parse_json(schedules_json, "schedules")?;

    let conflicting = slot_engine::check_conflict(proposed, &schedules);
    to_json(&conflicting)
}

/// Propose alternatives (reschedule, shorten, split) for a conflicted slot.
///
/// Args:
///     request_json: JSON-encoded meeting request.
///     proposed_start: Proposed start as an RFC 3339 datetime string.
///     proposed_end: Proposed end as an RFC 3339 datetime string.
///     schedules_json: JSON array of participant schedules.
///     config_json: Optional resolver configuration.
///
/// Returns:
///     A JSON array of strategy-tagged alternatives, empty when the proposal
///     is already conflict-free.
///
/// Raises:
///     ValueError: If any input fails to parse or the request is invalid.
#[pyfunction]
#[pyo3(signature = (request_json, proposed_start, proposed_end, schedules_json, config_json=None))]
fn suggest_alternatives(
    request_json: &str,
    proposed_start: &str,
    proposed_end: &str,
    schedules_json: &str,
    config_json: Option<&str>,
) -> PyResult<String> {
    let request: MeetingRequest = parse_json(request_json, "request")?;
    let proposed = TimeInterval::new(parse_datetime(proposed_start)?, parse_datetime(proposed_end)?)
        .map_err(value_err)?;
    let schedules: Vec<ParticipantSchedule> = parse_json(schedules_json, "schedules")?;
    let config: ResolverConfig = config_json
        .map(|c| parse_json(c, "config"))
        .transpose()?
        .unwrap_or_default();

    let alternatives =
        slot_engine::suggest_alternatives(&request, proposed, &schedules, &config)
            .map_err(value_err)?;
    to_json(&alternatives)
}

/// Expand a date range into per-business-day UTC search windows.
///
/// Args:
///     from_date: First date of the range (inclusive, "YYYY-MM-DD").
///     to_date: Last date of the range (inclusive, "YYYY-MM-DD").
///     timezone: IANA timezone the business hours are local to.
///     open: Optional local opening time ("HH:MM", default "09:00").
///     close: Optional local closing time ("HH:MM", default "17:00").
///
/// Returns:
///     A JSON array of UTC windows, weekends skipped.
///
/// Raises:
///     ValueError: If a date, time, or timezone is malformed, or the hours
///         are reversed.
#[pyfunction]
#[pyo3(signature = (from_date, to_date, timezone, open=None, close=None))]
fn business_windows(
    from_date: &str,
    to_date: &str,
    timezone: &str,
    open: Option<&str>,
    close: Option<&str>,
) -> PyResult<String> {
    let from = parse_date(from_date)?;
    let to = parse_date(to_date)?;
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| PyValueError::new_err(format!("unknown IANA timezone: {timezone}")))?;
    let defaults = BusinessHours::default();
    let open = open.map(parse_time).transpose()?.unwrap_or_else(|| defaults.open());
    let close = close
        .map(parse_time)
        .transpose()?
        .unwrap_or_else(|| defaults.close());
    let hours = BusinessHours::new(open, close).map_err(value_err)?;

    to_json(&slot_engine::business_windows(from, to, hours, tz))
}

/// The `slot_engine` Python module, implemented in Rust via PyO3.
///
/// The Rust function name differs from the Python module name so that the
/// `use slot_engine::...` imports above keep resolving to the core crate.
#[pymodule(name = "slot_engine")]
fn slot_engine_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(find_slots, m)?)?;
    m.add_function(wrap_pyfunction!(survey_slots, m)?)?;
    m.add_function(wrap_pyfunction!(check_conflict, m)?)?;
    m.add_function(wrap_pyfunction!(suggest_alternatives, m)?)?;
    m.add_function(wrap_pyfunction!(business_windows, m)?)?;
    Ok(())
}
