//! Business-day and business-hour windows.
//!
//! Scheduling happens inside Monday-Friday office hours; this module expands
//! a date range into per-day UTC search windows, resolving wall-clock hours
//! through an IANA timezone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

/// Daily opening hours, local wall-clock, half-open `[open, close)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl BusinessHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self> {
        if open >= close {
            return Err(SlotError::InvalidRequest(format!(
                "opening time {} must precede closing time {}",
                open, close
            )));
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }
}

impl Default for BusinessHours {
    /// 09:00-17:00 local.
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time"),
            close: NaiveTime::from_hms_opt(17, 0, 0).expect("17:00 is a valid time"),
        }
    }
}

/// Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first business day strictly after `date`.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    loop {
        match day.succ_opt() {
            Some(next) if is_business_day(next) => return next,
            Some(next) => day = next,
            // End of chrono's representable range.
            None => return day,
        }
    }
}

/// Per-day UTC windows for every business day in the inclusive range
/// `[from, to]`.
///
/// Weekends are skipped. Wall-clock hours resolve through `tz`; on a DST fold
/// the earlier mapping wins, and a day whose local opening or closing time
/// does not exist is skipped. An empty or reversed range produces no windows.
pub fn business_windows(
    from: NaiveDate,
    to: NaiveDate,
    hours: BusinessHours,
    tz: Tz,
) -> Vec<TimeInterval> {
    let mut windows = Vec::new();
    let mut day = from;

    while day <= to {
        if is_business_day(day) {
            if let (Some(open), Some(close)) = (
                local_to_utc(tz, day, hours.open),
                local_to_utc(tz, day, hours.close),
            ) {
                if open < close {
                    windows.push(TimeInterval::from_parts(open, close));
                }
            }
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    windows
}

/// Resolve a local wall-clock time to UTC.
///
/// Returns `None` when the local time falls in a DST gap; on a fold the
/// earlier instant is chosen.
pub(crate) fn local_to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
