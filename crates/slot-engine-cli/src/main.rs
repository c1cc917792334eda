//! `slots` CLI — query the meeting-slot resolver from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Rank conflict-free slots for a request (stdin → stdout)
//! slots find < payload.json
//!
//! # Survey every aligned slot, conflicted ones included
//! slots survey -i payload.json --pretty
//!
//! # Who clashes with a proposed slot?
//! slots check -i check.json
//!
//! # Business-hour search windows for a date range
//! slots windows --from 2026-03-02 --to 2026-03-06 --timezone America/New_York
//! ```

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slot_engine::{
    business_windows, find_conflicts, find_slots_with_preferences, survey_slots, BusinessHours,
    MeetingRequest, ParticipantSchedule, ResolverConfig, SlotPreferences, TimeInterval,
};
use std::io::{self, Read};
use std::process;

#[derive(Parser)]
#[command(name = "slots", version, about = "Meeting-slot resolver CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank conflict-free candidate slots for a meeting request
    Find {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Rank every aligned slot by roster availability
    Survey {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Report busy intervals overlapping a proposed slot
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Expand a date range into business-hour search windows
    Windows {
        /// First date of the range (inclusive, YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last date of the range (inclusive, YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// IANA timezone the business hours are local to
        #[arg(long)]
        timezone: String,
        /// Local opening time (HH:MM, default 09:00)
        #[arg(long)]
        open: Option<String>,
        /// Local closing time (HH:MM, default 17:00)
        #[arg(long)]
        close: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Payload for `find` and `survey`. Preferences arrive as wall-clock strings
/// and are parsed into core types here, at the boundary.
#[derive(Deserialize)]
struct ResolvePayload {
    request: MeetingRequest,
    #[serde(default)]
    schedules: Vec<ParticipantSchedule>,
    #[serde(default)]
    preferences: Option<PreferencesInput>,
    #[serde(default)]
    config: Option<ResolverConfig>,
}

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

impl PreferencesInput {
    fn into_preferences(self) -> Result<SlotPreferences> {
        let mut ranges = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            ranges.push((parse_time(&range.start)?, parse_time(&range.end)?));
        }
        Ok(SlotPreferences::new(&self.timezone, ranges)?)
    }
}

/// Payload for `check`.
#[derive(Deserialize)]
struct CheckPayload {
    proposed: TimeInterval,
    #[serde(default)]
    schedules: Vec<ParticipantSchedule>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Find {
            input,
            output,
            pretty,
        } => {
            let payload: ResolvePayload = parse_payload(&read_input(input.as_deref())?)?;
            let preferences = payload
                .preferences
                .map(PreferencesInput::into_preferences)
                .transpose()?;
            let config = payload.config.unwrap_or_default();
            let slots = find_slots_with_preferences(
                &payload.request,
                &payload.schedules,
                preferences.as_ref(),
                &config,
            )
            .context("failed to resolve slots")?;
            write_output(output.as_deref(), &to_json(&slots, pretty)?)
        }
        Commands::Survey {
            input,
            output,
            pretty,
        } => {
            let payload: ResolvePayload = parse_payload(&read_input(input.as_deref())?)?;
            let config = payload.config.unwrap_or_default();
            let slots = survey_slots(&payload.request, &payload.schedules, &config)
                .context("failed to survey slots")?;
            write_output(output.as_deref(), &to_json(&slots, pretty)?)
        }
        Commands::Check {
            input,
            output,
            pretty,
        } => {
            let payload: CheckPayload = parse_payload(&read_input(input.as_deref())?)?;
            let conflicts = find_conflicts(payload.proposed, &payload.schedules);
            write_output(output.as_deref(), &to_json(&conflicts, pretty)?)
        }
        Commands::Windows {
            from,
            to,
            timezone,
            open,
            close,
            pretty,
        } => {
            let tz: Tz = match timezone.parse() {
                Ok(tz) => tz,
                Err(_) => bail!("unknown IANA timezone: {timezone}"),
            };
            let defaults = BusinessHours::default();
            let open = open
                .as_deref()
                .map(parse_time)
                .transpose()?
                .unwrap_or_else(|| defaults.open());
            let close = close
                .as_deref()
                .map(parse_time)
                .transpose()?
                .unwrap_or_else(|| defaults.close());
            let hours = BusinessHours::new(open, close)?;
            let windows = business_windows(from, to, hours, tz);
            write_output(None, &to_json(&windows, pretty)?)
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).context("failed to parse JSON payload")
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid wall-clock time: {raw}"))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write file: {path}"))?;
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
