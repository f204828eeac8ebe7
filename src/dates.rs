//! Date normalization for Ticket Tailor query filters.
//!
//! The upstream API takes every date bound as integer Unix seconds, while
//! tool callers send loosely formatted ISO 8601 strings. Parsing is lenient:
//! a string that cannot be understood degrades to "now" instead of failing
//! the whole tool call.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde_json::{Map, Value};

use crate::error::TailorError;

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Layouts tried for inputs carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// Layouts tried for naive inputs, which are read as local time.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Returns the current wall-clock time as Unix seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Rewrites the ISO 8601 variants accepted by [`parse_timestamp`] into the
/// extended form `YYYY-MM-DDTHH:MM[:SS[.f]][+HH:MM]`.
///
/// Handles basic dates (`YYYYMMDD`), basic and hour-only clocks (`HH`,
/// `HHMM`, `HHMMSS`), comma fractions, a space or `t` separator, and the
/// offsets `Z`, `+HH` and `+HHMM`. Anything else passes through unchanged.
fn canonicalize(date: &str) -> String {
    let split = date
        .char_indices()
        .find(|&(i, c)| i >= 8 && matches!(c, 'T' | 't' | ' '));
    let (day, time) = match split {
        Some((i, _)) => (&date[..i], Some(&date[i + 1..])),
        None => (date, None),
    };

    let day = expand_basic_date(day);
    match time {
        None => day,
        Some(time) => {
            let (clock, offset) = split_offset(time);
            format!("{}T{}{}", day, expand_clock(clock), expand_offset(offset))
        }
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn expand_basic_date(day: &str) -> String {
    if is_digits(day, 8) {
        format!("{}-{}-{}", &day[..4], &day[4..6], &day[6..])
    } else {
        day.to_string()
    }
}

fn split_offset(time: &str) -> (&str, &str) {
    if let Some(clock) = time.strip_suffix('Z').or_else(|| time.strip_suffix('z')) {
        return (clock, "Z");
    }
    match time.rfind(['+', '-']) {
        Some(i) => (&time[..i], &time[i..]),
        None => (time, ""),
    }
}

fn expand_clock(clock: &str) -> String {
    let (main, fraction) = match clock.find(['.', ',']) {
        Some(i) => (&clock[..i], Some(&clock[i + 1..])),
        None => (clock, None),
    };

    let main = if is_digits(main, 2) {
        format!("{}:00", main)
    } else if is_digits(main, 4) {
        format!("{}:{}", &main[..2], &main[2..])
    } else if is_digits(main, 6) {
        format!("{}:{}:{}", &main[..2], &main[2..4], &main[4..])
    } else {
        main.to_string()
    };

    match fraction {
        Some(fraction) => format!("{}.{}", main, fraction),
        None => main,
    }
}

fn expand_offset(offset: &str) -> String {
    if offset == "Z" {
        return "+00:00".to_string();
    }
    let Some(sign) = offset.chars().next() else {
        return String::new();
    };
    let rest = &offset[1..];
    if is_digits(rest, 2) {
        format!("{}{}:00", sign, rest)
    } else if is_digits(rest, 4) {
        format!("{}{}:{}", sign, &rest[..2], &rest[2..])
    } else {
        offset.to_string()
    }
}

/// Parses an ISO 8601 string into Unix seconds.
///
/// A trailing `Z` is read as `+00:00`. Inputs without an offset (including a
/// bare `YYYY-MM-DD`) are interpreted in the local time zone.
///
/// # Errors
///
/// Returns `TailorError::InvalidDate` if no supported layout matches.
pub fn parse_timestamp(date: &str) -> Result<i64, TailorError> {
    let normalized = canonicalize(date);

    let mut last_error = None;

    for format in OFFSET_FORMATS {
        match DateTime::parse_from_str(&normalized, format) {
            Ok(dt) => return Ok(dt.timestamp()),
            Err(e) => last_error = Some(e),
        }
    }

    for format in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(&normalized, format) {
            Ok(naive) => return Ok(local_timestamp(&naive)),
            Err(e) => last_error = Some(e),
        }
    }

    match NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        Ok(day) => match day.and_hms_opt(0, 0, 0) {
            Some(midnight) => Ok(local_timestamp(&midnight)),
            None => Err(TailorError::invalid_date(date, "no midnight for date")),
        },
        Err(e) => {
            let message = last_error.unwrap_or(e).to_string();
            Err(TailorError::invalid_date(date, message))
        }
    }
}

/// Converts an ISO 8601 string to Unix seconds, falling back to the current
/// time when the string cannot be parsed. Never fails.
pub fn to_unix_timestamp(date: &str) -> i64 {
    match parse_timestamp(date) {
        Ok(ts) => ts,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse date, falling back to current time");
            now_unix()
        }
    }
}

/// Like [`to_unix_timestamp`], but an empty input yields `fallback` (or the
/// current time when no fallback is given).
pub fn safe_unix_timestamp(date: &str, fallback: Option<i64>) -> i64 {
    if date.is_empty() {
        fallback.unwrap_or_else(now_unix)
    } else {
        to_unix_timestamp(date)
    }
}

/// Resolves a naive local date-time to Unix seconds.
///
/// Ambiguous times (DST fold) take the earlier instant. Times inside a DST
/// gap do not exist locally and are read as UTC.
fn local_timestamp(naive: &NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| naive.and_utc().timestamp())
}

/// Output shape requested from `get_current_datetime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeFormat {
    /// `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`
    #[default]
    Iso,
    /// `YYYY-MM-DD`
    Date,
    /// Unix seconds.
    Unix,
    /// Every format plus today's bounds.
    All,
}

impl DateTimeFormat {
    /// Resolves a format name. Unknown names fall back to [`DateTimeFormat::Iso`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "date" => DateTimeFormat::Date,
            "unix" => DateTimeFormat::Unix,
            "all" => DateTimeFormat::All,
            _ => DateTimeFormat::Iso,
        }
    }
}

/// Describes the current local date and time in the requested format.
pub fn current_datetime(format: DateTimeFormat) -> Map<String, Value> {
    current_datetime_at(Local::now(), format)
}

/// Same as [`current_datetime`] for a fixed instant.
pub fn current_datetime_at(now: DateTime<Local>, format: DateTimeFormat) -> Map<String, Value> {
    let naive_now = now.naive_local();
    let iso = if naive_now.nanosecond() / 1_000 == 0 {
        format!("{}Z", naive_now.format("%Y-%m-%dT%H:%M:%S"))
    } else {
        format!("{}Z", naive_now.format("%Y-%m-%dT%H:%M:%S%.6f"))
    };
    let date = naive_now.format("%Y-%m-%d").to_string();
    let unix = now.timestamp();

    let mut out = Map::new();
    match format {
        DateTimeFormat::Iso => {
            out.insert("iso".into(), Value::from(iso));
        }
        DateTimeFormat::Date => {
            out.insert("date".into(), Value::from(date));
        }
        DateTimeFormat::Unix => {
            out.insert("unix".into(), Value::from(unix));
        }
        DateTimeFormat::All => {
            let today = naive_now.date();
            let tomorrow = today.succ_opt().unwrap_or(today);
            let today_start_unix = today
                .and_hms_opt(0, 0, 0)
                .map(|midnight| local_timestamp(&midnight))
                .unwrap_or(unix - unix.rem_euclid(SECONDS_PER_DAY));

            out.insert("iso".into(), Value::from(iso));
            out.insert("date".into(), Value::from(date));
            out.insert("unix".into(), Value::from(unix));
            out.insert(
                "today_start_iso".into(),
                Value::from(format!("{}T00:00:00Z", today.format("%Y-%m-%d"))),
            );
            out.insert(
                "today_end_iso".into(),
                Value::from(format!("{}T00:00:00Z", tomorrow.format("%Y-%m-%d"))),
            );
            out.insert("today_start_unix".into(), Value::from(today_start_unix));
            out.insert(
                "today_end_unix".into(),
                Value::from(today_start_unix + SECONDS_PER_DAY),
            );
        }
    }
    out
}
