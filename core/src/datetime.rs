// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Layouts accepted from form fields, tried in order.
const INPUT_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// A date string that matched none of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date `{input}`: {reason}")]
pub struct DateTimeError {
    input: String,
    reason: String,
}

impl DateTimeError {
    fn new(input: &str, reason: impl ToString) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a timestamp sent by the server: RFC 3339, or epoch milliseconds.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, DateTimeError> {
    let s = s.trim();
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let millis: i64 = s.parse().map_err(|e| DateTimeError::new(s, e))?;
        return Timestamp::from_millisecond(millis).map_err(|e| DateTimeError::new(s, e));
    }
    s.parse().map_err(|e| DateTimeError::new(s, e))
}

/// Parses a value typed into a date field, interpreting civil times in `tz`.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM` (with optional seconds),
/// `YYYY-MM-DD` (midnight), or a full RFC 3339 timestamp.
pub fn parse_input(s: &str, tz: &TimeZone) -> Result<Timestamp, DateTimeError> {
    let s = s.trim();
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Ok(ts);
    }

    let civil = INPUT_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::strptime(*layout, s).ok())
        .or_else(|| {
            Date::strptime("%Y-%m-%d", s)
                .ok()
                .map(|d| d.to_datetime(Time::midnight()))
        });

    match civil {
        Some(dt) => dt
            .to_zoned(tz.clone())
            .map(|zoned| zoned.timestamp())
            .map_err(|e| DateTimeError::new(s, e)),
        None => Err(DateTimeError::new(s, "expected YYYY-MM-DD HH:MM")),
    }
}

/// Formats a timestamp the way form fields hold it.
pub fn format_input(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime(INPUT_FORMAT).to_string()
}

/// Formats a timestamp for display in lists and cards.
pub fn format_display(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime(DISPLAY_FORMAT).to_string()
}
