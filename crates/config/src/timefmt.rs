// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of the time layouts accepted in configuration documents.
//!
//! Anchor times are frequently partial ("14:30", "25/12", "Jan"); missing
//! fields default to year 0, January 1st, midnight, in the provided zone.
//! Weekday names parse to year 0, Jan 1 + weekday index, which combined
//! with the week frequency anchors a weekly recurrence.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use thiserror::Error;

/// The accepted layouts, tried in order.
const LAYOUTS: &[&str] = &[
    "%H:%M",
    "%H:%M%:z",
    "%H:%M:%S",
    "%H:%M:%S%:z",
    "%d/%m",
    "%d/%m%:z",
    "%b %d",
    "%b",
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%:z",
    "%+",
];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Error)]
#[error("could not parse time \"{0}\"")]
pub struct ParseTimeError(pub String);

/// Parse a time string against the accepted layouts. Layouts without an
/// explicit offset resolve in `default_offset`.
pub fn parse_time(
    s: &str,
    default_offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, ParseTimeError> {
    for layout in LAYOUTS {
        let mut parsed = Parsed::new();

        if format::parse(&mut parsed, s, StrftimeItems::new(layout)).is_err() {
            continue;
        }

        if let Some(time) = realize(&parsed, default_offset) {
            return Ok(time);
        }
    }

    for (index, day) in WEEKDAYS.iter().enumerate() {
        if s.eq_ignore_ascii_case(day) {
            return at_midnight(0, 1, 1 + index as u32, default_offset)
                .ok_or_else(|| ParseTimeError(s.to_string()));
        }
    }

    Err(ParseTimeError(s.to_string()))
}

/// Turn a partial parse into a concrete time by filling in the defaults.
fn realize(parsed: &Parsed, default_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let offset = match parsed.offset {
        Some(seconds) => FixedOffset::east_opt(seconds)?,
        None => default_offset,
    };

    let date = NaiveDate::from_ymd_opt(
        parsed.year.unwrap_or(0),
        parsed.month.unwrap_or(1),
        parsed.day.unwrap_or(1),
    )?;

    let hour = parsed.hour_div_12.unwrap_or(0) * 12 + parsed.hour_mod_12.unwrap_or(0);
    let time = NaiveTime::from_hms_nano_opt(
        hour,
        parsed.minute.unwrap_or(0),
        parsed.second.unwrap_or(0),
        parsed.nanosecond.unwrap_or(0),
    )?;

    Some(DateTime::from_naive_utc_and_offset(
        date.and_time(time) - offset,
        offset,
    ))
}

fn at_midnight(
    year: i32,
    month: u32,
    day: u32,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    Some(DateTime::from_naive_utc_and_offset(
        date.and_time(NaiveTime::MIN) - offset,
        offset,
    ))
}

#[cfg(test)]
#[path = "timefmt_tests.rs"]
mod tests;
