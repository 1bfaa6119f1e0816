// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurrence arithmetic over an anchor time.
//!
//! A frequency projects an anchor onto the recurrence grid around some
//! reference time `now`: [`Frequency::previous`] is the greatest occurrence
//! not after `now`, [`Frequency::next`] the smallest occurrence strictly
//! after it. All arithmetic happens in the anchor's time zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The granularity of a recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Frequency {
    /// The occurrence grid point for `now`: `now` with the anchor's
    /// sub-fields substituted. May land on either side of `now`.
    fn base(self, anchor: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let offset = anchor.timezone();
        let now = now.with_timezone(&offset);

        match self {
            Frequency::Year => at(
                offset,
                now.year(),
                anchor.month(),
                i64::from(anchor.day()),
                anchor.time(),
            ),
            Frequency::Month => at(
                offset,
                now.year(),
                now.month(),
                i64::from(anchor.day()),
                anchor.time(),
            ),
            Frequency::Week => {
                let delta = i64::from(anchor.weekday().num_days_from_sunday())
                    - i64::from(now.weekday().num_days_from_sunday());
                at(
                    offset,
                    now.year(),
                    now.month(),
                    i64::from(now.day()) + delta,
                    anchor.time(),
                )
            }
            Frequency::Day => at(
                offset,
                now.year(),
                now.month(),
                i64::from(now.day()),
                anchor.time(),
            ),
            Frequency::Hour => at(
                offset,
                now.year(),
                now.month(),
                i64::from(now.day()),
                clock(now.hour(), anchor.minute(), anchor.second(), anchor.nanosecond()),
            ),
            Frequency::Minute => at(
                offset,
                now.year(),
                now.month(),
                i64::from(now.day()),
                clock(now.hour(), now.minute(), anchor.second(), anchor.nanosecond()),
            ),
            Frequency::Second => at(
                offset,
                now.year(),
                now.month(),
                i64::from(now.day()),
                clock(now.hour(), now.minute(), now.second(), anchor.nanosecond()),
            ),
        }
    }

    /// The greatest occurrence of the anchor that is not after `now`.
    pub fn previous(
        self,
        anchor: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> DateTime<FixedOffset> {
        let base = self.base(anchor, now);

        if base > now {
            self.step(base, -1)
        } else {
            base
        }
    }

    /// The smallest occurrence of the anchor strictly after `now`.
    pub fn next(
        self,
        anchor: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> DateTime<FixedOffset> {
        let base = self.base(anchor, now);

        if base <= now {
            self.step(base, 1)
        } else {
            base
        }
    }

    /// Move one recurrence unit in the given direction. Year and month
    /// steps rebuild the date so out-of-range days roll over (Feb 29 plus
    /// one year lands on Mar 1); the remaining units are exact durations.
    fn step(self, from: DateTime<FixedOffset>, direction: i64) -> DateTime<FixedOffset> {
        let offset = from.timezone();

        match self {
            Frequency::Year => at(
                offset,
                from.year() + direction as i32,
                from.month(),
                i64::from(from.day()),
                from.time(),
            ),
            Frequency::Month => {
                let months = from.year() as i64 * 12 + i64::from(from.month()) - 1 + direction;
                let year = months.div_euclid(12) as i32;
                let month = months.rem_euclid(12) as u32 + 1;
                at(offset, year, month, i64::from(from.day()), from.time())
            }
            Frequency::Week => from + Duration::days(7 * direction),
            Frequency::Day => from + Duration::days(direction),
            Frequency::Hour => from + Duration::hours(direction),
            Frequency::Minute => from + Duration::minutes(direction),
            Frequency::Second => from + Duration::seconds(direction),
        }
    }
}

/// Build a time in the given zone from a possibly out-of-range day number;
/// day 0 or 32 roll into the adjacent month, like calendar normalization.
fn at(offset: FixedOffset, year: i32, month: u32, day: i64, time: NaiveTime) -> DateTime<FixedOffset> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(if year >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    });

    let date = first
        .checked_add_signed(Duration::days(day - 1))
        .unwrap_or(first);

    DateTime::from_naive_utc_and_offset(date.and_time(time) - offset, offset)
}

fn clock(hour: u32, minute: u32, second: u32, nanosecond: u32) -> NaiveTime {
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanosecond)
        .unwrap_or(NaiveTime::MIN)
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Year => "year",
            Frequency::Month => "month",
            Frequency::Week => "week",
            Frequency::Day => "day",
            Frequency::Hour => "hour",
            Frequency::Minute => "minute",
            Frequency::Second => "second",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
#[error("unknown frequency \"{0}\"")]
pub struct ParseFrequencyError(pub String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Frequency::Year),
            "month" => Ok(Frequency::Month),
            "week" => Ok(Frequency::Week),
            "day" => Ok(Frequency::Day),
            "hour" => Ok(Frequency::Hour),
            "minute" => Ok(Frequency::Minute),
            "second" => Ok(Frequency::Second),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "frequency_tests.rs"]
mod tests;
