// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar-date identity used to key daily logs.
//!
//! A [`DateKey`] is a plain calendar date with no time zone. Its canonical text
//! form is `YYYY-MM-DD`, which is also what the tracker API sends and expects.
//! Weeks start on Monday. Labels are rendered in Spanish (es-AR).

use chrono::{Datelike, Duration, Local, Locale, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Locale used for every human-facing date string.
pub const LABEL_LOCALE: Locale = Locale::es_AR;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

/// Malformed date input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date key `{input}` (expected YYYY-MM-DD)")]
pub struct ParseError {
    pub input: String,
}

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date on the local clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        // chrono accepts unpadded fields; keys must be exactly 10 chars
        if trimmed.len() != 10 {
            return Err(ParseError {
                input: input.to_string(),
            });
        }
        NaiveDate::parse_from_str(trimmed, KEY_FORMAT)
            .map(Self)
            .map_err(|_| ParseError {
                input: input.to_string(),
            })
    }

    /// Canonical `YYYY-MM-DD` form.
    pub fn format(&self) -> String {
        self.0.format(KEY_FORMAT).to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn add_days(&self, days: i64) -> Self {
        match self.0.checked_add_signed(Duration::days(days)) {
            Some(date) => Self(date),
            None if days < 0 => Self(NaiveDate::MIN),
            None => Self(NaiveDate::MAX),
        }
    }

    /// Shift by whole months, clamping the day to the target month's length
    /// (2024-03-31 minus one month is 2024-02-29).
    pub fn add_months(&self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        match shifted {
            Some(date) => Self(date),
            None if months < 0 => Self(NaiveDate::MIN),
            None => Self(NaiveDate::MAX),
        }
    }

    /// Monday on or before this date.
    pub fn start_of_week(&self) -> Self {
        self.add_days(-i64::from(self.0.weekday().num_days_from_monday()))
    }

    /// Sunday on or after this date.
    pub fn end_of_week(&self) -> Self {
        self.start_of_week().add_days(6)
    }

    pub fn start_of_month(&self) -> Self {
        // day 1 exists in every month
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn end_of_month(&self) -> Self {
        self.start_of_month().add_months(1).add_days(-1)
    }

    /// Same month with the day replaced, clamped to the month's length.
    pub fn with_day_clamped(&self, day: u32) -> Self {
        let last = self.end_of_month().day();
        Self::from_ymd(self.year(), self.month(), day.clamp(1, last)).unwrap_or(*self)
    }

    pub fn is_same_day(&self, other: &DateKey) -> bool {
        self == other
    }

    pub fn is_same_month(&self, other: &DateKey) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    pub fn is_today(&self) -> bool {
        *self == Self::today()
    }

    /// Human label: `Hoy`, `Ayer`, or a short weekday/day/month string.
    pub fn label(&self) -> String {
        self.label_relative_to(Self::today())
    }

    /// Same as [`DateKey::label`] with an explicit "today".
    pub fn label_relative_to(&self, today: DateKey) -> String {
        if *self == today {
            "Hoy".to_string()
        } else if *self == today.add_days(-1) {
            "Ayer".to_string()
        } else {
            self.format_localized("%a, %-d %b")
        }
    }

    /// Format with a strftime pattern in the label locale.
    pub fn format_localized(&self, pattern: &str) -> String {
        self.0.format_localized(pattern, LABEL_LOCALE).to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
