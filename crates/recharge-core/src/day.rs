//! Local calendar day handling.
//!
//! Every day-boundary computation in the crate (rollover, history keys,
//! streak diffs, weekday derivation) goes through [`LocalDay`]. The day is
//! always derived from local wall-clock components, never from a UTC ISO
//! string slice -- slicing a UTC timestamp is off by one day near midnight
//! in timezones ahead of UTC.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A calendar day in the user's local timezone, serialized as `YYYY-MM-DD`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LocalDay(NaiveDate);

impl LocalDay {
    /// Today according to the local wall clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Wrap an already-local calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day components. Returns `None` for dates that
    /// don't exist (e.g. Feb 30).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::InvalidDay(s.to_string()))
    }

    /// Signed number of calendar days from `self` to `other`.
    ///
    /// Positive when `other` is later, zero for the same day, negative when
    /// `other` is earlier (device clock moved backwards).
    pub fn days_until(&self, other: LocalDay) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Day of week for this calendar day.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// The following calendar day.
    pub fn next(&self) -> Self {
        Self(self.0.succ_opt().expect("date overflow"))
    }

    /// The previous calendar day.
    pub fn prev(&self) -> Self {
        Self(self.0.pred_opt().expect("date underflow"))
    }

    /// Underlying naive date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for LocalDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for LocalDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
