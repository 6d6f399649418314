//! Snapshot date handling.
//!
//! Dumps are identified by a `YYYYMMDD` string. The string is used verbatim in
//! URLs and directory names, while the parsed calendar date drives the
//! pageview-complete month selection.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// Errors that can occur when parsing a dump date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Not exactly eight ASCII digits.
    #[error("invalid dump date '{0}': expected YYYYMMDD")]
    InvalidFormat(String),

    /// Eight digits that do not name a calendar day.
    #[error("invalid dump date '{0}': no such calendar day")]
    InvalidDate(String),
}

/// A validated `YYYYMMDD` dump snapshot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DumpDate(NaiveDate);

impl DumpDate {
    /// Creates a dump date from its components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The last full calendar month before this snapshot.
    ///
    /// Computed as the day before the first of the snapshot's month, so a
    /// January snapshot resolves to December of the previous year.
    pub fn previous_month(&self) -> YearMonth {
        let last_of_previous = self.0 - Days::new(u64::from(self.0.day()));
        YearMonth {
            year: last_of_previous.year(),
            month: last_of_previous.month(),
        }
    }
}

impl FromStr for DumpDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_string()));
        }

        // All eight bytes are ASCII digits, so these slices and parses hold.
        let year: i32 = s[0..4]
            .parse()
            .map_err(|_| DateError::InvalidFormat(s.to_string()))?;
        let month: u32 = s[4..6]
            .parse()
            .map_err(|_| DateError::InvalidFormat(s.to_string()))?;
        let day: u32 = s[6..8]
            .parse()
            .map_err(|_| DateError::InvalidFormat(s.to_string()))?;

        Self::from_ymd(year, month, day).ok_or_else(|| DateError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for DumpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Number of days in this month.
    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

/// Number of days in the given month, leap-year aware.
///
/// Returns 0 for a month outside `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .filter(|_| (1..=12).contains(&month))
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}
