//! Calendar date value object.
//!
//! Completions attach to a day, not an instant: `CalendarDate` is a
//! `YYYY-MM-DD` value with no time component or timezone. The engine never
//! reads the clock to obtain one; callers supply "today" explicitly.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::HabitError;

/// A calendar date at local-day granularity, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from year, month, and day.
    ///
    /// # Errors
    ///
    /// `Validation` if the components do not form a real calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, HabitError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                HabitError::validation(
                    "date",
                    format!("{year:04}-{month:02}-{day:02} is not a valid date"),
                )
            })
    }

    /// Creates a date from a NaiveDate.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the inner NaiveDate.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the Monday of the ISO week containing this date.
    pub fn week_start(&self) -> Self {
        let days_from_monday = self.0.weekday().num_days_from_monday() as i64;
        Self(self.0 - Duration::days(days_from_monday))
    }

    /// Returns the first day of the month containing this date.
    pub fn month_start(&self) -> Self {
        Self(self.0.with_day(1).unwrap())
    }

    /// Checks membership in the inclusive window `[start, end]`.
    pub fn is_within(&self, start: CalendarDate, end: CalendarDate) -> bool {
        *self >= start && *self <= end
    }

    /// Returns the previous calendar day.
    pub fn pred(&self) -> Self {
        Self(self.0.pred_opt().unwrap_or(self.0))
    }

    /// Returns the next calendar day.
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| HabitError::validation("date", format!("'{s}' is not YYYY-MM-DD")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays_iso_form() {
        let d = date("2024-01-05");
        assert_eq!(d.to_string(), "2024-01-05");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("2024-13-01".parse::<CalendarDate>().is_err());
        assert!("01/05/2024".parse::<CalendarDate>().is_err());
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn week_start_is_iso_monday() {
        // 2024-01-05 is a Friday; the ISO week starts Monday 2024-01-01.
        assert_eq!(date("2024-01-05").week_start(), date("2024-01-01"));
        // A Monday is its own week start.
        assert_eq!(date("2024-01-01").week_start(), date("2024-01-01"));
        // A Sunday belongs to the week of the preceding Monday.
        assert_eq!(date("2024-01-07").week_start(), date("2024-01-01"));
    }

    #[test]
    fn week_start_crosses_month_boundary() {
        // 2024-03-01 is a Friday; its ISO Monday is 2024-02-26.
        assert_eq!(date("2024-03-01").week_start(), date("2024-02-26"));
    }

    #[test]
    fn month_start_is_first_of_month() {
        assert_eq!(date("2024-02-29").month_start(), date("2024-02-01"));
        assert_eq!(date("2024-12-01").month_start(), date("2024-12-01"));
    }

    #[test]
    fn window_membership_is_inclusive() {
        let start = date("2024-01-01");
        let end = date("2024-01-07");
        assert!(date("2024-01-01").is_within(start, end));
        assert!(date("2024-01-07").is_within(start, end));
        assert!(date("2024-01-03").is_within(start, end));
        assert!(!date("2023-12-31").is_within(start, end));
        assert!(!date("2024-01-08").is_within(start, end));
    }

    #[test]
    fn serializes_as_plain_string() {
        let d = date("2024-06-15");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024-06-15\"");
    }
}
