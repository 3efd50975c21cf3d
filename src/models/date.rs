//! Exam day model.
//!
//! An exam day is a plain calendar date. On the wire it is always written
//! as `DD-MM-YY` (two-digit year), and ordering is chronological rather
//! than lexicographic on that string.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Wire format for dates (`DD-MM-YY`).
pub const DATE_FORMAT: &str = "%d-%m-%y";

/// A calendar day on which exams may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExamDay(NaiveDate);

impl ExamDay {
    /// Wraps a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a day from year, month and day. `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying calendar date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Whole days from `earlier` to `self` (negative if `self` comes first).
    #[inline]
    pub fn days_since(&self, earlier: &ExamDay) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// The following calendar day, if representable.
    pub fn next(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl FromStr for ExamDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| {
                ScheduleError::invalid_input("dates", format!("'{s}' is not a DD-MM-YY date"))
            })
    }
}

impl fmt::Display for ExamDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl From<NaiveDate> for ExamDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for ExamDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExamDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> ExamDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let d = day("05-01-24");
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(d.to_string(), "05-01-24");
        assert_eq!(day(" 31-12-25 ").to_string(), "31-12-25");
    }

    #[test]
    fn test_rejects_other_formats() {
        assert!("2024-01-05".parse::<ExamDay>().is_err());
        assert!("31-02-24".parse::<ExamDay>().is_err());
        assert!("".parse::<ExamDay>().is_err());

        let err = "tomorrow".parse::<ExamDay>().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput { ref field, .. } if field == "dates"));
    }

    #[test]
    fn test_chronological_ordering() {
        // Lexicographic order on the string would put 02-01-24 before 10-12-23.
        let mut days = vec![day("02-01-24"), day("10-12-23"), day("01-01-24")];
        days.sort();
        let rendered: Vec<String> = days.iter().map(|d| d.to_string()).collect();
        assert_eq!(rendered, vec!["10-12-23", "01-01-24", "02-01-24"]);
    }

    #[test]
    fn test_days_since() {
        assert_eq!(day("05-01-24").days_since(&day("01-01-24")), 4);
        assert_eq!(day("01-01-24").days_since(&day("05-01-24")), -4);
        assert_eq!(day("01-03-24").days_since(&day("28-02-24")), 2); // leap year
    }

    #[test]
    fn test_next_day() {
        assert_eq!(day("31-12-24").next(), Some(day("01-01-25")));
    }
}
