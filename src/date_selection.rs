//! Exam date selection.
//!
//! # Algorithm
//!
//! 1. Sort candidate days chronologically and drop repeats.
//! 2. Walk the sorted list, taking a day when it lies at least
//!    `min_gap_days` after the most recently taken day.
//! 3. Stop once `days_needed` days are taken or candidates run out.
//!
//! Greedy-earliest: deterministic, and exams start as soon as the
//! candidates allow.
//!
//! # Complexity
//! O(d log d) for d candidate days.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_DAILY_CAPACITY;
use crate::error::{Result, ScheduleError};
use crate::models::ExamDay;

/// Outcome of a selection run. Never an error when candidates are short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    pub success: bool,
    /// Chosen days, chronological.
    pub selected_dates: Vec<ExamDay>,
    pub days_needed: usize,
    pub days_selected: usize,
    /// Unique candidate days considered.
    pub available_days: usize,
    pub students_per_day: usize,
    pub message: String,
}

/// Greedy earliest-first date selector with a minimum gap.
#[derive(Debug, Clone)]
pub struct DateSelector {
    min_gap_days: i64,
    students_per_day: usize,
}

impl DateSelector {
    /// Creates a selector. `min_gap_days` must be at least 1
    /// (1 allows consecutive days).
    pub fn new(min_gap_days: i64) -> Result<Self> {
        if min_gap_days < 1 {
            return Err(ScheduleError::invalid_input(
                "min_gap_days",
                format!("must be at least 1, got {min_gap_days}"),
            ));
        }
        Ok(Self {
            min_gap_days,
            students_per_day: DEFAULT_DAILY_CAPACITY,
        })
    }

    /// Sets the per-day capacity reported in results.
    pub fn with_students_per_day(mut self, students_per_day: usize) -> Self {
        self.students_per_day = students_per_day;
        self
    }

    pub fn min_gap_days(&self) -> i64 {
        self.min_gap_days
    }

    /// Selects `days_needed` days from `candidates`.
    pub fn select(&self, candidates: &[ExamDay], days_needed: usize) -> DateSelection {
        let mut sorted = candidates.to_vec();
        sorted.sort();
        sorted.dedup();
        let available_days = sorted.len();

        let mut selected: Vec<ExamDay> = Vec::with_capacity(days_needed.min(available_days));
        for day in sorted {
            if selected.len() >= days_needed {
                break;
            }
            let fits = match selected.last() {
                None => true,
                Some(last) => day.days_since(last) >= self.min_gap_days,
            };
            if fits {
                selected.push(day);
            }
        }

        let days_selected = selected.len();
        let success = days_selected >= days_needed;
        let message = self.message(available_days, days_needed, days_selected, success);

        debug!(
            available_days,
            days_needed,
            days_selected,
            min_gap_days = self.min_gap_days,
            success,
            "date selection finished"
        );

        DateSelection {
            success,
            selected_dates: selected,
            days_needed,
            days_selected,
            available_days,
            students_per_day: self.students_per_day,
            message,
        }
    }

    fn message(
        &self,
        available_days: usize,
        days_needed: usize,
        days_selected: usize,
        success: bool,
    ) -> String {
        if available_days == 0 {
            return format!(
                "No available dates provided; {days_needed} exam date(s) required"
            );
        }
        if success {
            return format!(
                "Selected {days_selected} of {available_days} available date(s) with a minimum gap of {} day(s)",
                self.min_gap_days
            );
        }
        format!(
            "Only {days_selected} of {available_days} available date(s) satisfy a minimum gap of {} day(s); \
             {days_needed} required. Add {} more available date(s) or reduce the gap",
            self.min_gap_days,
            days_needed - days_selected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(list: &[&str]) -> Vec<ExamDay> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_gap_skips_close_dates() {
        let selector = DateSelector::new(3).unwrap();
        let result = selector.select(&days(&["01-01-24", "02-01-24", "05-01-24"]), 2);
        assert!(result.success);
        assert_eq!(result.selected_dates, days(&["01-01-24", "05-01-24"]));
        assert_eq!(result.days_selected, 2);
    }

    #[test]
    fn test_unsorted_candidates_are_sorted() {
        let selector = DateSelector::new(1).unwrap();
        let result = selector.select(&days(&["10-01-24", "02-01-24", "05-01-24"]), 2);
        assert_eq!(result.selected_dates, days(&["02-01-24", "05-01-24"]));
    }

    #[test]
    fn test_consecutive_allowed_with_gap_one() {
        let selector = DateSelector::new(1).unwrap();
        let result = selector.select(&days(&["01-01-24", "02-01-24", "03-01-24"]), 3);
        assert!(result.success);
        assert_eq!(result.days_selected, 3);
    }

    #[test]
    fn test_insufficient_candidates_is_not_an_error() {
        let selector = DateSelector::new(2).unwrap();
        let result = selector.select(&days(&["01-01-24", "02-01-24"]), 2);
        assert!(!result.success);
        assert_eq!(result.days_selected, 1);
        assert!(result.days_selected < result.days_needed);
        assert!(result.message.contains("Add 1 more"));
    }

    #[test]
    fn test_no_candidates() {
        let selector = DateSelector::new(1).unwrap();
        let result = selector.select(&[], 1);
        assert!(!result.success);
        assert!(result.selected_dates.is_empty());
        assert!(result.message.contains("No available dates"));
    }

    #[test]
    fn test_single_day_ignores_gap() {
        let selector = DateSelector::new(30).unwrap();
        let result = selector.select(&days(&["15-03-24"]), 1);
        assert!(result.success);
        assert_eq!(result.selected_dates, days(&["15-03-24"]));
    }

    #[test]
    fn test_duplicate_candidates_counted_once() {
        let selector = DateSelector::new(1).unwrap();
        let result = selector.select(&days(&["01-01-24", "01-01-24"]), 2);
        assert!(!result.success);
        assert_eq!(result.available_days, 1);
        assert_eq!(result.days_selected, 1);
    }

    #[test]
    fn test_stops_at_required_count() {
        let selector = DateSelector::new(1).unwrap();
        let result = selector.select(&days(&["01-01-24", "02-01-24", "03-01-24"]), 2);
        assert_eq!(result.selected_dates, days(&["01-01-24", "02-01-24"]));
    }

    #[test]
    fn test_invalid_gap() {
        assert!(DateSelector::new(0).is_err());
        assert!(DateSelector::new(-2).is_err());
    }
}
