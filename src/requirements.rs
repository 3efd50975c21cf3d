//! Exam-day requirements.
//!
//! How many exam days a cohort needs at a fixed daily capacity, and
//! whether a set of available dates covers that.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Summary returned by the calculate-requirements operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub student_count: usize,
    pub daily_capacity: usize,
    pub required_days: usize,
    pub available_dates: usize,
    /// `None` when no available dates were given.
    pub dates_sufficient: Option<bool>,
    /// `None` when no available dates were given.
    pub additional_dates_needed: Option<usize>,
}

/// `ceil(student_count / daily_capacity)`.
///
/// Fails with `InvalidInput` when either argument is zero.
pub fn required_days(student_count: usize, daily_capacity: usize) -> Result<usize> {
    if student_count == 0 {
        return Err(ScheduleError::invalid_input(
            "student_count",
            "must be greater than zero",
        ));
    }
    if daily_capacity == 0 {
        return Err(ScheduleError::invalid_input(
            "daily_capacity",
            "must be greater than zero",
        ));
    }
    Ok(student_count.div_ceil(daily_capacity))
}

#[inline]
pub fn dates_sufficient(available_dates: usize, required_days: usize) -> bool {
    available_dates >= required_days
}

#[inline]
pub fn additional_dates_needed(available_dates: usize, required_days: usize) -> usize {
    required_days.saturating_sub(available_dates)
}

/// Full requirement summary for a cohort.
pub fn calculate_requirements(
    student_count: usize,
    available_dates: usize,
    daily_capacity: usize,
) -> Result<Requirements> {
    let required = required_days(student_count, daily_capacity)?;
    let (sufficient, additional) = if available_dates == 0 {
        (None, None)
    } else {
        (
            Some(dates_sufficient(available_dates, required)),
            Some(additional_dates_needed(available_dates, required)),
        )
    };

    Ok(Requirements {
        student_count,
        daily_capacity,
        required_days: required,
        available_dates,
        dates_sufficient: sufficient,
        additional_dates_needed: additional,
    })
}
