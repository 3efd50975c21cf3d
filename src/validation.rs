//! Input validation for scheduling requests.
//!
//! Runs on a folded [`Enrollment`] before any allocation. Detects:
//! - Duplicate register numbers (warning, first occurrence kept)
//! - Cohorts below the minimum size (error on `register_numbers`)
//! - Missing exam dates (error on `dates`)
//! - Fewer dates than the cohort needs (warning)
//!
//! Every check runs; nothing stops at the first problem, so a caller can
//! fix everything in one round trip.

use crate::config::EngineConfig;
use crate::enrollment::Enrollment;
use crate::error::{FieldError, Result, ScheduleError};
use crate::requirements::required_days;

/// Errors and warnings collected by [`validate_enrollment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Blocking problems.
    pub errors: Vec<FieldError>,
    /// Non-blocking notices.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Splits the report: warnings go to `warnings`, errors become a
    /// [`ScheduleError::ValidationFailure`].
    pub fn into_result(self, warnings: &mut Vec<String>) -> Result<()> {
        warnings.extend(self.warnings);
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::ValidationFailure(self.errors))
        }
    }
}

/// Validates a folded enrollment against the engine configuration.
///
/// Checks:
/// 1. Repeated register numbers (warning naming the count)
/// 2. Unique students ≥ `min_cohort_size`
/// 3. At least one exam date
/// 4. Date count ≥ required days at `daily_capacity` (warning)
pub fn validate_enrollment(enrollment: &Enrollment, config: &EngineConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    let duplicates = enrollment.duplicates();
    if !duplicates.is_empty() {
        let mut names: Vec<&str> = Vec::new();
        for d in duplicates {
            if !names.contains(&d.as_str()) {
                names.push(d);
            }
        }
        report.warnings.push(format!(
            "Duplicate register numbers found: {} repeated entr{} ignored ({})",
            duplicates.len(),
            if duplicates.len() == 1 { "y" } else { "ies" },
            names.join(", ")
        ));
    }

    let students = enrollment.student_count();
    if students < config.min_cohort_size {
        report.errors.push(FieldError::new(
            "register_numbers",
            format!(
                "At least {} unique students are required, found {students}",
                config.min_cohort_size
            ),
        ));
    }

    let dates = enrollment.date_count();
    if dates == 0 {
        report
            .errors
            .push(FieldError::new("dates", "No exam dates provided"));
    }

    if dates > 0 {
        if let Ok(required) = required_days(students, config.daily_capacity) {
            if dates < required {
                report.warnings.push(format!(
                    "{students} students need {required} exam date(s) at {} per day, but only {dates} provided",
                    config.daily_capacity
                ));
            }
        }
    }

    report
}
