//! Request/response contracts.
//!
//! Mirrors the JSON bodies of the schedule service: `generate`,
//! `validate`, `auto-select-dates` and `calculate-requirements`. Dates
//! arrive as raw strings so malformed values can be reported as
//! `InvalidInput` rather than failing deserialization.

use serde::{Deserialize, Serialize};

use crate::enrollment::{DatePlan, Enrollment};
use crate::error::{FieldError, Result, ScheduleError};
use crate::models::{ExamDate, ExamDay, ExamMetadata, Examiner, Semester, StudentGroup};

/// A date entry as sent by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDateInput {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub register_numbers: Vec<String>,
}

/// Body of `POST /schedule/generate` and `POST /schedule/validate`.
///
/// Students come from one of three sources, checked in order:
/// `exam_dates` entries with register numbers, the `semesters` tree,
/// then the flat `register_numbers` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRequest {
    pub exam_metadata: Option<ExamMetadata>,
    pub register_numbers: Vec<String>,
    pub semesters: Vec<Semester>,
    pub dates: Vec<String>,
    pub exam_dates: Vec<ExamDateInput>,
    pub labs: Vec<String>,
    pub internal_examiners: Vec<Examiner>,
    pub external_examiners: Vec<Examiner>,
}

/// Generic envelope for schedule operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Body of `POST /schedule/auto-select-dates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSelectDatesRequest {
    #[serde(default)]
    pub available_dates: Vec<String>,
    pub student_count: i64,
    #[serde(default = "default_min_gap_days")]
    pub min_gap_days: i64,
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// Counts echoed back by auto-select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    pub total_students: i64,
    pub days_needed: usize,
    pub days_selected: usize,
    pub min_gap_requested: i64,
}

/// Response of `POST /schedule/auto-select-dates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSelectDatesResponse {
    pub success: bool,
    pub selected_dates: Vec<ExamDay>,
    pub exam_dates: Vec<ExamDate>,
    pub required_days: usize,
    pub available_days: usize,
    pub students_per_day: usize,
    pub message: String,
    pub schedule_info: ScheduleInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /schedule/calculate-requirements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateRequirementsRequest {
    pub student_count: i64,
    #[serde(default)]
    pub available_dates: i64,
}

fn default_min_gap_days() -> i64 {
    1
}

impl ScheduleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: ExamMetadata) -> Self {
        self.exam_metadata = Some(metadata);
        self
    }

    pub fn with_register_numbers<I, S>(mut self, register_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register_numbers
            .extend(register_numbers.into_iter().map(Into::into));
        self
    }

    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semesters.push(semester);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.dates.push(date.into());
        self
    }

    pub fn with_exam_date(mut self, exam_date: ExamDateInput) -> Self {
        self.exam_dates.push(exam_date);
        self
    }

    pub fn with_lab(mut self, lab: impl Into<String>) -> Self {
        self.labs.push(lab.into());
        self
    }

    pub fn with_internal_examiner(mut self, examiner: Examiner) -> Self {
        self.internal_examiners.push(examiner);
        self
    }

    pub fn with_external_examiner(mut self, examiner: Examiner) -> Self {
        self.external_examiners.push(examiner);
        self
    }

    /// Whether students were assigned to dates by the caller.
    pub fn is_per_date(&self) -> bool {
        self.exam_dates
            .iter()
            .any(|d| d.register_numbers.iter().any(|r| !r.trim().is_empty()))
    }

    /// Folds the request's student and date inputs into an [`Enrollment`].
    ///
    /// Fails with `InvalidInput` on field `dates` listing every date that
    /// is not `DD-MM-YY`.
    pub fn to_enrollment(&self) -> Result<Enrollment> {
        let plans = self.date_plans()?;
        if self.is_per_date() {
            return Ok(Enrollment::from_date_plans(plans));
        }

        let has_tree = self
            .semesters
            .iter()
            .any(|s| s.batches.iter().any(|b| !b.register_numbers.is_empty()));
        let groups = if has_tree {
            self.semesters
                .iter()
                .flat_map(|s| s.batches.iter().map(move |b| StudentGroup::from_batch(s, b)))
                .collect()
        } else {
            vec![StudentGroup::unlabelled(self.register_numbers.iter().cloned())]
        };
        // Cohort mode ignores any per-date lists; they are all empty here.
        let plans = plans
            .into_iter()
            .map(|p| DatePlan::new(p.date).with_subject(p.subject))
            .collect();
        Ok(Enrollment::from_cohort(groups, plans))
    }

    fn date_plans(&self) -> Result<Vec<DatePlan>> {
        let inputs: Vec<ExamDateInput> = if self.exam_dates.is_empty() {
            self.dates
                .iter()
                .map(|d| ExamDateInput {
                    date: d.clone(),
                    ..Default::default()
                })
                .collect()
        } else {
            self.exam_dates.clone()
        };

        let mut plans = Vec::with_capacity(inputs.len());
        let mut invalid = Vec::new();
        for input in inputs {
            if input.date.trim().is_empty() {
                continue;
            }
            match input.date.parse::<ExamDay>() {
                Ok(date) => {
                    let subject = input
                        .subject
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty());
                    plans.push(
                        DatePlan::new(date)
                            .with_subject(subject)
                            .with_group(StudentGroup::unlabelled(input.register_numbers)),
                    );
                }
                Err(_) => invalid.push(format!("'{}'", input.date)),
            }
        }

        if invalid.is_empty() {
            Ok(plans)
        } else {
            Err(ScheduleError::invalid_input(
                "dates",
                format!("expected DD-MM-YY, got {}", invalid.join(", ")),
            ))
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
            warnings,
        }
    }

    pub fn failed(error: &ScheduleError, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors: error.field_errors(),
            warnings,
        }
    }
}

impl AutoSelectDatesRequest {
    pub fn new<I, S>(available_dates: I, student_count: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_dates: available_dates.into_iter().map(Into::into).collect(),
            student_count,
            min_gap_days: default_min_gap_days(),
            subjects: Vec::new(),
        }
    }

    pub fn with_min_gap_days(mut self, min_gap_days: i64) -> Self {
        self.min_gap_days = min_gap_days;
        self
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Parsed candidate days; every malformed value is listed in the error.
    pub fn candidate_days(&self) -> Result<Vec<ExamDay>> {
        let mut days = Vec::with_capacity(self.available_dates.len());
        let mut invalid = Vec::new();
        for raw in &self.available_dates {
            match raw.parse::<ExamDay>() {
                Ok(day) => days.push(day),
                Err(_) => invalid.push(format!("'{raw}'")),
            }
        }
        if invalid.is_empty() {
            Ok(days)
        } else {
            Err(ScheduleError::invalid_input(
                "available_dates",
                format!("expected DD-MM-YY, got {}", invalid.join(", ")),
            ))
        }
    }
}

impl AutoSelectDatesResponse {
    /// A failure before selection could run (bad dates, counts or gap).
    pub fn rejected(request: &AutoSelectDatesRequest, error: &ScheduleError) -> Self {
        let message = error.to_string();
        Self {
            success: false,
            message: message.clone(),
            schedule_info: ScheduleInfo {
                total_students: request.student_count,
                min_gap_requested: request.min_gap_days,
                ..Default::default()
            },
            error: Some(message),
            ..Default::default()
        }
    }
}

/// Converts a wire count to `usize`, rejecting values below one.
pub(crate) fn positive_count(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            ScheduleError::invalid_input(field, format!("must be greater than zero, got {value}"))
        })
}
