//! Request-scoped scheduling pipeline.
//!
//! `ScheduleEngine` runs the full control flow for one request:
//! requirements → (date selection) → validation → allocation → assembly.
//! It holds only immutable configuration, so one engine can serve
//! concurrent requests from any number of threads.

use tracing::{info, warn};

use crate::api::{
    positive_count, ApiResponse, AutoSelectDatesRequest, AutoSelectDatesResponse,
    CalculateRequirementsRequest, ScheduleInfo, ScheduleRequest,
};
use crate::config::EngineConfig;
use crate::date_selection::DateSelector;
use crate::enrollment::Enrollment;
use crate::error::Result;
use crate::models::{ExamDate, ScheduleResponse};
use crate::requirements::{calculate_requirements, required_days, Requirements};
use crate::scheduler::{assemble, Allocator};
use crate::validation::validate_enrollment;

/// The exam scheduling engine.
///
/// # Example
///
/// ```
/// use exam_schedule::api::ScheduleRequest;
/// use exam_schedule::engine::ScheduleEngine;
///
/// let request = ScheduleRequest::new()
///     .with_register_numbers((1..=40).map(|i| format!("21CS{i:03}")))
///     .with_date("01-01-24");
/// let response = ScheduleEngine::default().generate(&request);
/// assert!(response.success);
/// assert_eq!(response.data.unwrap().student_count(), 40);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    config: EngineConfig,
}

impl ScheduleEngine {
    /// Creates an engine, rejecting configurations that cannot seat anyone.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `POST /schedule/generate`.
    pub fn generate(&self, request: &ScheduleRequest) -> ApiResponse<ScheduleResponse> {
        let mut warnings = Vec::new();
        match self.try_generate(request, &mut warnings) {
            Ok(response) => ApiResponse::ok(response, warnings),
            Err(e) => {
                warn!(error = %e, "schedule generation failed");
                ApiResponse::failed(&e, warnings)
            }
        }
    }

    /// Generates a schedule, pushing non-fatal notices into `warnings`.
    ///
    /// Warnings gathered before a failure are kept.
    pub fn try_generate(
        &self,
        request: &ScheduleRequest,
        warnings: &mut Vec<String>,
    ) -> Result<ScheduleResponse> {
        let allocator = self.allocator(request);
        let enrollment = self.check(request, &allocator, warnings)?;
        let cohort_mode = !enrollment.is_per_date();

        let plans = enrollment.into_day_plans(allocator.day_capacity());
        if cohort_mode {
            let unused: Vec<String> = plans
                .iter()
                .filter(|p| p.is_empty())
                .map(|p| p.date.to_string())
                .collect();
            if !unused.is_empty() {
                warnings.push(format!(
                    "{} exam date(s) not needed and left unused: {}",
                    unused.len(),
                    unused.join(", ")
                ));
            }
        }

        let allocation = allocator.allocate(&plans)?;
        warnings.extend(allocation.warnings);

        let metadata = request.exam_metadata.clone().unwrap_or_default();
        let response = assemble(metadata, allocation.schedule);
        info!(
            students = response.student_count(),
            dates = response.dates().len(),
            entries = response.schedule.len(),
            warnings = warnings.len(),
            "schedule generated"
        );
        Ok(response)
    }

    /// `POST /schedule/validate`: normalization and validation only.
    pub fn validate(&self, request: &ScheduleRequest) -> ApiResponse<()> {
        let mut warnings = Vec::new();
        let allocator = self.allocator(request);
        match self.check(request, &allocator, &mut warnings) {
            Ok(_) => ApiResponse::ok((), warnings),
            Err(e) => ApiResponse::failed(&e, warnings),
        }
    }

    /// `POST /schedule/auto-select-dates`.
    pub fn auto_select_dates(&self, request: &AutoSelectDatesRequest) -> AutoSelectDatesResponse {
        match self.try_auto_select(request) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "date auto-selection rejected");
                AutoSelectDatesResponse::rejected(request, &e)
            }
        }
    }

    fn try_auto_select(&self, request: &AutoSelectDatesRequest) -> Result<AutoSelectDatesResponse> {
        let students = positive_count("student_count", request.student_count)?;
        let candidates = request.candidate_days()?;
        let selector = DateSelector::new(request.min_gap_days)?
            .with_students_per_day(self.config.daily_capacity);
        let days_needed = required_days(students, self.config.daily_capacity)?;

        let selection = selector.select(&candidates, days_needed);
        let exam_dates = selection
            .selected_dates
            .iter()
            .enumerate()
            .map(|(i, &date)| ExamDate {
                date,
                subject: request
                    .subjects
                    .get(i)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                register_numbers: Vec::new(),
            })
            .collect();

        info!(
            students,
            days_needed,
            days_selected = selection.days_selected,
            success = selection.success,
            "dates auto-selected"
        );

        Ok(AutoSelectDatesResponse {
            success: selection.success,
            exam_dates,
            required_days: selection.days_needed,
            available_days: selection.available_days,
            students_per_day: selection.students_per_day,
            schedule_info: ScheduleInfo {
                total_students: request.student_count,
                days_needed: selection.days_needed,
                days_selected: selection.days_selected,
                min_gap_requested: request.min_gap_days,
            },
            error: (!selection.success).then(|| selection.message.clone()),
            message: selection.message,
            selected_dates: selection.selected_dates,
        })
    }

    /// `POST /schedule/calculate-requirements`.
    pub fn calculate_requirements(
        &self,
        request: &CalculateRequirementsRequest,
    ) -> Result<Requirements> {
        let students = positive_count("student_count", request.student_count)?;
        let available = usize::try_from(request.available_dates).unwrap_or(0);
        calculate_requirements(students, available, self.config.daily_capacity)
    }

    fn allocator(&self, request: &ScheduleRequest) -> Allocator {
        Allocator::new(self.config.clone())
            .with_labs(request.labs.as_slice())
            .with_examiners(&request.internal_examiners, &request.external_examiners)
    }

    /// Normalizes and validates; all notices land in `warnings`.
    fn check(
        &self,
        request: &ScheduleRequest,
        allocator: &Allocator,
        warnings: &mut Vec<String>,
    ) -> Result<Enrollment> {
        let enrollment = request.to_enrollment()?;
        warnings.extend(enrollment.notices().iter().cloned());
        warnings.extend(allocator.notices().iter().cloned());
        validate_enrollment(&enrollment, &self.config).into_result(warnings)?;
        Ok(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ExamDateInput;
    use crate::error::ScheduleError;
    use crate::models::{Batch, Examiner, Semester};

    fn students(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("21CS{i:03}")).collect()
    }

    #[test]
    fn test_generate_flat_cohort_across_dates() {
        let request = ScheduleRequest::new()
            .with_register_numbers(students(130))
            .with_date("03-01-24")
            .with_date("01-01-24");
        let response = ScheduleEngine::default().generate(&request);
        assert!(response.success, "{:?}", response.errors);
        assert!(response.warnings.is_empty());

        let schedule = response.data.unwrap();
        assert_eq!(schedule.student_count(), 130);
        let dates: Vec<String> = schedule.dates().iter().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["01-01-24", "03-01-24"]);
        assert_eq!(schedule.entries_for_date("03-01-24".parse().unwrap()).len(), 1);
    }

    #[test]
    fn test_generate_warns_on_duplicates_but_succeeds() {
        let mut regs = students(30);
        regs.push("21CS001".into());
        let request = ScheduleRequest::new()
            .with_register_numbers(regs)
            .with_date("01-01-24");
        let response = ScheduleEngine::default().generate(&request);
        assert!(response.success);
        assert!(response.warnings.iter().any(|w| w.contains("Duplicate")));

        let schedule = response.data.unwrap();
        let count = schedule
            .schedule
            .iter()
            .flat_map(|e| e.register_numbers())
            .filter(|r| *r == "21CS001")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_generate_collects_all_validation_errors() {
        let request = ScheduleRequest::new().with_register_numbers(students(24));
        let response = ScheduleEngine::default().generate(&request);
        assert!(!response.success);
        assert!(response.data.is_none());
        let fields: Vec<&str> = response.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["register_numbers", "dates"]);
    }

    #[test]
    fn test_generate_overflow_names_the_date() {
        let request = ScheduleRequest::new()
            .with_register_numbers(students(300))
            .with_date("01-01-24")
            .with_date("02-01-24");
        let response = ScheduleEngine::default().generate(&request);
        assert!(!response.success);
        assert!(response.warnings.iter().any(|w| w.contains("need 3")));
        assert_eq!(response.errors[0].field, "schedule");
        assert!(response.errors[0].message.contains("02-01-24"));
    }

    #[test]
    fn test_generate_per_date_with_examiners_and_subjects() {
        let request = ScheduleRequest::new()
            .with_exam_date(ExamDateInput {
                date: "05-02-24".into(),
                subject: Some("Compiler Lab".into()),
                register_numbers: students(30),
            })
            .with_lab("CS Lab 1")
            .with_lab("CS Lab 2")
            .with_internal_examiner(Examiner::new("I1", "Dr. Iyer"))
            .with_internal_examiner(Examiner::new("I2", ""))
            .with_external_examiner(Examiner::new("X1", "Dr. Menon"));
        let response = ScheduleEngine::default().generate(&request);
        assert!(response.success);

        let schedule = response.data.unwrap();
        assert_eq!(schedule.schedule.len(), 2);
        assert_eq!(schedule.schedule[0].lab, "CS Lab 1");
        assert_eq!(schedule.schedule[0].subject.as_deref(), Some("Compiler Lab"));
        assert_eq!(schedule.examiners.internal.len(), 1);
        assert_eq!(schedule.examiners.external.len(), 1);
        // One incomplete examiner dropped, and one short roster per kind.
        assert!(response.warnings.iter().any(|w| w.contains("without id or name")));
        assert!(response.warnings.iter().any(|w| w.contains("Only 1 internal")));
    }

    #[test]
    fn test_generate_semester_tree_labels() {
        let request = ScheduleRequest::new()
            .with_semester(
                Semester::new("S5")
                    .with_batch(Batch::new("A").with_students(students(20)))
                    .with_batch(
                        Batch::new("B").with_students((1..=20).map(|i| format!("21EC{i:03}"))),
                    ),
            )
            .with_date("01-01-24");
        let schedule = ScheduleEngine::default().generate(&request).data.unwrap();
        assert_eq!(schedule.schedule.len(), 2);
        assert_eq!(schedule.schedule[0].batch.as_deref(), Some("A"));
        assert_eq!(schedule.schedule[1].batch.as_deref(), Some("B"));
    }

    #[test]
    fn test_generate_warns_about_unused_dates() {
        let request = ScheduleRequest::new()
            .with_register_numbers(students(30))
            .with_date("01-01-24")
            .with_date("02-01-24");
        let response = ScheduleEngine::default().generate(&request);
        assert!(response.success);
        assert!(response.warnings[0].contains("02-01-24"));
    }

    #[test]
    fn test_validate_only() {
        let engine = ScheduleEngine::default();
        let ok = engine.validate(
            &ScheduleRequest::new()
                .with_register_numbers(students(25))
                .with_date("01-01-24"),
        );
        assert!(ok.success);
        assert!(ok.data.is_some());

        let bad = engine.validate(&ScheduleRequest::new().with_date("not-a-date"));
        assert!(!bad.success);
        assert_eq!(bad.errors[0].field, "dates");
    }

    #[test]
    fn test_auto_select_dates() {
        let request = AutoSelectDatesRequest::new(["05-01-24", "01-01-24", "02-01-24"], 200)
            .with_min_gap_days(3)
            .with_subjects(["DBMS Lab"]);
        let response = ScheduleEngine::default().auto_select_dates(&request);
        assert!(response.success);
        let selected: Vec<String> = response.selected_dates.iter().map(|d| d.to_string()).collect();
        assert_eq!(selected, vec!["01-01-24", "05-01-24"]);
        assert_eq!(response.required_days, 2);
        assert_eq!(response.available_days, 3);
        assert_eq!(response.students_per_day, 125);
        assert_eq!(response.exam_dates[0].subject.as_deref(), Some("DBMS Lab"));
        assert_eq!(response.exam_dates[1].subject, None);
        assert_eq!(response.schedule_info.min_gap_requested, 3);
        assert!(response.error.is_none());
    }

    #[test]
    fn test_auto_select_reports_shortfall() {
        let request = AutoSelectDatesRequest::new(["01-01-24"], 300);
        let response = ScheduleEngine::default().auto_select_dates(&request);
        assert!(!response.success);
        assert_eq!(response.schedule_info.days_needed, 3);
        assert_eq!(response.schedule_info.days_selected, 1);
        assert!(response.error.unwrap().contains("Add 2 more"));
    }

    #[test]
    fn test_auto_select_rejects_bad_parameters() {
        let engine = ScheduleEngine::default();
        let zero_gap = AutoSelectDatesRequest::new(["01-01-24"], 30).with_min_gap_days(0);
        assert!(engine.auto_select_dates(&zero_gap).error.is_some());

        let no_students = AutoSelectDatesRequest::new(["01-01-24"], 0);
        let response = engine.auto_select_dates(&no_students);
        assert!(!response.success);
        assert!(response.message.contains("student_count"));
    }

    #[test]
    fn test_calculate_requirements() {
        let engine = ScheduleEngine::default();
        let r = engine
            .calculate_requirements(&CalculateRequirementsRequest {
                student_count: 126,
                available_dates: 1,
            })
            .unwrap();
        assert_eq!(r.required_days, 2);
        assert_eq!(r.dates_sufficient, Some(false));

        let err = engine
            .calculate_requirements(&CalculateRequirementsRequest {
                student_count: -1,
                available_dates: 0,
            })
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput { .. }));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(ScheduleEngine::new(EngineConfig::default().with_slot_capacity(0)).is_err());
    }
}
