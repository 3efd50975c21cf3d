//! Canonical per-date student assignment.
//!
//! Callers describe "who sits on which day" in three ways: a flat register
//! list, a semester/batch tree, or an explicit per-date mapping. All three
//! are folded into an [`Enrollment`] here, so the allocator only ever sees
//! one shape: an ordered list of [`DatePlan`]s.
//!
//! Folding also enforces register-number uniqueness. The first occurrence
//! of a register number wins; later repeats are dropped and reported.

use std::collections::HashSet;
use std::mem;

use crate::models::{ExamDay, StudentGroup};

/// Students bound to one exam day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePlan {
    pub date: ExamDay,
    pub subject: Option<String>,
    /// Groups in seating order.
    pub groups: Vec<StudentGroup>,
}

impl DatePlan {
    pub fn new(date: ExamDay) -> Self {
        Self {
            date,
            subject: None,
            groups: Vec::new(),
        }
    }

    pub fn with_subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject;
        self
    }

    pub fn with_group(mut self, group: StudentGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn student_count(&self) -> usize {
        self.groups.iter().map(StudentGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(StudentGroup::is_empty)
    }
}

/// Normalized, duplicate-free student input for one scheduling request.
#[derive(Debug, Clone, Default)]
pub struct Enrollment {
    /// Unique days, chronological.
    dates: Vec<DatePlan>,
    /// Whole-cohort groups still to be spread across `dates`.
    /// `None` when students were assigned per date.
    cohort: Option<Vec<StudentGroup>>,
    /// Every dropped repeat, in input order.
    duplicates: Vec<String>,
    /// Non-fatal adjustments made while folding (merged dates).
    notices: Vec<String>,
}

impl Enrollment {
    /// A cohort to spread across `dates`. Any groups already on the
    /// plans are kept ahead of the cohort.
    pub fn from_cohort(groups: Vec<StudentGroup>, dates: Vec<DatePlan>) -> Self {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        let cohort = dedupe_groups(groups, &mut seen, &mut duplicates);
        let (dates, notices) = fold_dates(dates, &mut seen, &mut duplicates);
        Self {
            dates,
            cohort: Some(cohort),
            duplicates,
            notices,
        }
    }

    /// Students already bound to their days.
    pub fn from_date_plans(plans: Vec<DatePlan>) -> Self {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        let (dates, notices) = fold_dates(plans, &mut seen, &mut duplicates);
        Self {
            dates,
            cohort: None,
            duplicates,
            notices,
        }
    }

    pub fn is_per_date(&self) -> bool {
        self.cohort.is_none()
    }

    /// Unique students across the whole input.
    pub fn student_count(&self) -> usize {
        let planned: usize = self.dates.iter().map(DatePlan::student_count).sum();
        let cohort: usize = self
            .cohort
            .iter()
            .flatten()
            .map(StudentGroup::len)
            .sum();
        planned + cohort
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    pub fn dates(&self) -> impl Iterator<Item = ExamDay> + '_ {
        self.dates.iter().map(|p| p.date)
    }

    /// Every repeated register number that was dropped.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Binds every student to a day.
    ///
    /// Per-date input is returned as is. A cohort is cut into contiguous
    /// slices in input order: each day is filled up to `day_capacity`
    /// before the next one starts, and a group is only split when it does
    /// not fit in what is left of the day. Students beyond the last day's
    /// capacity stay on the last day; the allocator rejects that day.
    pub fn into_day_plans(self, day_capacity: usize) -> Vec<DatePlan> {
        let mut plans = self.dates;
        let Some(cohort) = self.cohort else {
            return plans;
        };
        let Some(last) = plans.len().checked_sub(1) else {
            return plans;
        };

        let mut idx = 0;
        let mut room = day_capacity.saturating_sub(plans[0].student_count());
        for mut group in cohort {
            while !group.is_empty() {
                if room == 0 && idx < last {
                    idx += 1;
                    room = day_capacity.saturating_sub(plans[idx].student_count());
                    continue;
                }
                let take = if idx == last {
                    group.len()
                } else {
                    room.min(group.len())
                };
                let mut chunk = group.empty_like();
                chunk.register_numbers = group.register_numbers.drain(..take).collect();
                room = room.saturating_sub(take);
                plans[idx].groups.push(chunk);
            }
        }
        plans
    }
}

/// Trims register numbers, drops blanks and repeats, drops emptied groups.
fn dedupe_groups(
    groups: Vec<StudentGroup>,
    seen: &mut HashSet<String>,
    duplicates: &mut Vec<String>,
) -> Vec<StudentGroup> {
    groups
        .into_iter()
        .filter_map(|mut group| {
            let register_numbers = mem::take(&mut group.register_numbers);
            for raw in register_numbers {
                let reg = raw.trim();
                if reg.is_empty() {
                    continue;
                }
                if seen.insert(reg.to_string()) {
                    group.register_numbers.push(reg.to_string());
                } else {
                    duplicates.push(reg.to_string());
                }
            }
            (!group.is_empty()).then_some(group)
        })
        .collect()
}

/// Dedupes students in input order, then sorts days and merges repeats.
fn fold_dates(
    plans: Vec<DatePlan>,
    seen: &mut HashSet<String>,
    duplicates: &mut Vec<String>,
) -> (Vec<DatePlan>, Vec<String>) {
    let mut plans: Vec<DatePlan> = plans
        .into_iter()
        .map(|mut plan| {
            plan.groups = dedupe_groups(mem::take(&mut plan.groups), seen, duplicates);
            plan
        })
        .collect();
    plans.sort_by_key(|p| p.date);

    let mut notices = Vec::new();
    let mut folded: Vec<DatePlan> = Vec::with_capacity(plans.len());
    for plan in plans {
        match folded.last_mut() {
            Some(prev) if prev.date == plan.date => {
                notices.push(format!(
                    "Date {} was listed more than once; entries were merged",
                    plan.date
                ));
                if prev.subject.is_none() {
                    prev.subject = plan.subject;
                }
                prev.groups.extend(plan.groups);
            }
            _ => folded.push(plan),
        }
    }
    (folded, notices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> ExamDay {
        s.parse().unwrap()
    }

    fn regs(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{prefix}{i:03}")).collect()
    }

    fn labelled(batch: &str, students: Vec<String>) -> StudentGroup {
        StudentGroup {
            semester: Some("S5".into()),
            batch: Some(batch.into()),
            register_numbers: students,
        }
    }

    #[test]
    fn test_cohort_duplicates_first_wins() {
        let e = Enrollment::from_cohort(
            vec![StudentGroup::unlabelled([
                "21CS001", " 21CS002 ", "21CS001", "", "21CS003",
            ])],
            vec![DatePlan::new(day("01-01-24"))],
        );
        assert_eq!(e.student_count(), 3);
        assert_eq!(e.duplicates(), &["21CS001".to_string()]);
        assert!(!e.is_per_date());

        let plans = e.into_day_plans(125);
        assert_eq!(
            plans[0].groups[0].register_numbers,
            vec!["21CS001", "21CS002", "21CS003"]
        );
    }

    #[test]
    fn test_per_date_duplicates_across_dates() {
        let e = Enrollment::from_date_plans(vec![
            DatePlan::new(day("02-01-24")).with_group(StudentGroup::unlabelled(["A", "B"])),
            DatePlan::new(day("01-01-24")).with_group(StudentGroup::unlabelled(["C", "A"])),
        ]);
        // Input order decides the winner, not date order.
        assert_eq!(e.duplicates(), &["A".to_string()]);
        let plans = e.into_day_plans(125);
        assert_eq!(plans[0].date, day("01-01-24"));
        assert_eq!(plans[0].groups[0].register_numbers, vec!["C"]);
        assert_eq!(plans[1].groups[0].register_numbers, vec!["A", "B"]);
    }

    #[test]
    fn test_repeated_dates_are_merged() {
        let e = Enrollment::from_date_plans(vec![
            DatePlan::new(day("01-01-24")).with_group(StudentGroup::unlabelled(["A"])),
            DatePlan::new(day("01-01-24"))
                .with_subject(Some("Networks Lab".into()))
                .with_group(StudentGroup::unlabelled(["B"])),
        ]);
        assert_eq!(e.date_count(), 1);
        assert_eq!(e.notices().len(), 1);
        let plans = e.into_day_plans(125);
        assert_eq!(plans[0].subject.as_deref(), Some("Networks Lab"));
        assert_eq!(plans[0].student_count(), 2);
    }

    #[test]
    fn test_cohort_spread_fills_days_in_order() {
        let e = Enrollment::from_cohort(
            vec![StudentGroup::unlabelled(regs("R", 130))],
            vec![
                DatePlan::new(day("03-01-24")),
                DatePlan::new(day("01-01-24")),
            ],
        );
        let plans = e.into_day_plans(125);
        assert_eq!(plans[0].date, day("01-01-24"));
        assert_eq!(plans[0].student_count(), 125);
        assert_eq!(plans[1].student_count(), 5);
        assert_eq!(plans[1].groups[0].register_numbers[0], "R126");
    }

    #[test]
    fn test_batch_split_only_at_day_boundary() {
        let e = Enrollment::from_cohort(
            vec![
                labelled("A", regs("A", 100)),
                labelled("B", regs("B", 40)),
            ],
            vec![
                DatePlan::new(day("01-01-24")),
                DatePlan::new(day("02-01-24")),
            ],
        );
        let plans = e.into_day_plans(125);
        assert_eq!(plans[0].groups.len(), 2);
        assert_eq!(plans[0].groups[1].batch.as_deref(), Some("B"));
        assert_eq!(plans[0].groups[1].len(), 25);
        assert_eq!(plans[1].groups[0].batch.as_deref(), Some("B"));
        assert_eq!(plans[1].groups[0].len(), 15);
    }

    #[test]
    fn test_overflow_stays_on_last_day() {
        let e = Enrollment::from_cohort(
            vec![StudentGroup::unlabelled(regs("R", 300))],
            vec![
                DatePlan::new(day("01-01-24")),
                DatePlan::new(day("02-01-24")),
            ],
        );
        let plans = e.into_day_plans(125);
        assert_eq!(plans[0].student_count(), 125);
        assert_eq!(plans[1].student_count(), 175);
    }

    #[test]
    fn test_no_dates_keeps_nothing() {
        let e = Enrollment::from_cohort(vec![StudentGroup::unlabelled(regs("R", 30))], vec![]);
        assert_eq!(e.student_count(), 30);
        assert!(e.into_day_plans(125).is_empty());
    }
}
