//! Schedule (solution) model.
//!
//! A schedule is an ordered list of (date, lab) entries. Each entry holds
//! the time slots seated in that lab on that day and the examiners
//! assigned to it.

use serde::{Deserialize, Serialize};

use super::{ExamDay, Examiner, ExaminerRosters};

/// Free-text exam metadata. Every field is optional and passed through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
}

/// A calendar day with its optional subject and assigned students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDate {
    pub date: ExamDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub register_numbers: Vec<String>,
}

/// One seating slot inside a lab on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Display label, e.g. `09:00 AM - 12:00 PM`.
    pub time: String,
    /// Session tag, e.g. `morning`.
    pub session: String,
    /// Maximum number of students.
    pub capacity: usize,
    /// Seated register numbers in seating order.
    #[serde(default)]
    pub register_numbers: Vec<String>,
}

/// All slots of one lab on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabSchedule {
    pub date: ExamDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub lab: String,
    pub slots: Vec<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_examiner: Option<Examiner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_examiner: Option<Examiner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}

/// The assembled schedule returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub exam_metadata: ExamMetadata,
    /// Only examiners that were actually assigned, in first-use order.
    pub examiners: ExaminerRosters,
    pub schedule: Vec<LabSchedule>,
}

impl ExamDate {
    pub fn new(date: ExamDay) -> Self {
        Self {
            date,
            subject: None,
            register_numbers: Vec::new(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl TimeSlot {
    /// Creates an empty slot.
    pub fn new(time: impl Into<String>, session: impl Into<String>, capacity: usize) -> Self {
        Self {
            time: time.into(),
            session: session.into(),
            capacity,
            register_numbers: Vec::new(),
        }
    }

    /// Seats still free.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.register_numbers.len())
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.register_numbers.is_empty()
    }
}

impl LabSchedule {
    /// Creates an entry with no slots and no examiners.
    pub fn new(date: ExamDay, lab: impl Into<String>) -> Self {
        Self {
            date,
            subject: None,
            lab: lab.into(),
            slots: Vec::new(),
            internal_examiner: None,
            external_examiner: None,
            semester: None,
            batch: None,
        }
    }

    pub fn with_subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject;
        self
    }

    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Students seated across all slots.
    pub fn student_count(&self) -> usize {
        self.slots.iter().map(|s| s.register_numbers.len()).sum()
    }

    /// Register numbers in slot order.
    pub fn register_numbers(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .flat_map(|s| s.register_numbers.iter().map(String::as_str))
    }

    /// Ids of the examiners assigned to this entry.
    pub fn examiner_ids(&self) -> impl Iterator<Item = &str> {
        self.internal_examiner
            .iter()
            .chain(self.external_examiner.iter())
            .map(|e| e.id.as_str())
    }
}

impl ScheduleResponse {
    /// Total seated students.
    pub fn student_count(&self) -> usize {
        self.schedule.iter().map(LabSchedule::student_count).sum()
    }

    /// Distinct dates in schedule order.
    pub fn dates(&self) -> Vec<ExamDay> {
        let mut dates: Vec<ExamDay> = Vec::new();
        for entry in &self.schedule {
            if dates.last() != Some(&entry.date) {
                dates.push(entry.date);
            }
        }
        dates
    }

    /// Entries for a given date.
    pub fn entries_for_date(&self, date: ExamDay) -> Vec<&LabSchedule> {
        self.schedule.iter().filter(|e| e.date == date).collect()
    }

    /// The entry seating a given register number.
    pub fn entry_for_student(&self, register_number: &str) -> Option<&LabSchedule> {
        self.schedule
            .iter()
            .find(|e| e.register_numbers().any(|r| r == register_number))
    }
}
