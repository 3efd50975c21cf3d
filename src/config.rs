//! Engine configuration.
//!
//! Capacities and the per-lab slot layout are configuration constants,
//! not request parameters. The defaults describe five labs that each seat
//! 25 students per slot, capped at 125 students per exam day.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Students seated per exam day.
pub const DEFAULT_DAILY_CAPACITY: usize = 125;
/// Students seated per time slot.
pub const DEFAULT_SLOT_CAPACITY: usize = 25;
/// Smallest cohort the engine will schedule.
pub const DEFAULT_MIN_COHORT_SIZE: usize = 25;
/// Labs generated when the caller names none.
pub const DEFAULT_LAB_COUNT: usize = 5;

/// One slot every lab offers on every exam day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTemplate {
    /// Display label, e.g. `09:00 AM - 12:00 PM`.
    pub time: String,
    /// Session tag, e.g. `morning`.
    pub session: String,
}

/// Scheduling engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ceiling on students per exam day.
    pub daily_capacity: usize,
    /// Seats per time slot.
    pub slot_capacity: usize,
    /// Minimum number of unique students.
    pub min_cohort_size: usize,
    /// Number of `Lab N` names generated when none are supplied.
    pub default_lab_count: usize,
    /// Slots per lab per day, in session order.
    pub slot_templates: Vec<SlotTemplate>,
}

impl SlotTemplate {
    pub fn new(time: impl Into<String>, session: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            session: session.into(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            daily_capacity: DEFAULT_DAILY_CAPACITY,
            slot_capacity: DEFAULT_SLOT_CAPACITY,
            min_cohort_size: DEFAULT_MIN_COHORT_SIZE,
            default_lab_count: DEFAULT_LAB_COUNT,
            slot_templates: vec![
                SlotTemplate::new("09:00 AM - 12:00 PM", "morning"),
                SlotTemplate::new("01:00 PM - 04:00 PM", "afternoon"),
            ],
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_daily_capacity(mut self, capacity: usize) -> Self {
        self.daily_capacity = capacity;
        self
    }

    pub fn with_slot_capacity(mut self, capacity: usize) -> Self {
        self.slot_capacity = capacity;
        self
    }

    pub fn with_min_cohort_size(mut self, size: usize) -> Self {
        self.min_cohort_size = size;
        self
    }

    pub fn with_default_lab_count(mut self, count: usize) -> Self {
        self.default_lab_count = count;
        self
    }

    /// Replaces the slot layout.
    pub fn with_slot_templates(mut self, templates: Vec<SlotTemplate>) -> Self {
        self.slot_templates = templates;
        self
    }

    /// Checks that the configuration can seat anyone at all.
    pub fn validate(&self) -> Result<()> {
        if self.daily_capacity == 0 {
            return Err(ScheduleError::invalid_input(
                "daily_capacity",
                "must be greater than zero",
            ));
        }
        if self.slot_capacity == 0 {
            return Err(ScheduleError::invalid_input(
                "slot_capacity",
                "must be greater than zero",
            ));
        }
        if self.default_lab_count == 0 {
            return Err(ScheduleError::invalid_input(
                "default_lab_count",
                "must be greater than zero",
            ));
        }
        if self.slot_templates.is_empty() {
            return Err(ScheduleError::invalid_input(
                "slot_templates",
                "at least one slot per lab is required",
            ));
        }
        Ok(())
    }

    /// `Lab 1` .. `Lab N`.
    pub fn default_labs(&self) -> Vec<String> {
        (1..=self.default_lab_count)
            .map(|i| format!("Lab {i}"))
            .collect()
    }

    /// Distinct session tags in first-appearance order.
    pub fn sessions(&self) -> Vec<&str> {
        let mut sessions: Vec<&str> = Vec::new();
        for t in &self.slot_templates {
            if !sessions.contains(&t.session.as_str()) {
                sessions.push(&t.session);
            }
        }
        sessions
    }

    /// Total seats across every slot of `lab_count` labs on one day.
    pub fn slot_capacity_per_day(&self, lab_count: usize) -> usize {
        lab_count * self.slot_templates.len() * self.slot_capacity
    }

    /// Students one day can take with `lab_count` labs.
    pub fn day_capacity(&self, lab_count: usize) -> usize {
        self.daily_capacity
            .min(self.slot_capacity_per_day(lab_count))
    }
}
