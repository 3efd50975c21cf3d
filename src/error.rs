//! Error taxonomy for the scheduling engine.
//!
//! Three fatal categories exist. Non-fatal issues (duplicates, short date
//! lists) are plain warning strings carried next to a successful result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ExamDay;

/// A field-tagged problem reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Request field the problem belongs to (e.g. `register_numbers`).
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Malformed or contradictory parameters, rejected before allocation.
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Business-rule violations. Every detected issue is listed.
    #[error("Validation failed with {} error(s)", .0.len())]
    ValidationFailure(Vec<FieldError>),

    /// A date received more students than its labs and slots can seat.
    #[error("Capacity overflow on {date}: {assigned} students assigned but only {capacity} seats available")]
    CapacityOverflow {
        date: ExamDay,
        assigned: usize,
        capacity: usize,
    },
}

impl ScheduleError {
    /// Shorthand for an [`ScheduleError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flattens the error into the `{field, message}` list used on the wire.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::InvalidInput { field, message } => vec![FieldError::new(field, message)],
            Self::ValidationFailure(errors) => errors.clone(),
            Self::CapacityOverflow { .. } => vec![FieldError::new("schedule", self.to_string())],
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
