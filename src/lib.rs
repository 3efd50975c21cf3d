//! Practical-exam scheduling engine.
//!
//! Turns a cohort of students, candidate calendar dates, labs, time slots
//! and examiners into a conflict-free, capacity-respecting exam schedule.
//! Every operation is a pure, request-scoped computation: nothing is
//! shared or persisted between requests.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ExamDay`, `StudentGroup`, `Examiner`,
//!   `TimeSlot`, `LabSchedule`, `ScheduleResponse`
//! - **`requirements`**: Exam days needed for a cohort at a daily capacity
//! - **`date_selection`**: Greedy earliest-first date picking with a minimum gap
//! - **`enrollment`**: Folds the three student input shapes into per-date plans
//! - **`validation`**: Cohort size, date presence, duplicates, date sufficiency
//! - **`scheduler`**: Lab/slot/examiner allocation and final assembly
//! - **`api`**: Request/response contracts of the schedule service
//! - **`engine`**: `ScheduleEngine`, running the whole pipeline per request
//!
//! # Pipeline
//!
//! ```text
//! requirements → date_selection (auto mode only) → validation → allocator → assembler
//! ```

pub mod api;
pub mod config;
pub mod date_selection;
pub mod engine;
pub mod enrollment;
pub mod error;
pub mod models;
pub mod requirements;
pub mod scheduler;
pub mod validation;

pub use engine::ScheduleEngine;
pub use error::{FieldError, Result, ScheduleError};
