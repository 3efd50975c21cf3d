//! Seat allocation and schedule assembly.
//!
//! `Allocator` turns per-date student plans into lab schedules with time
//! slots and examiners; `assemble` wraps the result with exam metadata and
//! the examiner rosters actually used.
//!
//! # Algorithm
//!
//! Sequential fill, session by session and lab by lab, with batches kept
//! in one slot when the day has seats to spare. Examiners rotate
//! round-robin across labs and are never reused within a day.

mod allocator;
mod assembler;

pub use allocator::{Allocation, Allocator};
pub use assembler::{assemble, referenced_examiners};
