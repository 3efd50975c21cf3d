//! Exam scheduling domain models.
//!
//! Request-scoped data types: built from an inbound request, filled in
//! during allocation, and discarded once the response is produced.
//!
//! # Domain Mappings
//!
//! | exam-schedule | Meaning |
//! |---------------|---------|
//! | ExamDay | Calendar day, `DD-MM-YY` on the wire |
//! | StudentGroup | Contiguous run of register numbers (a batch or a flat list) |
//! | TimeSlot | One seating block of a lab, bounded by capacity |
//! | LabSchedule | One (date, lab) pairing with its slots and examiners |
//! | ScheduleResponse | Metadata + examiner rosters + ordered lab schedules |

mod date;
mod examiner;
mod schedule;
mod student;

pub use date::{ExamDay, DATE_FORMAT};
pub use examiner::{Examiner, ExaminerRosters};
pub use schedule::{ExamDate, ExamMetadata, LabSchedule, ScheduleResponse, TimeSlot};
pub use student::{Batch, Semester, StudentGroup};
