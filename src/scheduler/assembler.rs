//! Final schedule assembly.
//!
//! Pure composition: metadata, the examiner rosters actually referenced by
//! the allocation, and the allocation itself. No further validation.

use std::collections::HashSet;

use crate::models::{ExamMetadata, Examiner, ExaminerRosters, LabSchedule, ScheduleResponse};

/// Builds the response from allocator output.
pub fn assemble(metadata: ExamMetadata, schedule: Vec<LabSchedule>) -> ScheduleResponse {
    ScheduleResponse {
        exam_metadata: metadata,
        examiners: referenced_examiners(&schedule),
        schedule,
    }
}

/// Examiners assigned anywhere in `schedule`, in first-use order.
pub fn referenced_examiners(schedule: &[LabSchedule]) -> ExaminerRosters {
    let mut internal = FirstUse::default();
    let mut external = FirstUse::default();
    for entry in schedule {
        internal.record(entry.internal_examiner.as_ref());
        external.record(entry.external_examiner.as_ref());
    }
    ExaminerRosters::new(internal.examiners, external.examiners)
}

#[derive(Default)]
struct FirstUse {
    seen: HashSet<String>,
    examiners: Vec<Examiner>,
}

impl FirstUse {
    fn record(&mut self, examiner: Option<&Examiner>) {
        if let Some(e) = examiner {
            if self.seen.insert(e.id.clone()) {
                self.examiners.push(e.clone());
            }
        }
    }
}
