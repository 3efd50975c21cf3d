//! Lab, slot and examiner allocation.
//!
//! # Algorithm
//!
//! Per exam day:
//! 1. Reject the day if its students exceed the day capacity
//!    (`min(daily_capacity, labs × slots × slot_capacity)`).
//! 2. Order the day's seats session by session, lab by lab, slot by slot.
//! 3. Walk the day's groups in order and fill seats sequentially. A group
//!    that fits in one slot but not in what is left of the current slot
//!    starts a fresh slot instead, as long as the seats skipped can be
//!    spared. Otherwise the group is split.
//! 4. Emit one [`LabSchedule`] per lab that seated anyone.
//! 5. Give each of those labs the next internal and next external examiner
//!    in round-robin order. An examiner is never used twice on one day;
//!    labs beyond the roster size go without.
//!
//! # Complexity
//! O(n + d × l × s) for n students, d days, l labs, s slots per lab.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::enrollment::DatePlan;
use crate::error::{Result, ScheduleError};
use crate::models::{ExamDay, Examiner, ExaminerRosters, LabSchedule, StudentGroup, TimeSlot};

/// Allocator output: ordered lab schedules plus non-fatal notices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    pub schedule: Vec<LabSchedule>,
    pub warnings: Vec<String>,
}

/// Deterministic seat and examiner allocator.
///
/// # Example
///
/// ```
/// use exam_schedule::config::EngineConfig;
/// use exam_schedule::enrollment::DatePlan;
/// use exam_schedule::models::StudentGroup;
/// use exam_schedule::scheduler::Allocator;
///
/// let plan = DatePlan::new("01-01-24".parse().unwrap())
///     .with_group(StudentGroup::unlabelled((1..=30).map(|i| format!("R{i}"))));
/// let allocation = Allocator::new(EngineConfig::default())
///     .allocate(&[plan])
///     .unwrap();
/// assert_eq!(allocation.schedule.len(), 2); // 25 in Lab 1, 5 in Lab 2
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    config: EngineConfig,
    labs: Vec<String>,
    rosters: ExaminerRosters,
    notices: Vec<String>,
}

/// One (lab, slot template) seat block of a day.
#[derive(Debug, Clone)]
struct Seat {
    lab: usize,
    template: usize,
    students: Vec<String>,
    labels: Vec<(Option<String>, Option<String>)>,
}

impl Allocator {
    /// Creates an allocator over the configured default labs with no examiners.
    pub fn new(config: EngineConfig) -> Self {
        let labs = config.default_labs();
        Self {
            config,
            labs,
            rosters: ExaminerRosters::default(),
            notices: Vec::new(),
        }
    }

    /// Sets lab names. Blank and repeated names are dropped; if none
    /// remain the default labs are kept.
    pub fn with_labs<S: AsRef<str>>(mut self, labs: &[S]) -> Self {
        let mut cleaned: Vec<String> = Vec::new();
        for lab in labs {
            let name = lab.as_ref().trim();
            if !name.is_empty() && !cleaned.iter().any(|l| l == name) {
                cleaned.push(name.to_string());
            }
        }
        if !cleaned.is_empty() {
            self.labs = cleaned;
        }
        self
    }

    /// Sets examiner rosters, cleaned with [`ExaminerRosters::sanitize`].
    pub fn with_examiners(mut self, internal: &[Examiner], external: &[Examiner]) -> Self {
        let (rosters, notices) = ExaminerRosters::sanitize(internal, external);
        self.rosters = rosters;
        self.notices = notices;
        self
    }

    pub fn labs(&self) -> &[String] {
        &self.labs
    }

    pub fn rosters(&self) -> &ExaminerRosters {
        &self.rosters
    }

    /// Adjustments made while cleaning the examiner rosters.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Students one day can seat with the current labs.
    pub fn day_capacity(&self) -> usize {
        self.config.day_capacity(self.labs.len())
    }

    /// Allocates every day plan, in the given order. Roster clean-up
    /// notices are not repeated here; see [`Allocator::notices`].
    ///
    /// Fails with [`ScheduleError::CapacityOverflow`] naming the first day
    /// that cannot seat its students.
    pub fn allocate(&self, plans: &[DatePlan]) -> Result<Allocation> {
        let mut allocation = Allocation::default();
        let mut internal = Rotation::default();
        let mut external = Rotation::default();

        for plan in plans {
            let mut entries = self.allocate_day(plan)?;
            let labs_used = entries.len();

            let internals = internal.pick(&self.rosters.internal, labs_used);
            let externals = external.pick(&self.rosters.external, labs_used);
            for ((entry, i), x) in entries.iter_mut().zip(internals).zip(externals) {
                entry.internal_examiner = i;
                entry.external_examiner = x;
            }
            for (kind, roster) in [
                ("internal", &self.rosters.internal),
                ("external", &self.rosters.external),
            ] {
                if !roster.is_empty() && roster.len() < labs_used {
                    allocation.warnings.push(format!(
                        "Only {} {kind} examiner(s) for {labs_used} labs on {}; {} lab(s) have no {kind} examiner",
                        roster.len(),
                        plan.date,
                        labs_used - roster.len()
                    ));
                }
            }

            debug!(
                date = %plan.date,
                students = plan.student_count(),
                labs_used,
                "allocated exam day"
            );
            allocation.schedule.extend(entries);
        }

        Ok(allocation)
    }

    /// Seats one day's students.
    fn allocate_day(&self, plan: &DatePlan) -> Result<Vec<LabSchedule>> {
        let assigned = plan.student_count();
        let capacity = self.day_capacity();
        if assigned > capacity {
            warn!(date = %plan.date, assigned, capacity, "day over capacity");
            return Err(overflow(plan.date, assigned, capacity));
        }

        let slot_capacity = self.config.slot_capacity;
        let mut seats = self.seat_order();
        let total_seats = seats.len() * slot_capacity;
        let mut slack = total_seats.saturating_sub(assigned);
        let mut cursor = 0;

        for group in plan.groups.iter().filter(|g| !g.is_empty()) {
            let room = seats
                .get(cursor)
                .map_or(0, |s| slot_capacity.saturating_sub(s.students.len()));
            let partly_used = room > 0 && room < slot_capacity;
            if partly_used && group.len() > room && group.len() <= slot_capacity && room <= slack {
                slack -= room;
                cursor += 1;
            }

            for reg in &group.register_numbers {
                while seats
                    .get(cursor)
                    .is_some_and(|s| s.students.len() >= slot_capacity)
                {
                    cursor += 1;
                }
                let Some(seat) = seats.get_mut(cursor) else {
                    return Err(overflow(plan.date, assigned, total_seats));
                };
                seat.students.push(reg.clone());
                seat.note(group);
            }
        }

        Ok(self.build_entries(plan, seats))
    }

    /// Seats ordered session → lab → slot.
    fn seat_order(&self) -> Vec<Seat> {
        let mut seats = Vec::new();
        for session in self.config.sessions() {
            for lab in 0..self.labs.len() {
                for (template, t) in self.config.slot_templates.iter().enumerate() {
                    if t.session == session {
                        seats.push(Seat {
                            lab,
                            template,
                            students: Vec::new(),
                            labels: Vec::new(),
                        });
                    }
                }
            }
        }
        seats
    }

    fn build_entries(&self, plan: &DatePlan, seats: Vec<Seat>) -> Vec<LabSchedule> {
        let mut per_lab: Vec<Vec<Seat>> = vec![Vec::new(); self.labs.len()];
        for seat in seats.into_iter().filter(|s| !s.students.is_empty()) {
            per_lab[seat.lab].push(seat);
        }

        per_lab
            .into_iter()
            .enumerate()
            .filter(|(_, seats)| !seats.is_empty())
            .map(|(lab, seats)| {
                let mut entry =
                    LabSchedule::new(plan.date, &self.labs[lab]).with_subject(plan.subject.clone());
                let labels: Vec<&(Option<String>, Option<String>)> =
                    seats.iter().flat_map(|s| s.labels.iter()).collect();
                entry.semester = join_distinct(labels.iter().filter_map(|(s, _)| s.as_deref()));
                entry.batch = join_distinct(labels.iter().filter_map(|(_, b)| b.as_deref()));

                for seat in seats {
                    let t = &self.config.slot_templates[seat.template];
                    let mut slot = TimeSlot::new(&t.time, &t.session, self.config.slot_capacity);
                    slot.register_numbers = seat.students;
                    entry = entry.with_slot(slot);
                }
                entry
            })
            .collect()
    }
}

impl Seat {
    fn note(&mut self, group: &StudentGroup) {
        let label = (group.semester.clone(), group.batch.clone());
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }
}

/// Round-robin cursor over one examiner roster.
#[derive(Debug, Default)]
struct Rotation {
    offset: usize,
}

impl Rotation {
    /// Next examiners for `labs` labs on one day; never repeats within the day.
    fn pick(&mut self, roster: &[Examiner], labs: usize) -> Vec<Option<Examiner>> {
        let n = roster.len();
        if n == 0 {
            return vec![None; labs];
        }
        let picks = (0..labs)
            .map(|i| (i < n).then(|| roster[(self.offset + i) % n].clone()))
            .collect();
        self.offset = (self.offset + labs.min(n)) % n;
        picks
    }
}

fn join_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut distinct: Vec<&str> = Vec::new();
    for v in values {
        if !distinct.contains(&v) {
            distinct.push(v);
        }
    }
    (!distinct.is_empty()).then(|| distinct.join(", "))
}

fn overflow(date: ExamDay, assigned: usize, capacity: usize) -> ScheduleError {
    ScheduleError::CapacityOverflow {
        date,
        assigned,
        capacity,
    }
}
