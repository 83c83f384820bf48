//! Placement constraints, each a standalone predicate.
//!
//! The search runs them in a fixed sequence: eligibility once per requirement,
//! the day gates once per day, then [`RUN_CHECKS`] per candidate slot run,
//! and finally instructor/classroom availability.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use crate::data::{Catalog, Classroom, Day, Division, Instructor, SubjectType};
use crate::grid::{ScheduleGrid, SlotLayout};
use crate::requirements::LectureRequirement;

const MAX_TECHNICAL_TRAINING_PER_DAY: usize = 1;
const MAX_LAB_SUBJECTS_PER_DAY: usize = 2;
const MAX_SAME_SUBJECT_PER_DAY: usize = 2;

/// Why a day or a candidate run was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TechnicalTrainingCap,
    LabSubjectCap,
    SameSubjectCap,
    Occupied,
    LunchInGap,
    AdjacentRepeat,
    NoInstructorFree,
    NoClassroomFree,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::TechnicalTrainingCap => "technical training already on this day",
            Rejection::LabSubjectCap => "two lab subjects already on this day",
            Rejection::SameSubjectCap => "subject already twice on this day",
            Rejection::Occupied => "slot already taken",
            Rejection::LunchInGap => "session would span lunch",
            Rejection::AdjacentRepeat => "same subject directly before or after",
            Rejection::NoInstructorFree => "no qualified instructor free",
            Rejection::NoClassroomFree => "no suitable classroom free",
        };
        f.write_str(reason)
    }
}

/// Instructors qualified for the subject, in catalog order.
pub fn eligible_instructors<'a>(catalog: &'a Catalog, subject_id: &str) -> Vec<&'a Instructor> {
    catalog
        .instructors
        .iter()
        .filter(|i| i.teaches(subject_id))
        .collect()
}

/// Classrooms of the right type that seat the whole division, in catalog order.
pub fn eligible_classrooms<'a>(
    catalog: &'a Catalog,
    kind: SubjectType,
    division: &Division,
) -> Vec<&'a Classroom> {
    let required = kind.required_room();
    catalog
        .classrooms
        .iter()
        .filter(|c| c.kind == required && c.capacity >= division.student_count)
        .collect()
}

/// What is already on one day of the grid, counted per occupied cell.
#[derive(Debug, Default)]
pub struct DayLoad<'a> {
    technical_training: usize,
    lab_subjects: HashSet<&'a str>,
    same_subject: usize,
}

impl<'a> DayLoad<'a> {
    pub fn measure(grid: &ScheduleGrid<'a>, day: Day, subject_id: &str) -> Self {
        let mut load = DayLoad::default();
        for occupant in grid.day(day) {
            let subject = occupant.subject;
            match subject.kind {
                SubjectType::TechnicalTraining => load.technical_training += 1,
                SubjectType::Lab => {
                    load.lab_subjects.insert(subject.id.as_str());
                }
                SubjectType::Theory => {}
            }
            if subject.id == subject_id {
                load.same_subject += 1;
            }
        }
        load
    }

    /// Day-level gate applied before any slot on the day is considered.
    pub fn admits(&self, req: &LectureRequirement<'_>) -> Result<(), Rejection> {
        if req.kind == SubjectType::TechnicalTraining
            && self.technical_training >= MAX_TECHNICAL_TRAINING_PER_DAY
        {
            return Err(Rejection::TechnicalTrainingCap);
        }
        if req.kind == SubjectType::Lab
            && !self.lab_subjects.contains(req.subject.id.as_str())
            && self.lab_subjects.len() >= MAX_LAB_SUBJECTS_PER_DAY
        {
            return Err(Rejection::LabSubjectCap);
        }
        if self.same_subject >= MAX_SAME_SUBJECT_PER_DAY {
            return Err(Rejection::SameSubjectCap);
        }
        Ok(())
    }
}

/// A candidate run of consecutive teaching slots on one day.
#[derive(Debug, Clone)]
pub struct Probe<'g, 'a> {
    pub grid: &'g ScheduleGrid<'a>,
    pub layout: &'g SlotLayout<'a>,
    pub day: Day,
    pub run: Range<usize>,
    pub subject_id: &'g str,
}

pub type RunCheck = fn(&Probe<'_, '_>) -> Result<(), Rejection>;

/// Per-run checks, in the order the search applies them.
pub const RUN_CHECKS: [RunCheck; 3] = [check_free, check_lunch_gap, check_spacing];

pub fn check_run(probe: &Probe<'_, '_>) -> Result<(), Rejection> {
    RUN_CHECKS.iter().try_for_each(|check| check(probe))
}

/// Every slot of the run is empty.
pub fn check_free(probe: &Probe<'_, '_>) -> Result<(), Rejection> {
    if probe.run.clone().all(|i| probe.grid.is_free(probe.day, i)) {
        Ok(())
    } else {
        Err(Rejection::Occupied)
    }
}

/// No lunch slot overlaps a gap between two consecutive slots of the run.
pub fn check_lunch_gap(probe: &Probe<'_, '_>) -> Result<(), Rejection> {
    if probe.layout.spans_lunch(probe.run.clone()) {
        Err(Rejection::LunchInGap)
    } else {
        Ok(())
    }
}

/// The slot directly before and directly after the run do not hold the same subject.
pub fn check_spacing(probe: &Probe<'_, '_>) -> Result<(), Rejection> {
    let before = probe.run.start.checked_sub(1);
    let after = Some(probe.run.end).filter(|&i| i < probe.grid.slots_per_day());
    let repeats = [before, after].into_iter().flatten().any(|i| {
        probe
            .grid
            .cell(probe.day, i)
            .is_some_and(|o| o.subject.id == probe.subject_id)
    });
    if repeats {
        Err(Rejection::AdjacentRepeat)
    } else {
        Ok(())
    }
}

/// First candidate instructor free in every slot of the run.
pub fn free_instructor<'a>(
    probe: &Probe<'_, 'a>,
    candidates: &[&'a Instructor],
) -> Result<&'a Instructor, Rejection> {
    candidates
        .iter()
        .copied()
        .find(|i| {
            probe
                .run
                .clone()
                .all(|s| probe.grid.instructor_free(probe.day, s, i))
        })
        .ok_or(Rejection::NoInstructorFree)
}

/// First candidate classroom free in every slot of the run.
pub fn free_classroom<'a>(
    probe: &Probe<'_, 'a>,
    candidates: &[&'a Classroom],
) -> Result<&'a Classroom, Rejection> {
    candidates
        .iter()
        .copied()
        .find(|c| {
            probe
                .run
                .clone()
                .all(|s| probe.grid.classroom_free(probe.day, s, c))
        })
        .ok_or(Rejection::NoClassroomFree)
}
