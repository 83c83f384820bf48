use chrono::Utc;
use log::{debug, info, trace};
use std::ops::Range;
use std::time::Instant;
use uuid::Uuid;

use crate::conflicts::{ConflictLog, PlacementFailure};
use crate::constraints::{
    DayLoad, Probe, Rejection, check_run, eligible_classrooms, eligible_instructors,
    free_classroom, free_instructor,
};
use crate::data::{
    Catalog, Classroom, Day, Division, GenerateRequest, GeneratedTimetable, Instructor,
    TimeSlot, TimetableEntry,
};
use crate::error::GenerationError;
use crate::grid::{Occupant, ScheduleGrid, SlotLayout};
use crate::requirements::{LectureRequirement, division_subjects, expand, order};

/// Actor recorded when the caller does not name one.
pub const SYSTEM_ACTOR: &str = "system";

/// A feasible assignment for one lecture requirement.
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    pub day: Day,
    pub run: Range<usize>,
    pub slots: Vec<&'a TimeSlot>,
    pub instructor: &'a Instructor,
    pub classroom: &'a Classroom,
}

/// First-fit weekly timetable generator over a fixed catalog snapshot.
///
/// Each call to [`generate`](Self::generate) owns a fresh [`ScheduleGrid`],
/// so one generator can serve any number of divisions.
#[derive(Debug, Clone)]
pub struct TimetableGenerator<'a> {
    catalog: &'a Catalog,
    layout: SlotLayout<'a>,
}

impl<'a> TimetableGenerator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            layout: SlotLayout::new(&catalog.time_slots),
        }
    }

    pub fn layout(&self) -> &SlotLayout<'a> {
        &self.layout
    }

    pub fn generate(&self, division_id: &str) -> Result<GeneratedTimetable, GenerationError> {
        self.generate_as(division_id, SYSTEM_ACTOR)
    }

    /// Generates the division's week, stamping `actor` as the author.
    ///
    /// Fails only for structural problems; lectures that cannot be placed
    /// end up in `conflicts` and the rest of the week is still filled.
    pub fn generate_as(
        &self,
        division_id: &str,
        actor: &str,
    ) -> Result<GeneratedTimetable, GenerationError> {
        let start_time = Instant::now();
        let division = self
            .catalog
            .division(division_id)
            .ok_or_else(|| GenerationError::DivisionNotFound(division_id.to_string()))?;
        let subjects = division_subjects(self.catalog, division)?;

        let mut requirements = expand(&subjects);
        order(&mut requirements);
        info!(
            "Generating timetable for division {} with {} subjects, {} lectures, {} teaching slots per day",
            division.id,
            subjects.len(),
            requirements.len(),
            self.layout.len()
        );

        let mut grid = ScheduleGrid::new(self.layout.len());
        let mut conflicts = ConflictLog::new();
        let mut entries = Vec::new();

        for req in &requirements {
            match self.find_slot(req, division, &grid) {
                Ok(placement) => {
                    debug!(
                        "Placed {} lecture {} on {} slots {:?} with {} in {}",
                        req.subject.id,
                        req.lecture_number,
                        placement.day,
                        placement.slots.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
                        placement.instructor.id,
                        placement.classroom.id
                    );
                    entries.extend(session_entries(&division.id, req, &placement));
                    grid.occupy(
                        placement.day,
                        placement.run.clone(),
                        Occupant {
                            instructor: placement.instructor,
                            classroom: placement.classroom,
                            subject: req.subject,
                        },
                    );
                }
                Err(failure) => conflicts.record(req, failure),
            }
        }

        info!(
            "Division {}: {} entries, {} conflicts in {:.2?}",
            division.id,
            entries.len(),
            conflicts.len(),
            start_time.elapsed()
        );

        Ok(GeneratedTimetable {
            id: Uuid::new_v4(),
            division_id: division.id.clone(),
            generated_by: actor.to_string(),
            generated_at: Utc::now(),
            entries,
            conflicts: conflicts.into_messages(),
        })
    }

    /// Finds the first feasible (day, run, instructor, classroom) for `req`.
    ///
    /// Days are tried Monday to Saturday; within a day, run starts follow the
    /// subject type's preferred order. The grid is never touched.
    pub fn find_slot(
        &self,
        req: &LectureRequirement<'a>,
        division: &Division,
        grid: &ScheduleGrid<'a>,
    ) -> Result<Placement<'a>, PlacementFailure> {
        let instructors = eligible_instructors(self.catalog, &req.subject.id);
        if instructors.is_empty() {
            return Err(PlacementFailure::NoQualifiedInstructor);
        }
        let classrooms = eligible_classrooms(self.catalog, req.kind, division);
        if classrooms.is_empty() {
            return Err(PlacementFailure::NoSuitableClassroom);
        }
        if req.duration > self.layout.len() {
            return Err(PlacementFailure::SessionTooLong);
        }

        let starts = self.layout.preferred_starts(req.kind);
        for day in Day::WEEK {
            if let Err(rejection) = DayLoad::measure(grid, day, &req.subject.id).admits(req) {
                trace!("{} lecture {}: skip {}, {}", req.subject.id, req.lecture_number, day, rejection);
                continue;
            }

            for &start in &starts {
                if start + req.duration > self.layout.len() {
                    continue;
                }
                let probe = Probe {
                    grid,
                    layout: &self.layout,
                    day,
                    run: start..start + req.duration,
                    subject_id: &req.subject.id,
                };
                match assign(&probe, &instructors, &classrooms) {
                    Ok((instructor, classroom)) => {
                        return Ok(Placement {
                            day,
                            slots: self.layout.slots(probe.run.clone()).to_vec(),
                            run: probe.run,
                            instructor,
                            classroom,
                        });
                    }
                    Err(rejection) => trace!(
                        "{} lecture {}: {} slot {} rejected, {}",
                        req.subject.id,
                        req.lecture_number,
                        day,
                        self.layout.slot(start).id,
                        rejection
                    ),
                }
            }
        }

        Err(PlacementFailure::NoFeasibleSlot)
    }
}

/// Run checks first, then the first free instructor and classroom.
fn assign<'a>(
    probe: &Probe<'_, 'a>,
    instructors: &[&'a Instructor],
    classrooms: &[&'a Classroom],
) -> Result<(&'a Instructor, &'a Classroom), Rejection> {
    check_run(probe)?;
    let instructor = free_instructor(probe, instructors)?;
    let classroom = free_classroom(probe, classrooms)?;
    Ok((instructor, classroom))
}

fn session_entries(
    division_id: &str,
    req: &LectureRequirement<'_>,
    placement: &Placement<'_>,
) -> Vec<TimetableEntry> {
    let is_multi_slot = placement.slots.len() > 1;
    placement
        .slots
        .iter()
        .enumerate()
        .map(|(slot_index, slot)| TimetableEntry {
            division_id: division_id.to_string(),
            day: placement.day,
            time_slot_id: slot.id.clone(),
            subject_id: req.subject.id.clone(),
            instructor_id: placement.instructor.id.clone(),
            classroom_id: placement.classroom.id.clone(),
            lecture_number: req.lecture_number,
            is_multi_slot,
            slot_index,
        })
        .collect()
}

/// Generates the requested division's timetable from the snapshot carried in the request.
pub fn solve(
    input: &GenerateRequest,
    default_actor: &str,
) -> Result<GeneratedTimetable, GenerationError> {
    let actor = input.generated_by.as_deref().unwrap_or(default_actor);
    TimetableGenerator::new(&input.catalog).generate_as(&input.division_id, actor)
}
