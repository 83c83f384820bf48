//! Re-checks a generated timetable against the placement rules.
//!
//! The solver is expected to produce timetables that pass every check here;
//! the audit exists so callers (and tests) can confirm it from the output alone.

use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

use crate::data::{Catalog, Day, GeneratedTimetable, SubjectType, TimetableEntry};
use crate::grid::SlotLayout;
use crate::requirements::{division_subjects, expand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    InstructorDoubleBooked,
    ClassroomDoubleBooked,
    ClassroomMismatch,
    BrokenSession,
    DayCap,
    AdjacentRepeat,
    Accounting,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::InstructorDoubleBooked => "Instructor Double-Booked",
            ViolationKind::ClassroomDoubleBooked => "Classroom Double-Booked",
            ViolationKind::ClassroomMismatch => "Classroom Mismatch",
            ViolationKind::BrokenSession => "Broken Session",
            ViolationKind::DayCap => "Day Cap",
            ViolationKind::AdjacentRepeat => "Adjacent Repeat",
            ViolationKind::Accounting => "Accounting",
        };
        f.write_str(name)
    }
}

/// A rule the timetable breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub description: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.description)
    }
}

fn violation(kind: ViolationKind, description: String) -> Violation {
    Violation { kind, description }
}

type SessionKey<'e> = (&'e str, u32);

fn session_key(entry: &TimetableEntry) -> SessionKey<'_> {
    (entry.subject_id.as_str(), entry.lecture_number)
}

/// Every rule the timetable breaks, empty when it is sound.
pub fn audit(catalog: &Catalog, timetable: &GeneratedTimetable) -> Vec<Violation> {
    let layout = SlotLayout::new(&catalog.time_slots);
    let entries = &timetable.entries;
    let mut violations = Vec::new();

    check_double_booking(entries, &mut violations);
    check_classrooms(catalog, timetable, &mut violations);
    check_sessions(&layout, entries, &mut violations);
    check_day_caps(catalog, entries, &mut violations);
    check_adjacency(&layout, entries, &mut violations);
    check_accounting(catalog, timetable, &mut violations);

    violations
}

fn check_double_booking(entries: &[TimetableEntry], violations: &mut Vec<Violation>) {
    let by_instructor = entries
        .iter()
        .counts_by(|e| (e.day, e.time_slot_id.as_str(), e.instructor_id.as_str()));
    for ((day, slot, instructor), count) in by_instructor.into_iter().sorted() {
        if count > 1 {
            violations.push(violation(
                ViolationKind::InstructorDoubleBooked,
                format!("Instructor {instructor} holds {count} lectures on {day} slot {slot}"),
            ));
        }
    }

    let by_classroom = entries
        .iter()
        .counts_by(|e| (e.day, e.time_slot_id.as_str(), e.classroom_id.as_str()));
    for ((day, slot, classroom), count) in by_classroom.into_iter().sorted() {
        if count > 1 {
            violations.push(violation(
                ViolationKind::ClassroomDoubleBooked,
                format!("Classroom {classroom} holds {count} lectures on {day} slot {slot}"),
            ));
        }
    }
}

fn check_classrooms(
    catalog: &Catalog,
    timetable: &GeneratedTimetable,
    violations: &mut Vec<Violation>,
) {
    let student_count = catalog
        .division(&timetable.division_id)
        .map_or(0, |d| d.student_count);

    for entry in &timetable.entries {
        let (Some(subject), Some(classroom)) = (
            catalog.subject(&entry.subject_id),
            catalog.classroom(&entry.classroom_id),
        ) else {
            violations.push(violation(
                ViolationKind::ClassroomMismatch,
                format!(
                    "Entry on {} slot {} references unknown subject {} or classroom {}",
                    entry.day, entry.time_slot_id, entry.subject_id, entry.classroom_id
                ),
            ));
            continue;
        };

        if classroom.kind != subject.kind.required_room() {
            violations.push(violation(
                ViolationKind::ClassroomMismatch,
                format!(
                    "{} ({}) placed in classroom {} of the wrong type",
                    subject.id, subject.kind, classroom.id
                ),
            ));
        }
        if classroom.capacity < student_count {
            violations.push(violation(
                ViolationKind::ClassroomMismatch,
                format!(
                    "Classroom {} seats {} but the division has {} students",
                    classroom.id, classroom.capacity, student_count
                ),
            ));
        }
    }
}

fn check_sessions(layout: &SlotLayout<'_>, entries: &[TimetableEntry], violations: &mut Vec<Violation>) {
    let sessions = entries.iter().into_group_map_by(|e| session_key(*e));
    for ((subject, lecture), session) in sessions.into_iter().sorted_by_key(|(k, _)| *k) {
        let days: HashSet<Day> = session.iter().map(|e| e.day).collect();
        let indices: Option<Vec<usize>> = session
            .iter()
            .map(|e| layout.index_of(&e.time_slot_id))
            .collect();

        let contiguous = match indices {
            Some(mut indices) if days.len() == 1 => {
                indices.sort_unstable();
                let first = indices[0];
                let last = indices[indices.len() - 1];
                last - first + 1 == indices.len() && !layout.spans_lunch(first..last + 1)
            }
            _ => false,
        };
        if !contiguous {
            violations.push(violation(
                ViolationKind::BrokenSession,
                format!("{subject} lecture {lecture} is not one contiguous run on a single day"),
            ));
        }
    }
}

fn check_day_caps(catalog: &Catalog, entries: &[TimetableEntry], violations: &mut Vec<Violation>) {
    let by_day = entries.iter().into_group_map_by(|e| e.day);
    for (day, day_entries) in by_day.into_iter().sorted_by_key(|(d, _)| *d) {
        let sessions: HashSet<SessionKey<'_>> = day_entries.iter().map(|e| session_key(*e)).collect();
        let kind_of = |id: &str| catalog.subject(id).map(|s| s.kind);

        let technical = sessions
            .iter()
            .filter(|(id, _)| kind_of(*id) == Some(SubjectType::TechnicalTraining))
            .count();
        if technical > 1 {
            violations.push(violation(
                ViolationKind::DayCap,
                format!("{technical} technical training sessions on {day}"),
            ));
        }

        let labs: HashSet<&str> = sessions
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| kind_of(*id) == Some(SubjectType::Lab))
            .collect();
        if labs.len() > 2 {
            violations.push(violation(
                ViolationKind::DayCap,
                format!("{} lab subjects on {day}", labs.len()),
            ));
        }

        for (subject, count) in sessions.iter().counts_by(|(id, _)| *id).into_iter().sorted() {
            if count > 2 {
                violations.push(violation(
                    ViolationKind::DayCap,
                    format!("{subject} taught {count} times on {day}"),
                ));
            }
        }
    }
}

fn check_adjacency(layout: &SlotLayout<'_>, entries: &[TimetableEntry], violations: &mut Vec<Violation>) {
    let by_day = entries.iter().into_group_map_by(|e| e.day);
    for (day, day_entries) in by_day.into_iter().sorted_by_key(|(d, _)| *d) {
        let placed = day_entries
            .iter()
            .filter_map(|e| layout.index_of(&e.time_slot_id).map(|i| (i, session_key(*e))))
            .sorted_by_key(|(i, _)| *i);
        for ((i, (subject, a)), (j, (next_subject, b))) in placed.tuple_windows() {
            let touching = j == i + 1 && !layout.spans_lunch(i..j + 1);
            if touching && subject == next_subject && a != b {
                violations.push(violation(
                    ViolationKind::AdjacentRepeat,
                    format!("{subject} lectures {a} and {b} back to back on {day}"),
                ));
            }
        }
    }
}

fn check_accounting(
    catalog: &Catalog,
    timetable: &GeneratedTimetable,
    violations: &mut Vec<Violation>,
) {
    let Some(division) = catalog.division(&timetable.division_id) else {
        return;
    };
    let expected = division_subjects(catalog, division).map_or(0, |s| expand(&s).len());
    let placed = timetable.entries.iter().map(session_key).unique().count();
    let reported = placed + timetable.conflicts.len();
    if reported != expected {
        violations.push(violation(
            ViolationKind::Accounting,
            format!(
                "{placed} placed + {} conflicts != {expected} lectures required",
                timetable.conflicts.len()
            ),
        ));
    }
}
