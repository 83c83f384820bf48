//! Catalog builders shared by unit tests.

use crate::data::*;

fn subject(id: &str, kind: SubjectType, lectures_per_week: u32, duration: u32) -> Subject {
    Subject {
        id: id.into(),
        name: format!("Subject {id}"),
        code: id.to_uppercase(),
        kind,
        lectures_per_week,
        duration,
    }
}

pub fn theory(id: &str, lectures_per_week: u32) -> Subject {
    subject(id, SubjectType::Theory, lectures_per_week, 1)
}

pub fn lab(id: &str, lectures_per_week: u32, duration: u32) -> Subject {
    subject(id, SubjectType::Lab, lectures_per_week, duration)
}

pub fn technical(id: &str, lectures_per_week: u32, duration: u32) -> Subject {
    subject(id, SubjectType::TechnicalTraining, lectures_per_week, duration)
}

pub fn room(id: &str, kind: RoomType, capacity: u32) -> Classroom {
    Classroom {
        id: id.into(),
        name: id.into(),
        kind,
        capacity,
    }
}

pub fn instructor(id: &str, subjects: &[&str]) -> Instructor {
    Instructor {
        id: id.into(),
        name: id.into(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn division(id: &str, student_count: u32, subjects: &[&str]) -> Division {
    Division {
        id: id.into(),
        name: id.into(),
        student_count,
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn slot(id: &str, start: &str, end: &str, is_lunch: bool) -> TimeSlot {
    TimeSlot {
        id: id.into(),
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        is_lunch,
    }
}

/// Four morning periods, a lunch break, four afternoon periods.
pub fn college_day() -> Vec<TimeSlot> {
    vec![
        slot("1", "09:10", "10:00", false),
        slot("2", "10:00", "10:50", false),
        slot("3", "10:50", "11:40", false),
        slot("4", "11:40", "12:30", false),
        slot("5", "12:30", "13:10", true),
        slot("6", "13:10", "14:00", false),
        slot("7", "14:00", "14:50", false),
        slot("8", "14:50", "15:40", false),
        slot("9", "15:40", "16:30", false),
    ]
}

/// Catalog with the college day and nothing else.
pub fn empty_week() -> Catalog {
    Catalog {
        time_slots: college_day(),
        ..Catalog::default()
    }
}
