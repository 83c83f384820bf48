use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ParseClockTimeError;

// Type aliases for clarity
pub type SubjectId = String;
pub type ClassroomId = String;
pub type InstructorId = String;
pub type DivisionId = String;
pub type TimeSlotId = String;

/// Kind of subject; decides which classroom type it needs and its placement priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SubjectType {
    Theory,
    Lab,
    #[serde(rename = "Technical training", alias = "TechnicalTraining")]
    TechnicalTraining,
}

impl SubjectType {
    /// Lower sorts first. Technical training and labs are placed while the grid is still empty.
    pub fn priority(self) -> u8 {
        match self {
            SubjectType::TechnicalTraining => 0,
            SubjectType::Lab => 1,
            SubjectType::Theory => 2,
        }
    }

    pub fn required_room(self) -> RoomType {
        match self {
            SubjectType::Theory => RoomType::Theory,
            SubjectType::Lab => RoomType::Lab,
            SubjectType::TechnicalTraining => RoomType::TechnicalTraining,
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectType::Theory => write!(f, "Theory"),
            SubjectType::Lab => write!(f, "Lab"),
            SubjectType::TechnicalTraining => write!(f, "Technical training"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum RoomType {
    Theory,
    Lab,
    #[serde(rename = "Technical training", alias = "TechnicalTraining")]
    TechnicalTraining,
}

/// Teaching days, in the order the search visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const WEEK: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Wall-clock time of day with minute resolution, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(ClockTime(hour * 60 + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseClockTimeError(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;
        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

fn one() -> u32 {
    1
}

/// A subject taught to divisions, repeated `lectures_per_week` times.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "type")]
    pub kind: SubjectType,
    #[serde(default = "one")]
    pub lectures_per_week: u32,
    /// Consecutive slots per session.
    #[serde(default = "one")]
    pub duration: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: ClassroomId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RoomType,
    pub capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: InstructorId,
    #[serde(default)]
    pub name: String,
    /// Subjects this instructor is qualified to teach.
    #[serde(default)]
    pub subjects: Vec<SubjectId>,
}

impl Instructor {
    pub fn teaches(&self, subject_id: &str) -> bool {
        self.subjects.iter().any(|s| s == subject_id)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: DivisionId,
    #[serde(default)]
    pub name: String,
    pub student_count: u32,
    #[serde(default)]
    pub subjects: Vec<SubjectId>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default)]
    pub is_lunch: bool,
}

/// Read-only snapshot of everything a generation run needs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub divisions: Vec<Division>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl Catalog {
    pub fn division(&self, id: &str) -> Option<&Division> {
        self.divisions.iter().find(|d| d.id == id)
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn classroom(&self, id: &str) -> Option<&Classroom> {
        self.classrooms.iter().find(|c| c.id == id)
    }
}

/// One occupied (day, slot) of a division's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub division_id: DivisionId,
    pub day: Day,
    pub time_slot_id: TimeSlotId,
    pub subject_id: SubjectId,
    pub instructor_id: InstructorId,
    pub classroom_id: ClassroomId,
    /// Which weekly occurrence of the subject this entry belongs to (1-based).
    pub lecture_number: u32,
    pub is_multi_slot: bool,
    /// Position inside the session (0-based).
    pub slot_index: usize,
}

/// The final output of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTimetable {
    pub id: Uuid,
    pub division_id: DivisionId,
    pub generated_by: String,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<TimetableEntry>,
    pub conflicts: Vec<String>,
}

impl GeneratedTimetable {
    /// True when every lecture was placed.
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Body of `POST /v1/timetable/generate`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub catalog: Catalog,
    pub division_id: DivisionId,
    #[serde(default)]
    pub generated_by: Option<String>,
}

/// Body returned by `POST /v1/catalog/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_parses_and_formats() {
        let t: ClockTime = "09:10".parse().unwrap();
        assert_eq!(t.minutes(), 550);
        assert_eq!(t.to_string(), "09:10");
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("9h10".parse::<ClockTime>().is_err());
    }

    #[test]
    fn subject_defaults_and_type_names() {
        let subject: Subject = serde_json::from_value(serde_json::json!({
            "id": "sub_tt",
            "name": "Industry Training",
            "type": "Technical training"
        }))
        .unwrap();
        assert_eq!(subject.kind, SubjectType::TechnicalTraining);
        assert_eq!(subject.lectures_per_week, 1);
        assert_eq!(subject.duration, 1);
        assert_eq!(subject.kind.required_room(), RoomType::TechnicalTraining);
    }

    #[test]
    fn malformed_slot_time_is_rejected() {
        let slot = serde_json::from_value::<TimeSlot>(serde_json::json!({
            "id": "1",
            "startTime": "nine",
            "endTime": "10:00"
        }));
        assert!(slot.is_err());
    }

    #[test]
    fn type_priority_orders_technical_training_first() {
        assert!(SubjectType::TechnicalTraining.priority() < SubjectType::Lab.priority());
        assert!(SubjectType::Lab.priority() < SubjectType::Theory.priority());
    }
}
