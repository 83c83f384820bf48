use log::warn;
use std::fmt;

use crate::requirements::LectureRequirement;

/// Why a lecture occurrence ended up unplaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementFailure {
    NoQualifiedInstructor,
    NoSuitableClassroom,
    /// Session longer than the teaching day.
    SessionTooLong,
    /// Every day and slot was tried.
    NoFeasibleSlot,
}

impl fmt::Display for PlacementFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementFailure::NoQualifiedInstructor => write!(f, "no qualified instructor"),
            PlacementFailure::NoSuitableClassroom => write!(f, "no classroom of the right type and size"),
            PlacementFailure::SessionTooLong => write!(f, "session longer than the teaching day"),
            PlacementFailure::NoFeasibleSlot => write!(f, "no feasible day and slot"),
        }
    }
}

/// Collects one message per lecture that could not be placed.
#[derive(Debug, Default)]
pub struct ConflictLog {
    messages: Vec<String>,
    failures: Vec<PlacementFailure>,
}

impl ConflictLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, req: &LectureRequirement<'_>, failure: PlacementFailure) {
        warn!(
            "Could not schedule {} ({}) lecture {}: {}",
            req.subject.name, req.subject.id, req.lecture_number, failure
        );
        self.messages.push(format!(
            "Could not schedule {} lecture {}",
            req.subject.name, req.lecture_number
        ));
        self.failures.push(failure);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn failures(&self) -> &[PlacementFailure] {
        &self.failures
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}
