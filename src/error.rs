//! Error types for the timetable solver.

use thiserror::Error;

use crate::data::DivisionId;

/// Structural problems that stop a generation run before any placement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Division not found: {0}")]
    DivisionNotFound(DivisionId),

    #[error("No subjects assigned to division {0}")]
    NoSubjects(DivisionId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time {0:?}, expected HH:MM")]
pub struct ParseClockTimeError(pub String);

/// Service-level errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
