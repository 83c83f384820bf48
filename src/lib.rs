//! Weekly lecture timetable generation for academic divisions.
//!
//! Given a catalog snapshot (subjects, classrooms, instructors, divisions,
//! time slots), [`TimetableGenerator`] places every weekly lecture of a
//! division into a Monday–Saturday grid with a greedy first-fit search.
//! Lectures that cannot be placed are reported as conflicts instead of
//! failing the run.

pub mod audit;
pub mod config;
pub mod conflicts;
pub mod constraints;
pub mod data;
pub mod error;
pub mod grid;
pub mod requirements;
pub mod server;
pub mod solver;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use error::{Error, GenerationError, Result};
pub use solver::{TimetableGenerator, solve};
pub use validation::validate_catalog;
