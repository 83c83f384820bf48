//! Catalog sufficiency checks.
//!
//! Run before generation to tell the caller that no division can be
//! scheduled with the current catalog, without running the search.

use crate::data::{Catalog, ValidationReport};

/// Human-readable reasons the catalog cannot support any generation.
pub fn validate_catalog(catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();

    if catalog.instructors.is_empty() {
        errors.push("No faculties available".to_string());
    }
    if catalog.subjects.is_empty() {
        errors.push("No subjects available".to_string());
    }
    if catalog.classrooms.is_empty() {
        errors.push("No classrooms available".to_string());
    }
    if catalog.time_slots.is_empty() {
        errors.push("No time slots available".to_string());
    } else if catalog.time_slots.iter().all(|s| s.is_lunch) {
        errors.push("No teaching time slots available".to_string());
    }

    errors
}

pub fn report(catalog: &Catalog) -> ValidationReport {
    let errors = validate_catalog(catalog);
    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
