use log::warn;

use crate::data::{Catalog, Division, Subject, SubjectType};
use crate::error::GenerationError;

/// One weekly occurrence of a subject that still has to be placed.
#[derive(Debug, Clone, Copy)]
pub struct LectureRequirement<'a> {
    pub subject: &'a Subject,
    pub kind: SubjectType,
    /// Consecutive slots the session needs.
    pub duration: usize,
    /// 1-based occurrence within the week.
    pub lecture_number: u32,
}

/// Subjects of the catalog that the division takes, in catalog order.
pub fn division_subjects<'a>(
    catalog: &'a Catalog,
    division: &Division,
) -> Result<Vec<&'a Subject>, GenerationError> {
    for id in &division.subjects {
        if catalog.subject(id).is_none() {
            warn!("Division {} lists unknown subject {}", division.id, id);
        }
    }

    let subjects: Vec<&Subject> = catalog
        .subjects
        .iter()
        .filter(|s| division.subjects.contains(&s.id))
        .collect();

    if subjects.is_empty() {
        return Err(GenerationError::NoSubjects(division.id.clone()));
    }
    Ok(subjects)
}

/// Expands every subject into `lectures_per_week` requirements.
pub fn expand<'a>(subjects: &[&'a Subject]) -> Vec<LectureRequirement<'a>> {
    subjects
        .iter()
        .flat_map(|&subject| {
            (1..=subject.lectures_per_week.max(1)).map(move |lecture_number| LectureRequirement {
                subject,
                kind: subject.kind,
                duration: subject.duration.max(1) as usize,
                lecture_number,
            })
        })
        .collect()
}

/// Stable sort by type priority, so ties keep (subject, occurrence) order.
pub fn order(requirements: &mut [LectureRequirement<'_>]) {
    requirements.sort_by_key(|r| r.kind.priority());
}
