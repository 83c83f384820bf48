//! Slot layout of a teaching day and the in-memory schedule grid.

use std::ops::Range;

use crate::data::{Classroom, Day, Instructor, Subject, SubjectType, TimeSlot};

/// Slot-start indices technical training tries before any other.
const TECHNICAL_TRAINING_STARTS: [usize; 2] = [4, 5];

/// Teaching slots ordered by start time, plus the lunch slots used for gap checks.
#[derive(Debug, Clone)]
pub struct SlotLayout<'a> {
    teaching: Vec<&'a TimeSlot>,
    lunch: Vec<&'a TimeSlot>,
}

impl<'a> SlotLayout<'a> {
    pub fn new(slots: &'a [TimeSlot]) -> Self {
        let (mut teaching, lunch): (Vec<&TimeSlot>, Vec<&TimeSlot>) =
            slots.iter().partition(|s| !s.is_lunch);
        teaching.sort_by_key(|s| s.start_time);
        Self { teaching, lunch }
    }

    /// Number of schedulable periods per day.
    pub fn len(&self) -> usize {
        self.teaching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teaching.is_empty()
    }

    pub fn slot(&self, index: usize) -> &'a TimeSlot {
        self.teaching[index]
    }

    pub fn slots(&self, run: Range<usize>) -> &[&'a TimeSlot] {
        &self.teaching[run]
    }

    pub fn lunch(&self) -> &[&'a TimeSlot] {
        &self.lunch
    }

    pub fn index_of(&self, slot_id: &str) -> Option<usize> {
        self.teaching.iter().position(|s| s.id == slot_id)
    }

    /// True when a lunch slot overlaps a gap between two consecutive slots of `run`.
    pub fn spans_lunch(&self, run: Range<usize>) -> bool {
        self.slots(run).windows(2).any(|pair| {
            let (gap_start, gap_end) = (pair[0].end_time, pair[1].start_time);
            gap_start < gap_end
                && self
                    .lunch
                    .iter()
                    .any(|l| l.start_time < gap_end && l.end_time > gap_start)
        })
    }

    /// Slot-start indices in the order the search should try them.
    pub fn preferred_starts(&self, kind: SubjectType) -> Vec<usize> {
        let all = 0..self.len();
        match kind {
            SubjectType::TechnicalTraining => {
                let preferred = TECHNICAL_TRAINING_STARTS
                    .iter()
                    .copied()
                    .filter(|&i| i < self.len());
                preferred
                    .chain(all.filter(|i| !TECHNICAL_TRAINING_STARTS.contains(i)))
                    .collect()
            }
            SubjectType::Lab | SubjectType::Theory => all.collect(),
        }
    }
}

/// Who holds a cell.
#[derive(Debug, Clone, Copy)]
pub struct Occupant<'a> {
    pub instructor: &'a Instructor,
    pub classroom: &'a Classroom,
    pub subject: &'a Subject,
}

/// (day, teaching slot) → occupant. Lives for a single generation run.
#[derive(Debug, Clone)]
pub struct ScheduleGrid<'a> {
    slots_per_day: usize,
    cells: Vec<Option<Occupant<'a>>>,
}

impl<'a> ScheduleGrid<'a> {
    pub fn new(slots_per_day: usize) -> Self {
        Self {
            slots_per_day,
            cells: vec![None; Day::WEEK.len() * slots_per_day],
        }
    }

    fn offset(&self, day: Day, slot: usize) -> usize {
        day.index() * self.slots_per_day + slot
    }

    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    pub fn cell(&self, day: Day, slot: usize) -> Option<&Occupant<'a>> {
        self.cells[self.offset(day, slot)].as_ref()
    }

    pub fn is_free(&self, day: Day, slot: usize) -> bool {
        self.cell(day, slot).is_none()
    }

    /// Occupied cells of one day, in slot order.
    pub fn day(&self, day: Day) -> impl Iterator<Item = &Occupant<'a>> + '_ {
        let start = self.offset(day, 0);
        self.cells[start..start + self.slots_per_day].iter().flatten()
    }

    pub fn instructor_free(&self, day: Day, slot: usize, instructor: &Instructor) -> bool {
        self.cell(day, slot)
            .is_none_or(|o| o.instructor.id != instructor.id)
    }

    pub fn classroom_free(&self, day: Day, slot: usize, classroom: &Classroom) -> bool {
        self.cell(day, slot)
            .is_none_or(|o| o.classroom.id != classroom.id)
    }

    /// Marks every slot of `run` on `day` as held by `occupant`.
    pub fn occupy(&mut self, day: Day, run: Range<usize>, occupant: Occupant<'a>) {
        for slot in run {
            let offset = self.offset(day, slot);
            self.cells[offset] = Some(occupant);
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RoomType;
    use crate::fixtures::*;

    #[test]
    fn layout_drops_lunch_and_sorts_by_start() {
        let mut slots = college_day();
        slots.swap(0, 3);
        let layout = SlotLayout::new(&slots);

        assert_eq!(layout.len(), 8);
        assert_eq!(layout.lunch().len(), 1);
        assert_eq!(layout.slot(0).id, "1");
        assert_eq!(layout.slot(4).id, "6");
        assert_eq!(layout.index_of("5"), None);
    }

    #[test]
    fn technical_training_prefers_mid_day_starts() {
        let slots = college_day();
        let layout = SlotLayout::new(&slots);
        assert_eq!(
            layout.preferred_starts(SubjectType::TechnicalTraining),
            vec![4, 5, 0, 1, 2, 3, 6, 7]
        );
        assert_eq!(
            layout.preferred_starts(SubjectType::Lab),
            (0..8).collect::<Vec<_>>()
        );
    }

    #[test]
    fn short_day_keeps_only_existing_preferred_starts() {
        let slots: Vec<_> = college_day().into_iter().take(5).collect();
        let layout = SlotLayout::new(&slots);
        assert_eq!(
            layout.preferred_starts(SubjectType::TechnicalTraining),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn availability_is_per_day_and_slot() {
        let subject = theory("s", 1);
        let teacher = instructor("i", &["s"]);
        let classroom = room("r", RoomType::Theory, 60);
        let mut grid = ScheduleGrid::new(8);

        grid.occupy(
            Day::Monday,
            2..4,
            Occupant {
                instructor: &teacher,
                classroom: &classroom,
                subject: &subject,
            },
        );

        assert!(!grid.instructor_free(Day::Monday, 2, &teacher));
        assert!(!grid.classroom_free(Day::Monday, 3, &classroom));
        assert!(grid.instructor_free(Day::Monday, 4, &teacher));
        assert!(grid.instructor_free(Day::Tuesday, 2, &teacher));
        assert_eq!(grid.day(Day::Monday).count(), 2);
        assert_eq!(grid.occupied_count(), 2);
    }
}
