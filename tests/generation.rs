use itertools::Itertools;
use serde_json::json;
use timetable_solver::audit::audit;
use timetable_solver::data::{Catalog, Day};
use timetable_solver::{GenerationError, TimetableGenerator, validate_catalog};

fn sample_catalog() -> Catalog {
    serde_json::from_str(include_str!("../demos/sample_catalog.json")).unwrap()
}

fn nine_period_day() -> serde_json::Value {
    json!([
        { "id": "p1", "startTime": "08:00", "endTime": "08:50" },
        { "id": "p2", "startTime": "08:50", "endTime": "09:40" },
        { "id": "p3", "startTime": "09:40", "endTime": "10:30" },
        { "id": "p4", "startTime": "10:30", "endTime": "11:20" },
        { "id": "p5", "startTime": "11:20", "endTime": "12:10" },
        { "id": "lunch", "startTime": "12:10", "endTime": "12:50", "isLunch": true },
        { "id": "p6", "startTime": "12:50", "endTime": "13:40" },
        { "id": "p7", "startTime": "13:40", "endTime": "14:30" },
        { "id": "p8", "startTime": "14:30", "endTime": "15:20" },
        { "id": "p9", "startTime": "15:20", "endTime": "16:10" }
    ])
}

#[test]
fn single_theory_subject_is_fully_placed() {
    let catalog: Catalog = serde_json::from_value(json!({
        "subjects": [{ "id": "math", "name": "Mathematics", "type": "Theory", "lecturesPerWeek": 3 }],
        "classrooms": [{ "id": "r1", "type": "Theory", "capacity": 60 }],
        "instructors": [{ "id": "f1", "subjects": ["math"] }],
        "divisions": [{ "id": "d1", "studentCount": 45, "subjects": ["math"] }],
        "timeSlots": nine_period_day()
    }))
    .unwrap();

    let tt = TimetableGenerator::new(&catalog).generate("d1").unwrap();

    assert_eq!(tt.entries.len(), 3);
    assert!(tt.conflicts.is_empty());
    let per_day = tt.entries.iter().counts_by(|e| e.day);
    assert!(per_day.values().all(|&n| n <= 2));
    assert!(audit(&catalog, &tt).is_empty());
}

#[test]
fn lab_session_never_straddles_lunch() {
    let catalog: Catalog = serde_json::from_value(json!({
        "subjects": [
            { "id": "l1", "name": "Physics Lab", "type": "Lab", "duration": 2 },
            { "id": "l2", "name": "Chemistry Lab", "type": "Lab", "duration": 2 }
        ],
        "classrooms": [{ "id": "lab", "type": "Lab", "capacity": 40 }],
        "instructors": [
            { "id": "f1", "subjects": ["l1"] },
            { "id": "f2", "subjects": ["l2"] }
        ],
        "divisions": [{ "id": "d1", "studentCount": 30, "subjects": ["l1", "l2"] }],
        "timeSlots": [
            { "id": "s1", "startTime": "11:00", "endTime": "12:00" },
            { "id": "lunch", "startTime": "12:00", "endTime": "12:45", "isLunch": true },
            { "id": "s2", "startTime": "12:45", "endTime": "13:45" },
            { "id": "s3", "startTime": "13:45", "endTime": "14:45" }
        ]
    }))
    .unwrap();

    let tt = TimetableGenerator::new(&catalog).generate("d1").unwrap();

    let placed = tt
        .entries
        .iter()
        .map(|e| (e.subject_id.as_str(), e.day, e.time_slot_id.as_str()))
        .collect_vec();
    assert_eq!(
        placed,
        vec![
            ("l1", Day::Monday, "s2"),
            ("l1", Day::Monday, "s3"),
            ("l2", Day::Tuesday, "s2"),
            ("l2", Day::Tuesday, "s3"),
        ]
    );
    assert!(tt.conflicts.is_empty());
}

#[test]
fn lab_with_only_lunch_split_pair_is_a_conflict() {
    let catalog: Catalog = serde_json::from_value(json!({
        "subjects": [{ "id": "l1", "name": "Physics Lab", "type": "Lab", "duration": 2 }],
        "classrooms": [{ "id": "lab", "type": "Lab", "capacity": 40 }],
        "instructors": [{ "id": "f1", "subjects": ["l1"] }],
        "divisions": [{ "id": "d1", "studentCount": 30, "subjects": ["l1"] }],
        "timeSlots": [
            { "id": "s1", "startTime": "11:00", "endTime": "12:00" },
            { "id": "lunch", "startTime": "12:00", "endTime": "12:45", "isLunch": true },
            { "id": "s2", "startTime": "12:45", "endTime": "13:45" }
        ]
    }))
    .unwrap();

    let tt = TimetableGenerator::new(&catalog).generate("d1").unwrap();

    assert!(tt.entries.is_empty());
    assert_eq!(tt.conflicts, vec!["Could not schedule Physics Lab lecture 1"]);
}

#[test]
fn shared_instructor_leaves_one_subject_unplaced() {
    let catalog: Catalog = serde_json::from_value(json!({
        "subjects": [
            { "id": "a", "name": "Algebra", "type": "Theory", "lecturesPerWeek": 6 },
            { "id": "b", "name": "Biology", "type": "Theory", "lecturesPerWeek": 1 }
        ],
        "classrooms": [{ "id": "r1", "type": "Theory", "capacity": 60 }],
        "instructors": [{ "id": "f1", "subjects": ["a", "b"] }],
        "divisions": [{ "id": "d1", "studentCount": 40, "subjects": ["a", "b"] }],
        "timeSlots": [{ "id": "only", "startTime": "09:00", "endTime": "10:00" }]
    }))
    .unwrap();

    let tt = TimetableGenerator::new(&catalog).generate("d1").unwrap();

    assert_eq!(tt.entries.len(), 6);
    assert!(tt.entries.iter().all(|e| e.subject_id == "a"));
    assert_eq!(tt.conflicts, vec!["Could not schedule Biology lecture 1"]);
    assert!(audit(&catalog, &tt).is_empty());
}

#[test]
fn unknown_division_produces_no_timetable() {
    let catalog = sample_catalog();
    let err = TimetableGenerator::new(&catalog).generate("div_404").unwrap_err();
    assert_eq!(err, GenerationError::DivisionNotFound("div_404".into()));
}

#[test]
fn missing_classrooms_are_reported_and_become_conflicts() {
    let mut catalog = sample_catalog();
    catalog.classrooms.clear();

    let errors = validate_catalog(&catalog);
    assert_eq!(errors, vec!["No classrooms available"]);

    let tt = TimetableGenerator::new(&catalog).generate("div_001").unwrap();
    assert!(tt.entries.is_empty());
    assert_eq!(tt.conflicts.len(), 4 + 3 + 2 + 2 + 4 + 2);
    assert!(tt.conflicts.contains(&"Could not schedule DBMS Lab lecture 2".to_string()));
}

#[test]
fn lab_requirements_fail_without_lab_rooms() {
    let mut catalog = sample_catalog();
    catalog.classrooms.retain(|c| c.id.starts_with("room_"));

    assert!(validate_catalog(&catalog).is_empty());
    let tt = TimetableGenerator::new(&catalog).generate("div_001").unwrap();

    let lab_ids = ["sub_003", "sub_004", "sub_007"];
    assert!(tt.entries.iter().all(|e| !lab_ids.contains(&e.subject_id.as_str())));
    assert_eq!(tt.conflicts.len(), 6);
    assert!(tt.conflicts.iter().all(|c| c.contains("Lab")));
}

#[test]
fn sample_divisions_pass_audit() {
    let catalog = sample_catalog();
    let generator = TimetableGenerator::new(&catalog);

    for division in &catalog.divisions {
        let tt = generator.generate(&division.id).unwrap();
        let violations = audit(&catalog, &tt);
        assert!(violations.is_empty(), "{}: {:?}", division.id, violations);
        assert!(tt.entries.iter().all(|e| e.division_id == division.id));
    }
}

#[test]
fn technical_training_prefers_afternoon_start() {
    let catalog = sample_catalog();
    let tt = TimetableGenerator::new(&catalog).generate("div_003").unwrap();

    let training = tt
        .entries
        .iter()
        .filter(|e| e.subject_id == "sub_011")
        .map(|e| (e.day, e.time_slot_id.as_str(), e.slot_index))
        .collect_vec();
    assert_eq!(
        training,
        vec![
            (Day::Monday, "6", 0),
            (Day::Monday, "7", 1),
            (Day::Tuesday, "6", 0),
            (Day::Tuesday, "7", 1),
        ]
    );
}

#[test]
fn generation_is_deterministic() {
    let catalog = sample_catalog();
    let generator = TimetableGenerator::new(&catalog);

    let first = generator.generate("div_002").unwrap();
    let second = generator.generate("div_002").unwrap();

    assert_eq!(first.entries, second.entries);
    assert_eq!(first.conflicts, second.conflicts);
    assert_ne!(first.id, second.id);
}
