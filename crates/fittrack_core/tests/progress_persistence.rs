use fittrack_core::{
    Athlete, ExerciseRecord, JsonFileProgressRepository, PersistenceError, ProgressRepository,
};
use std::path::Path;

fn sample_athlete() -> Athlete {
    let mut athlete = Athlete::new("jo", 33, 68.2);
    athlete.log_exercise(ExerciseRecord::new("Run", "Cardio", 30, 5));
    athlete.log_exercise(ExerciseRecord::new("Bench", "Strength", 20, 8));
    athlete.log_exercise(ExerciseRecord::new("Yoga", "Flexibility", 45, 2));
    athlete
        .set_goal("calories", 500.0)
        .expect("positive goal target should be accepted");
    athlete
        .set_goal("duration", 120.0)
        .expect("positive goal target should be accepted");
    athlete
}

fn exercise_fields(athlete: &Athlete) -> Vec<(String, String, i64, i64)> {
    athlete
        .exercises()
        .iter()
        .map(|record| {
            (
                record.name().to_string(),
                record.category().to_string(),
                record.duration_min(),
                record.intensity(),
            )
        })
        .collect()
}

fn read_json(path: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(path).expect("saved file should be readable");
    serde_json::from_str(&raw).expect("saved file should be valid JSON")
}

#[test]
fn save_then_load_restores_state_except_timestamps() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("progress.json");
    let original = sample_athlete();

    original.save_progress(&path).expect("save should succeed");

    let mut restored = Athlete::new("placeholder", 1, 1.0);
    restored.log_exercise(ExerciseRecord::new("Old", "Cardio", 1, 1));
    restored.load_progress(&path).expect("load should succeed");

    assert_eq!(restored.username(), "jo");
    assert_eq!(restored.age(), 33);
    assert_eq!(restored.weight_kg(), 68.2);
    assert_eq!(restored.goals(), original.goals());
    assert_eq!(exercise_fields(&restored), exercise_fields(&original));
}

#[test]
fn saved_document_uses_exact_field_names() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("progress.json");
    let athlete = sample_athlete();

    athlete.save_progress(&path).expect("save should succeed");
    let json = read_json(&path);

    assert_eq!(json["username"], "jo");
    assert_eq!(json["age"], 33);
    assert_eq!(json["weight"], 68.2);
    assert_eq!(json["goals"]["calories"], 500.0);
    assert_eq!(json["goals"]["duration"], 120.0);

    let exercises = json["exercises"].as_array().expect("exercises should be an array");
    assert_eq!(exercises.len(), 3);
    assert_eq!(exercises[1]["name"], "Bench");
    assert_eq!(exercises[1]["category"], "Strength");
    assert_eq!(exercises[1]["duration_min"], 20);
    assert_eq!(exercises[1]["intensity"], 8);
    assert_eq!(
        exercises[1]["timestamp"],
        athlete.exercises()[1].timestamp_text()
    );
}

#[test]
fn save_overwrites_existing_content() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("progress.json");
    std::fs::write(&path, "x".repeat(4096)).expect("fixture file should be written");

    Athlete::new("jo", 33, 68.2).save_progress(&path).expect("save should succeed");

    let json = read_json(&path);
    assert_eq!(json["exercises"].as_array().expect("exercises should be an array").len(), 0);
    assert!(json["goals"].as_object().expect("goals should be an object").is_empty());
}

#[test]
fn load_accepts_documents_written_with_integer_numbers() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("progress.json");
    std::fs::write(
        &path,
        r#"{
    "username": "kim",
    "age": 52,
    "weight": 90,
    "exercises": [
        {"name": "Hike", "category": "Cardio", "duration_min": 90, "intensity": 4,
         "timestamp": "2023-09-09 09:09:09"}
    ],
    "goals": {"duration": 300, "steps": 8000}
}"#,
    )
    .expect("fixture file should be written");

    let mut athlete = Athlete::new("jo", 33, 68.2);
    athlete.load_progress(&path).expect("load should succeed");

    assert_eq!(athlete.username(), "kim");
    assert_eq!(athlete.weight_kg(), 90.0);
    assert_eq!(athlete.goal_target("steps"), Some(8000.0));
    assert_eq!(athlete.calculate_total_duration(), 90);
    assert_eq!(athlete.track_progress().len(), 1);
}

#[test]
fn loaded_records_take_a_fresh_timestamp() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("progress.json");
    std::fs::write(
        &path,
        r#"{"username":"kim","age":52,"weight":90.0,"goals":{},
            "exercises":[{"name":"Hike","category":"Cardio","duration_min":90,
                          "intensity":4,"timestamp":"2001-01-01 00:00:00"}]}"#,
    )
    .expect("fixture file should be written");

    let mut athlete = Athlete::new("jo", 33, 68.2);
    athlete.load_progress(&path).expect("load should succeed");

    assert_ne!(athlete.exercises()[0].timestamp_text(), "2001-01-01 00:00:00");
}

#[test]
fn load_missing_file_reports_not_found_and_keeps_state() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("missing.json");
    let mut athlete = sample_athlete();
    let before = athlete.clone();

    let err = athlete
        .load_progress(&path)
        .expect_err("missing file must not load");

    match err {
        PersistenceError::NotFound(reported) => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(athlete, before);
}

#[test]
fn load_malformed_document_reports_error_and_keeps_state() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let mut athlete = sample_athlete();
    let before = athlete.clone();

    let cases = [
        ("truncated.json", r#"{"username": "kim", "age": "#),
        ("missing_goals.json", r#"{"username":"kim","age":52,"weight":90.0,"exercises":[]}"#),
        (
            "wrong_type.json",
            r#"{"username":"kim","age":"old","weight":90.0,"exercises":[],"goals":{}}"#,
        ),
        (
            "bad_exercise.json",
            r#"{"username":"kim","age":52,"weight":90.0,"goals":{},
                "exercises":[{"name":"Hike","category":"Cardio","intensity":4}]}"#,
        ),
    ];

    for (file_name, contents) in cases {
        let path = dir.path().join(file_name);
        std::fs::write(&path, contents).expect("fixture file should be written");

        let err = athlete
            .load_progress(&path)
            .expect_err("malformed document must not load");
        assert!(
            matches!(err, PersistenceError::Malformed { .. }),
            "{file_name}: unexpected error: {err}"
        );
        assert_eq!(athlete, before, "{file_name}: state must be unchanged");
    }
}

#[test]
fn save_to_unwritable_target_reports_write_failure() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("no_such_dir").join("progress.json");

    let err = sample_athlete()
        .save_progress(&path)
        .expect_err("missing parent directory must fail the save");

    assert!(
        matches!(err, PersistenceError::Write { .. }),
        "unexpected error: {err}"
    );
    assert!(!path.exists());
}

#[test]
fn repository_round_trip_through_trait() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let repo = JsonFileProgressRepository::new(dir.path().join("progress.json"));
    let athlete = sample_athlete();

    athlete.save_to(&repo).expect("save should succeed");
    let snapshot = repo.load().expect("saved snapshot should load");

    assert_eq!(snapshot, athlete.to_snapshot());
    assert_eq!(Athlete::from_snapshot(snapshot).exercise_count(), 3);
}

#[test]
fn save_rejects_non_finite_weight_and_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("progress.json");

    for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = Athlete::new("jo", 33, weight)
            .save_progress(&path)
            .expect_err("non-finite weight must not be saved");

        match err {
            PersistenceError::NonFinite { field, .. } => assert_eq!(field, "weight"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }
}

#[test]
fn failed_save_keeps_previous_loadable_document() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("progress.json");
    sample_athlete()
        .save_progress(&path)
        .expect("save should succeed");

    Athlete::new("jo", 33, f64::NAN)
        .save_progress(&path)
        .expect_err("non-finite weight must not be saved");

    let mut restored = Athlete::new("placeholder", 1, 1.0);
    restored
        .load_progress(&path)
        .expect("previous document should still load");
    assert_eq!(restored.weight_kg(), 68.2);
    assert_eq!(restored.exercise_count(), 3);
}
