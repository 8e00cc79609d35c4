use std::sync::Arc;

use chrono::NaiveDate;
use services::{LogErrorKind, ProgramState, WorkoutLog};
use storage::{CsvRecordStore, RecordStore, Storage};
use workout_core::model::{EntryKey, ExerciseDraft, ExerciseName, ProgramName};
use workout_core::time::test_date;

#[test]
fn csv_backed_log_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training_data.csv");
    let storage = Storage::csv(&path);
    let date = test_date();

    let mut log = WorkoutLog::from_storage(&storage).expect("open empty log");
    assert!(log.is_empty());

    log.create_program(date, "Leg Day").expect("create program");
    log.create_program(date, "Oberkörper").expect("create second program");
    log.add_exercise(date, "Leg Day", ExerciseDraft::new("Squat", 100.0, 5))
        .expect("log squat");

    let exercises = log.exercises_for(date, "Leg Day");
    assert_eq!(exercises.len(), 1);
    assert_eq!(
        exercises[0].entry().exercise_name().map(|n| n.as_str()),
        Some("Squat")
    );

    let reopened = WorkoutLog::open(Arc::new(CsvRecordStore::new(&path))).expect("reopen");
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.program_state(date, "Leg Day"), ProgramState::Active);
    assert_eq!(
        reopened.program_state(date, "Oberkörper"),
        ProgramState::Placeholder
    );
    let entries: Vec<_> = reopened.entries().iter().map(|e| e.entry().clone()).collect();
    let current: Vec<_> = log.entries().iter().map(|e| e.entry().clone()).collect();
    assert_eq!(entries, current);
}

#[test]
fn every_mutation_is_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CsvRecordStore::new(dir.path().join("training_data.csv")));
    let mut log = WorkoutLog::open(Arc::clone(&store) as Arc<dyn RecordStore>).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();

    let placeholder = log.create_program(date, "Pull").unwrap();
    assert_eq!(store.load().unwrap().len(), 1);

    log.delete_entry(placeholder).unwrap();
    assert!(store.load().unwrap().is_empty());
    assert!(log.programs_for(date).is_empty());

    let err = log.delete_entry(placeholder).unwrap_err();
    assert_eq!(err.kind(), LogErrorKind::NotFound);
}

#[test]
fn key_delete_across_reopen_does_not_hit_a_neighbour() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::csv(dir.path().join("training_data.csv"));
    let date = test_date();

    let mut log = WorkoutLog::from_storage(&storage).unwrap();
    log.add_exercise(date, "Leg Day", ExerciseDraft::new("Squat", 100.0, 5))
        .unwrap();
    log.add_exercise(date, "Leg Day", ExerciseDraft::new("Bench", 60.0, 8))
        .unwrap();
    drop(log);

    let key = EntryKey::new(
        date,
        ProgramName::new("Leg Day").unwrap(),
        Some(ExerciseName::new("Squat").unwrap()),
        1,
    );

    let mut first = WorkoutLog::from_storage(&storage).unwrap();
    let removed = first.delete_by_key(&key).unwrap();
    assert_eq!(removed.exercise_name().map(|n| n.as_str()), Some("Squat"));
    drop(first);

    let mut second = WorkoutLog::from_storage(&storage).unwrap();
    let err = second.delete_by_key(&key).unwrap_err();
    assert_eq!(err.kind(), LogErrorKind::NotFound);

    let left = WorkoutLog::from_storage(&storage).unwrap();
    let names: Vec<_> = left
        .exercises_for(date, "Leg Day")
        .iter()
        .filter_map(|e| e.entry().exercise_name().map(ToString::to_string))
        .collect();
    assert_eq!(names, vec!["Bench"]);
}

#[test]
fn volume_chart_from_persisted_log() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::csv(dir.path().join("training_data.csv"));
    let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    let mut log = WorkoutLog::from_storage(&storage).unwrap();
    log.create_program(d2, "A").unwrap();
    log.add_exercise(d2, "A", ExerciseDraft::new("Bench", 50.0, 10))
        .unwrap();
    log.add_exercise(d1, "A", ExerciseDraft::new("Squat", 100.0, 5))
        .unwrap();
    log.add_exercise(d1, "B", ExerciseDraft::new("Curl", 20.0, 10))
        .unwrap();
    log.create_program(d2, "Rest").unwrap();

    let reopened = WorkoutLog::from_storage(&storage).unwrap();
    let rows: Vec<_> = reopened
        .daily_volume()
        .into_iter()
        .map(|r| (r.date, r.volume))
        .collect();
    assert_eq!(rows, vec![(d1, 700.0), (d2, 500.0)]);
}

#[test]
fn corrupt_file_is_reported_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training_data.csv");
    std::fs::write(
        &path,
        "date,program_name,exercise_name,weight,reps\n2024-01-01,A,Bench,fifty,10\n",
    )
    .unwrap();

    let err = WorkoutLog::from_storage(&Storage::csv(&path)).unwrap_err();
    assert_eq!(err.kind(), LogErrorKind::DataCorruption);
}
