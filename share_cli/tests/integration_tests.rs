//! Integration tests for the repshare binary.
//!
//! These tests verify end-to-end behavior including:
//! - Sharing a whole session and picked highlights
//! - Feed rendering from the outbox
//! - Graceful handling of corrupt payloads and outbox lines

use assert_cmd::Command;
use chrono::{TimeZone, Utc};
use predicates::prelude::*;
use share_core::{CompletedModule, CompletedSetGroup, Session, SessionExercise, SetData};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use uuid::Uuid;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("repshare"))
}

fn strength_set(set_number: u32, weight: f64, reps: u32) -> SetData {
    SetData {
        id: Uuid::new_v4(),
        set_number,
        weight: Some(weight),
        reps: Some(reps),
        duration_seconds: None,
        distance: None,
        hold_time_seconds: None,
        band_color: None,
        rpe: None,
        height: None,
        quality: None,
        completed: true,
    }
}

fn test_session() -> Session {
    let exercise = |name: &str, sets: Vec<SetData>| SessionExercise {
        id: Uuid::new_v4(),
        name: name.to_string(),
        exercise_type: None,
        set_groups: vec![CompletedSetGroup {
            id: Uuid::new_v4(),
            sets,
        }],
    };

    Session {
        id: Uuid::new_v4(),
        workout_name: "Push Day".into(),
        performed_at: Utc.with_ymd_and_hms(2026, 2, 3, 18, 0, 0).unwrap(),
        modules: vec![CompletedModule {
            id: Uuid::new_v4(),
            name: "Main".into(),
            exercises: vec![
                exercise(
                    "Bench Press",
                    vec![
                        strength_set(1, 185.0, 8),
                        strength_set(2, 185.0, 7),
                        strength_set(3, 185.0, 6),
                    ],
                ),
                exercise("Overhead Press", vec![strength_set(1, 95.0, 10)]),
            ],
        }],
    }
}

fn write_session(dir: &Path, session: &Session) -> std::path::PathBuf {
    let path = dir.join("session.json");
    fs::write(&path, serde_json::to_string(session).unwrap()).unwrap();
    path
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fitness content sharing toolkit"));
}

#[test]
fn test_share_whole_session() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let session_path = write_session(temp_dir.path(), &test_session());

    cli()
        .arg("share")
        .arg(&session_path)
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION"))
        .stdout(predicate::str::contains("Push Day"))
        .stdout(predicate::str::contains("Shared 1 item(s)"));

    // Outbox received the record
    let outbox = fs::read_to_string(data_dir.join("outbox.jsonl")).unwrap();
    assert!(outbox.contains("\"kind\":\"session\""));
}

#[test]
fn test_share_exercise_highlight_standalone() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let session = test_session();
    let exercise_id = session.modules[0].exercises[0].id;
    let session_path = write_session(temp_dir.path(), &session);

    cli()
        .arg("share")
        .arg(&session_path)
        .arg("--exercise")
        .arg(exercise_id.to_string())
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("EXERCISE"))
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("3 sets · Top: 185 × 8"));
}

#[test]
fn test_share_set_highlight() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let session = test_session();
    let exercise = &session.modules[0].exercises[1];
    let set_id = exercise.set_groups[0].sets[0].id;
    let spec = format!("{}:{}", exercise.id, set_id);
    let session_path = write_session(temp_dir.path(), &session);

    cli()
        .arg("share")
        .arg(&session_path)
        .arg("--set")
        .arg(&spec)
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("SET"))
        .stdout(predicate::str::contains("Overhead Press"));
}

#[test]
fn test_full_session_embeds_highlights() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let session = test_session();
    let exercise_id = session.modules[0].exercises[0].id;
    let session_path = write_session(temp_dir.path(), &session);

    cli()
        .arg("share")
        .arg(&session_path)
        .arg("--exercise")
        .arg(exercise_id.to_string())
        .arg("--full")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION"))
        .stdout(predicate::str::contains("1 highlight"));
}

#[test]
fn test_sixth_highlight_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Six single-set exercises, then try to highlight all of them
    let mut session = test_session();
    session.modules[0].exercises = (0..6)
        .map(|i| SessionExercise {
            id: Uuid::new_v4(),
            name: format!("Exercise {}", i),
            exercise_type: None,
            set_groups: vec![CompletedSetGroup {
                id: Uuid::new_v4(),
                sets: vec![strength_set(1, 100.0, 5)],
            }],
        })
        .collect();
    let ids: Vec<String> = session.modules[0]
        .exercises
        .iter()
        .map(|e| e.id.to_string())
        .collect();
    let session_path = write_session(temp_dir.path(), &session);

    let mut cmd = cli();
    cmd.arg("share").arg(&session_path);
    for id in &ids {
        cmd.arg("--exercise").arg(id);
    }
    cmd.arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("highlight limit"));

    // Nothing reached the outbox
    assert!(!data_dir.join("outbox.jsonl").exists());
}

#[test]
fn test_feed_renders_shares_and_posts() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let session_path = write_session(temp_dir.path(), &test_session());

    cli()
        .arg("post")
        .arg("new bench PR coming soon")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("share")
        .arg(&session_path)
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("feed")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("new bench PR coming soon"))
        .stdout(predicate::str::contains("Push Day"));
}

#[test]
fn test_feed_survives_corrupt_outbox_line() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let session_path = write_session(temp_dir.path(), &test_session());

    cli()
        .arg("share")
        .arg(&session_path)
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // Corrupt the outbox by hand
    let outbox_path = data_dir.join("outbox.jsonl");
    let mut contents = fs::read_to_string(&outbox_path).unwrap();
    contents.push_str("{ definitely not a record\n");
    fs::write(&outbox_path, contents).unwrap();

    cli()
        .arg("feed")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Push Day"));
}

#[test]
fn test_describe_unknown_payload_renders_placeholder() {
    let temp_dir = setup_test_dir();
    let payload_path = temp_dir.path().join("payload.bin");
    fs::write(&payload_path, b"\x00\x01not a snapshot").unwrap();

    cli()
        .arg("describe")
        .arg(&payload_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("UNAVAILABLE"))
        .stdout(predicate::str::contains("type: unknown"));
}

#[test]
fn test_describe_roundtrips_a_stored_payload() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let session_path = write_session(temp_dir.path(), &test_session());

    cli()
        .arg("share")
        .arg(&session_path)
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // Pull the payload bytes back out of the stored record
    let outbox = fs::read_to_string(data_dir.join("outbox.jsonl")).unwrap();
    let record: serde_json::Value = serde_json::from_str(outbox.lines().next().unwrap()).unwrap();
    let bytes: Vec<u8> = record["content"]["payload"]["bytes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap() as u8)
        .collect();

    let payload_path = temp_dir.path().join("payload.bin");
    fs::write(&payload_path, bytes).unwrap();

    cli()
        .arg("describe")
        .arg(&payload_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION"))
        .stdout(predicate::str::contains("Push Day"));
}
