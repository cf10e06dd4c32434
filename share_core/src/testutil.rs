//! Shared test fixtures.

use crate::types::{
    CompletedModule, CompletedSetGroup, ExerciseInstance, ExerciseType, Program, Session,
    SessionExercise, SetData, SetGroup, TrainingModule, Workout,
};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn blank_set(set_number: u32, completed: bool) -> SetData {
    SetData {
        id: Uuid::new_v4(),
        set_number,
        weight: None,
        reps: None,
        duration_seconds: None,
        distance: None,
        hold_time_seconds: None,
        band_color: None,
        rpe: None,
        height: None,
        quality: None,
        completed,
    }
}

pub fn strength_set(set_number: u32, weight: f64, reps: u32, completed: bool) -> SetData {
    SetData {
        weight: Some(weight),
        reps: Some(reps),
        ..blank_set(set_number, completed)
    }
}

pub fn cardio_set(set_number: u32, duration_seconds: u32, distance: f64, completed: bool) -> SetData {
    SetData {
        duration_seconds: Some(duration_seconds),
        distance: Some(distance),
        ..blank_set(set_number, completed)
    }
}

pub fn isometric_set(set_number: u32, hold_time_seconds: u32, completed: bool) -> SetData {
    SetData {
        hold_time_seconds: Some(hold_time_seconds),
        ..blank_set(set_number, completed)
    }
}

pub fn band_set(set_number: u32, color: &str, reps: u32, completed: bool) -> SetData {
    SetData {
        band_color: Some(color.to_string()),
        reps: Some(reps),
        ..blank_set(set_number, completed)
    }
}

pub fn empty_set(set_number: u32, completed: bool) -> SetData {
    blank_set(set_number, completed)
}

pub fn exercise(name: &str, sets: Vec<SetData>) -> SessionExercise {
    SessionExercise {
        id: Uuid::new_v4(),
        name: name.to_string(),
        exercise_type: None,
        set_groups: vec![CompletedSetGroup {
            id: Uuid::new_v4(),
            sets,
        }],
    }
}

/// A completed lower-body session: two modules, three exercises. The last
/// squat set is deliberately incomplete.
pub fn strength_session() -> Session {
    Session {
        id: Uuid::new_v4(),
        workout_name: "Lower A".into(),
        performed_at: Utc.with_ymd_and_hms(2026, 1, 10, 17, 30, 0).unwrap(),
        modules: vec![
            CompletedModule {
                id: Uuid::new_v4(),
                name: "Main Lifts".into(),
                exercises: vec![
                    exercise(
                        "Back Squat",
                        vec![
                            strength_set(1, 225.0, 8, true),
                            strength_set(2, 245.0, 5, true),
                            strength_set(3, 245.0, 5, true),
                            strength_set(4, 265.0, 3, false),
                        ],
                    ),
                    exercise(
                        "Romanian Deadlift",
                        vec![
                            strength_set(1, 185.0, 10, true),
                            strength_set(2, 185.0, 10, true),
                        ],
                    ),
                ],
            },
            CompletedModule {
                id: Uuid::new_v4(),
                name: "Accessories".into(),
                exercises: vec![exercise(
                    "Leg Press",
                    vec![
                        strength_set(1, 360.0, 12, true),
                        strength_set(2, 360.0, 12, true),
                    ],
                )],
            },
        ],
    }
}

pub fn program() -> Program {
    let set_group = |sets: u32, reps: u32| SetGroup {
        id: Uuid::new_v4(),
        target_sets: sets,
        target_reps: Some(reps),
        target_weight: None,
        rest_seconds: Some(120),
    };
    let instance = |name: &str| ExerciseInstance {
        id: Uuid::new_v4(),
        name: name.to_string(),
        exercise_type: Some(ExerciseType::Strength),
        set_groups: vec![set_group(4, 8)],
    };
    let workout = |name: &str, exercises: Vec<ExerciseInstance>| Workout {
        id: Uuid::new_v4(),
        name: name.to_string(),
        exercises,
    };

    Program {
        id: Uuid::new_v4(),
        name: "Strength Block".into(),
        summary: Some("Four-week base block".into()),
        modules: vec![TrainingModule {
            id: Uuid::new_v4(),
            name: "Week 1".into(),
            workouts: vec![
                workout("Lower A", vec![instance("Back Squat")]),
                workout("Upper A", vec![instance("Bench Press")]),
            ],
        }],
    }
}
