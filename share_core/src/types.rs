//! Core domain types for the Repshare sharing module.
//!
//! This module defines the fundamental types used throughout the system:
//! - The completed-session tree (session → module → exercise → set group → set)
//! - Raw set data and exercise type tags
//! - Catalog-side templates (programs, workouts, exercise instances)
//!
//! Everything here is a plain value type. Once captured into a share bundle
//! the data is copied, never aliased, so bundles can be handed across render
//! passes without locking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Set Data
// ============================================================================

/// A single recorded set.
///
/// Exactly one of the measurement fields is semantically primary per exercise
/// type; the rest stay `None`. `completed` gates inclusion in every aggregate
/// stat.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetData {
    pub id: Uuid,
    pub set_number: u32,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub hold_time_seconds: Option<u32>,
    #[serde(default)]
    pub band_color: Option<String>,
    #[serde(default)]
    pub rpe: Option<u8>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub quality: Option<u8>,
    pub completed: bool,
}

/// Authoritative exercise type tag.
///
/// Not every stored set carries one (legacy data), so display classification
/// re-infers from the populated fields; see the `classify` module.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Strength,
    Cardio,
    Isometric,
    Mobility,
    Explosive,
    Recovery,
}

// ============================================================================
// Completed Session Tree
// ============================================================================

/// Sets that were performed together under one prescription (e.g. "4 × 8").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletedSetGroup {
    pub id: Uuid,
    pub sets: Vec<SetData>,
}

/// One exercise within a completed session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionExercise {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub exercise_type: Option<ExerciseType>,
    pub set_groups: Vec<CompletedSetGroup>,
}

impl SessionExercise {
    /// All sets of this exercise in recorded order
    pub fn all_sets(&self) -> impl Iterator<Item = &SetData> {
        self.set_groups.iter().flat_map(|g| g.sets.iter())
    }

    /// Completed sets only, in recorded order
    pub fn completed_sets(&self) -> Vec<&SetData> {
        self.all_sets().filter(|s| s.completed).collect()
    }
}

/// A completed block of exercises within a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletedModule {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<SessionExercise>,
}

/// A completed workout session.
///
/// Owns its modules top-down; there are no back-references anywhere in the
/// tree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub workout_name: String,
    pub performed_at: DateTime<Utc>,
    pub modules: Vec<CompletedModule>,
}

impl Session {
    /// All exercises across all modules, in session order
    pub fn exercises(&self) -> impl Iterator<Item = &SessionExercise> {
        self.modules.iter().flat_map(|m| m.exercises.iter())
    }

    /// Look up an exercise anywhere in the session tree
    pub fn find_exercise(&self, exercise_id: Uuid) -> Option<&SessionExercise> {
        self.exercises().find(|e| e.id == exercise_id)
    }

    /// Look up one set of one exercise
    pub fn find_set(&self, exercise_id: Uuid, set_id: Uuid) -> Option<&SetData> {
        self.find_exercise(exercise_id)
            .and_then(|e| e.all_sets().find(|s| s.id == set_id))
    }
}

// ============================================================================
// Catalog Templates
// ============================================================================

/// A prescribed group of sets inside a workout template (e.g. "4 × 8 @ 60kg")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetGroup {
    pub id: Uuid,
    pub target_sets: u32,
    #[serde(default)]
    pub target_reps: Option<u32>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
}

/// An exercise slot inside a workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseInstance {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub exercise_type: Option<ExerciseType>,
    pub set_groups: Vec<SetGroup>,
}

/// A workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<ExerciseInstance>,
}

/// A block of workouts within a program (a training phase or week)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingModule {
    pub id: Uuid,
    pub name: String,
    pub workouts: Vec<Workout>,
}

/// A full training program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub modules: Vec<TrainingModule>,
}

impl Program {
    /// Total workout count across all modules
    pub fn workout_count(&self) -> usize {
        self.modules.iter().map(|m| m.workouts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn test_session_exercise_lookup() {
        let session = testutil::strength_session();
        let exercise_id = session.modules[0].exercises[0].id;

        let found = session.find_exercise(exercise_id);
        assert!(found.is_some());
        assert_eq!(found.map(|e| e.name.as_str()), Some("Back Squat"));

        assert!(session.find_exercise(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_session_set_lookup() {
        let session = testutil::strength_session();
        let exercise = &session.modules[0].exercises[0];
        let set_id = exercise.set_groups[0].sets[1].id;

        let found = session.find_set(exercise.id, set_id);
        assert!(found.is_some());
        assert_eq!(found.map(|s| s.set_number), Some(2));

        // Right set, wrong exercise
        assert!(session.find_set(Uuid::new_v4(), set_id).is_none());
    }

    #[test]
    fn test_completed_sets_excludes_incomplete() {
        let session = testutil::strength_session();
        let exercise = &session.modules[0].exercises[0];

        // The fixture marks the last squat set incomplete
        let all: Vec<_> = exercise.all_sets().collect();
        let completed = exercise.completed_sets();
        assert_eq!(all.len(), 4);
        assert_eq!(completed.len(), 3);
    }

    #[test]
    fn test_set_data_lenient_deserialization() {
        // Measurement fields absent entirely must decode to None
        let json = r#"{
            "id": "1f0a5fca-72ae-4fd2-9b37-0c1f0a9f2d61",
            "set_number": 1,
            "completed": true
        }"#;

        let set: SetData = serde_json::from_str(json).unwrap();
        assert_eq!(set.weight, None);
        assert_eq!(set.reps, None);
        assert!(set.completed);
    }
}
