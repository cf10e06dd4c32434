//! Share bundles: denormalized snapshots of shareable content.
//!
//! A bundle captures everything needed to render a piece of shared content
//! without a live database round-trip. Bundles are immutable once created;
//! they are the unit that gets serialized into a snapshot payload.
//!
//! Schema policy is additive-only: fields may be added (with serde defaults),
//! never removed or repurposed. Readers ignore unknown fields, so newer
//! writers stay compatible with older readers.

use crate::types::{
    CompletedModule, CompletedSetGroup, ExerciseInstance, Program, Session, SessionExercise,
    SetData, SetGroup, TrainingModule, Workout,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

fn default_distance_unit() -> String {
    "mi".into()
}

// ============================================================================
// Catalog Bundles
// ============================================================================

/// Snapshot of a shared training program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgramShareBundle {
    pub program: Program,
}

/// Snapshot of a shared workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutShareBundle {
    pub workout: Workout,
}

/// Snapshot of a shared training module (program phase)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModuleShareBundle {
    pub module: TrainingModule,
}

/// Snapshot of one exercise slot from a workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseInstanceShareBundle {
    pub instance: ExerciseInstance,
    #[serde(default)]
    pub workout_name: Option<String>,
}

/// Snapshot of one prescribed set group from a workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetGroupShareBundle {
    pub group: SetGroup,
    pub exercise_name: String,
}

// ============================================================================
// Session Bundles
// ============================================================================

/// Snapshot of a completed session.
///
/// When the session is shared out of the highlight picker, the featured
/// exercise/set ids ride along so every consumer renders the same highlights.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionShareBundle {
    pub session: Session,
    pub workout_name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub highlighted_exercise_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub highlighted_set_ids: Option<HashMap<Uuid, Vec<Uuid>>>,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

/// Snapshot of a single performed exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseShareBundle {
    pub exercise: SessionExercise,
    #[serde(default)]
    pub workout_name: Option<String>,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

/// Snapshot of a single performed set.
///
/// `is_pr` is supplied by the caller; PR detection needs history this core
/// does not own.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetShareBundle {
    pub exercise_name: String,
    pub set: SetData,
    #[serde(default)]
    pub is_pr: bool,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

/// Snapshot of a completed module (one block of a session)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletedModuleShareBundle {
    pub module: CompletedModule,
    #[serde(default)]
    pub workout_name: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

/// Snapshot of one performed set group
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletedSetGroupShareBundle {
    pub group: CompletedSetGroup,
    pub exercise_name: String,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

// ============================================================================
// Highlights Bundle
// ============================================================================

/// A single featured set within a highlights bundle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HighlightedSet {
    pub exercise_name: String,
    pub set: SetData,
}

/// Snapshot of user-picked highlights from one session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HighlightsShareBundle {
    pub session_id: Uuid,
    pub workout_name: String,
    pub date: DateTime<Utc>,
    pub exercises: Vec<SessionExercise>,
    pub sets: Vec<HighlightedSet>,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

impl HighlightsShareBundle {
    /// Total number of featured items
    pub fn highlight_count(&self) -> usize {
        self.exercises.len() + self.sets.len()
    }
}
