//! The shareable content model.
//!
//! `ShareableContent` is the closed set of things a user can attach to a
//! post or chat message. Storage-facing variants carry an opaque
//! [`Snapshot`] payload; the domain types themselves stay free of any
//! sharing concern and are converted by an explicit `share_*` adapter at
//! the moment the user picks them.

use crate::bundle::{
    CompletedModuleShareBundle, CompletedSetGroupShareBundle, ExerciseInstanceShareBundle,
    ExerciseShareBundle, HighlightedSet, HighlightsShareBundle, ModuleShareBundle,
    ProgramShareBundle, SessionShareBundle, SetGroupShareBundle, SetShareBundle,
    WorkoutShareBundle,
};
use crate::codec::{self, BundleKind, DecodedContent};
use crate::types::{
    CompletedModule, CompletedSetGroup, ExerciseInstance, Program, Session, SessionExercise,
    SetData, SetGroup, TrainingModule, Workout,
};
use crate::Result;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Snapshot Payload
// ============================================================================

/// Opaque payload bytes plus a memoized decode.
///
/// The first call to [`Snapshot::decoded`] runs the codec; every later
/// access within the same render pass is free. The cell is skipped during
/// serialization, so a freshly loaded snapshot always re-decodes once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    bytes: Vec<u8>,
    #[serde(skip)]
    decoded: OnceCell<DecodedContent>,
}

impl Snapshot {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            decoded: OnceCell::new(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode once, then hand out the cached result
    pub fn decoded(&self) -> &DecodedContent {
        self.decoded
            .get_or_init(|| codec::decode_content(&self.bytes))
    }
}

// Identity is the stored bytes; the cache is incidental state.
impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

// ============================================================================
// Shareable Content
// ============================================================================

/// What is being shared. Exactly one variant is active per value.
///
/// Variants with stable identity (Program/Workout/Module/Session) carry a
/// denormalized display header next to the payload so a list row can render
/// without decoding; value-only variants are fully described by their
/// payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShareableContent {
    Text {
        text: String,
    },
    Program {
        id: Uuid,
        name: String,
        payload: Snapshot,
    },
    Workout {
        id: Uuid,
        name: String,
        payload: Snapshot,
    },
    Module {
        id: Uuid,
        name: String,
        payload: Snapshot,
    },
    Session {
        id: Uuid,
        workout_name: String,
        date: DateTime<Utc>,
        payload: Snapshot,
    },
    Exercise {
        payload: Snapshot,
    },
    Set {
        payload: Snapshot,
    },
    CompletedModule {
        payload: Snapshot,
    },
    Highlights {
        payload: Snapshot,
    },
    ExerciseInstance {
        payload: Snapshot,
    },
    SetGroup {
        payload: Snapshot,
    },
    CompletedSetGroup {
        payload: Snapshot,
    },
    DecodeFailed {
        original_type: Option<String>,
    },
}

impl ShareableContent {
    /// The snapshot payload, for variants that carry one
    pub fn payload(&self) -> Option<&Snapshot> {
        match self {
            ShareableContent::Text { .. } | ShareableContent::DecodeFailed { .. } => None,
            ShareableContent::Program { payload, .. }
            | ShareableContent::Workout { payload, .. }
            | ShareableContent::Module { payload, .. }
            | ShareableContent::Session { payload, .. }
            | ShareableContent::Exercise { payload }
            | ShareableContent::Set { payload }
            | ShareableContent::CompletedModule { payload }
            | ShareableContent::Highlights { payload }
            | ShareableContent::ExerciseInstance { payload }
            | ShareableContent::SetGroup { payload }
            | ShareableContent::CompletedSetGroup { payload } => Some(payload),
        }
    }

    /// Decoded payload (memoized), for variants that carry one
    pub fn decoded(&self) -> Option<&DecodedContent> {
        self.payload().map(Snapshot::decoded)
    }

    /// The stable entity id, where the variant has one
    pub fn entity_id(&self) -> Option<Uuid> {
        match self {
            ShareableContent::Program { id, .. }
            | ShareableContent::Workout { id, .. }
            | ShareableContent::Module { id, .. }
            | ShareableContent::Session { id, .. } => Some(*id),
            _ => None,
        }
    }
}

// Identity is variant tag plus embedded id where present; value-only
// variants fall back to payload bytes.
impl PartialEq for ShareableContent {
    fn eq(&self, other: &Self) -> bool {
        use ShareableContent::*;
        match (self, other) {
            (Text { text: a }, Text { text: b }) => a == b,
            (Program { id: a, .. }, Program { id: b, .. })
            | (Workout { id: a, .. }, Workout { id: b, .. })
            | (Module { id: a, .. }, Module { id: b, .. })
            | (Session { id: a, .. }, Session { id: b, .. }) => a == b,
            (Exercise { payload: a }, Exercise { payload: b })
            | (Set { payload: a }, Set { payload: b })
            | (CompletedModule { payload: a }, CompletedModule { payload: b })
            | (Highlights { payload: a }, Highlights { payload: b })
            | (ExerciseInstance { payload: a }, ExerciseInstance { payload: b })
            | (SetGroup { payload: a }, SetGroup { payload: b })
            | (CompletedSetGroup { payload: a }, CompletedSetGroup { payload: b }) => a == b,
            (DecodeFailed { original_type: a }, DecodeFailed { original_type: b }) => a == b,
            _ => false,
        }
    }
}

// ============================================================================
// Adapters (domain type -> shareable content)
// ============================================================================

/// Share a plain text message
pub fn share_text(text: impl Into<String>) -> ShareableContent {
    ShareableContent::Text { text: text.into() }
}

/// Share a training program
pub fn share_program(program: &Program) -> Result<ShareableContent> {
    let bundle = ProgramShareBundle {
        program: program.clone(),
    };
    Ok(ShareableContent::Program {
        id: program.id,
        name: program.name.clone(),
        payload: Snapshot::new(codec::encode(BundleKind::Program, &bundle)?),
    })
}

/// Share a workout template
pub fn share_workout(workout: &Workout) -> Result<ShareableContent> {
    let bundle = WorkoutShareBundle {
        workout: workout.clone(),
    };
    Ok(ShareableContent::Workout {
        id: workout.id,
        name: workout.name.clone(),
        payload: Snapshot::new(codec::encode(BundleKind::Workout, &bundle)?),
    })
}

/// Share a training module (program phase)
pub fn share_module(module: &TrainingModule) -> Result<ShareableContent> {
    let bundle = ModuleShareBundle {
        module: module.clone(),
    };
    Ok(ShareableContent::Module {
        id: module.id,
        name: module.name.clone(),
        payload: Snapshot::new(codec::encode(BundleKind::Module, &bundle)?),
    })
}

/// Share a whole completed session, no highlights
pub fn share_session(session: &Session, distance_unit: &str) -> Result<ShareableContent> {
    share_session_with_highlights(session, None, None, distance_unit)
}

/// Share a completed session, optionally embedding picked highlights
pub fn share_session_with_highlights(
    session: &Session,
    highlighted_exercise_ids: Option<Vec<Uuid>>,
    highlighted_set_ids: Option<HashMap<Uuid, Vec<Uuid>>>,
    distance_unit: &str,
) -> Result<ShareableContent> {
    let bundle = SessionShareBundle {
        session: session.clone(),
        workout_name: session.workout_name.clone(),
        date: session.performed_at,
        highlighted_exercise_ids,
        highlighted_set_ids,
        distance_unit: distance_unit.to_string(),
    };
    Ok(ShareableContent::Session {
        id: session.id,
        workout_name: session.workout_name.clone(),
        date: session.performed_at,
        payload: Snapshot::new(codec::encode(BundleKind::Session, &bundle)?),
    })
}

/// Share one performed exercise
pub fn share_exercise(
    exercise: &SessionExercise,
    workout_name: Option<&str>,
    distance_unit: &str,
) -> Result<ShareableContent> {
    let bundle = ExerciseShareBundle {
        exercise: exercise.clone(),
        workout_name: workout_name.map(str::to_string),
        distance_unit: distance_unit.to_string(),
    };
    Ok(ShareableContent::Exercise {
        payload: Snapshot::new(codec::encode(BundleKind::Exercise, &bundle)?),
    })
}

/// Share one performed set. `is_pr` comes from the caller's history check.
pub fn share_set(
    exercise_name: &str,
    set: &SetData,
    is_pr: bool,
    distance_unit: &str,
) -> Result<ShareableContent> {
    let bundle = SetShareBundle {
        exercise_name: exercise_name.to_string(),
        set: set.clone(),
        is_pr,
        distance_unit: distance_unit.to_string(),
    };
    Ok(ShareableContent::Set {
        payload: Snapshot::new(codec::encode(BundleKind::Set, &bundle)?),
    })
}

/// Share a completed module from a session
pub fn share_completed_module(
    module: &CompletedModule,
    workout_name: Option<&str>,
    date: DateTime<Utc>,
    distance_unit: &str,
) -> Result<ShareableContent> {
    let bundle = CompletedModuleShareBundle {
        module: module.clone(),
        workout_name: workout_name.map(str::to_string),
        date,
        distance_unit: distance_unit.to_string(),
    };
    Ok(ShareableContent::CompletedModule {
        payload: Snapshot::new(codec::encode(BundleKind::CompletedModule, &bundle)?),
    })
}

/// Share a picked-highlights bundle
pub fn share_highlights(
    session: &Session,
    exercises: Vec<SessionExercise>,
    sets: Vec<HighlightedSet>,
    distance_unit: &str,
) -> Result<ShareableContent> {
    let bundle = HighlightsShareBundle {
        session_id: session.id,
        workout_name: session.workout_name.clone(),
        date: session.performed_at,
        exercises,
        sets,
        distance_unit: distance_unit.to_string(),
    };
    Ok(ShareableContent::Highlights {
        payload: Snapshot::new(codec::encode(BundleKind::Highlights, &bundle)?),
    })
}

/// Share an exercise slot from a workout template
pub fn share_exercise_instance(
    instance: &ExerciseInstance,
    workout_name: Option<&str>,
) -> Result<ShareableContent> {
    let bundle = ExerciseInstanceShareBundle {
        instance: instance.clone(),
        workout_name: workout_name.map(str::to_string),
    };
    Ok(ShareableContent::ExerciseInstance {
        payload: Snapshot::new(codec::encode(BundleKind::ExerciseInstance, &bundle)?),
    })
}

/// Share a prescribed set group from a workout template
pub fn share_set_group(group: &SetGroup, exercise_name: &str) -> Result<ShareableContent> {
    let bundle = SetGroupShareBundle {
        group: group.clone(),
        exercise_name: exercise_name.to_string(),
    };
    Ok(ShareableContent::SetGroup {
        payload: Snapshot::new(codec::encode(BundleKind::SetGroup, &bundle)?),
    })
}

/// Share one performed set group
pub fn share_completed_set_group(
    group: &CompletedSetGroup,
    exercise_name: &str,
    distance_unit: &str,
) -> Result<ShareableContent> {
    let bundle = CompletedSetGroupShareBundle {
        group: group.clone(),
        exercise_name: exercise_name.to_string(),
        distance_unit: distance_unit.to_string(),
    };
    Ok(ShareableContent::CompletedSetGroup {
        payload: Snapshot::new(codec::encode(BundleKind::CompletedSetGroup, &bundle)?),
    })
}
