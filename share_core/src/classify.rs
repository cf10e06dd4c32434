//! Display sub-type classification from raw set data.
//!
//! Stored sets do not always carry an authoritative exercise type, so the
//! summary layer infers one from which measurement fields are populated.
//! Rules run first-match-wins; the order is a deliberate tie-break policy
//! (a set with both a hold time and a rep count classifies isometric), not
//! incidental.

use crate::types::SetData;
use serde::{Deserialize, Serialize};

/// Display sub-type of an exercise, inferred from its sets.
///
/// `Band` is a strength sub-variant flagged by resistance-band metadata
/// rather than free weight.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    Strength,
    Cardio,
    Isometric,
    Band,
    Unknown,
}

/// Classify one exercise from its ordered sets.
///
/// The representative set is the first completed one (first overall when
/// nothing is completed yet). Empty input is `Unknown`.
pub fn classify(sets: &[SetData]) -> SetKind {
    let representative = sets.iter().find(|s| s.completed).or_else(|| sets.first());
    match representative {
        Some(set) => classify_set(set),
        None => SetKind::Unknown,
    }
}

/// Classify a single set (set-level sharing)
pub fn classify_set(set: &SetData) -> SetKind {
    // 1. A positive hold time wins outright, even when reps are also set.
    if set.hold_time_seconds.unwrap_or(0) > 0 {
        return SetKind::Isometric;
    }

    // 2. Time or distance without a rep count reads as cardio.
    let has_duration = set.duration_seconds.unwrap_or(0) > 0;
    let has_distance = set.distance.unwrap_or(0.0) > 0.0;
    if (has_duration || has_distance) && set.reps.unwrap_or(0) == 0 {
        return SetKind::Cardio;
    }

    // 3. Band metadata marks the strength sub-variant.
    if set.band_color.as_deref().is_some_and(|c| !c.is_empty()) {
        return SetKind::Band;
    }

    // 4. Any weight or rep count means plain strength.
    if set.weight.is_some() || set.reps.is_some() {
        return SetKind::Strength;
    }

    SetKind::Unknown
}
