//! Snapshot codec: opaque payload bytes in, typed bundles out.
//!
//! A snapshot is a JSON envelope `{"type": ..., "v": ..., "data": {...}}`.
//! Decoding is lenient: unknown fields inside `data` are ignored, unknown
//! type tags and malformed bytes come back as in-band failures, never a
//! panic. Untrusted payloads (content shared by another user) are the
//! primary threat model here.
//!
//! `decode_content` is the single decode dispatch point; call sites must not
//! re-implement per-kind decoding.

use crate::bundle::{
    CompletedModuleShareBundle, CompletedSetGroupShareBundle, ExerciseInstanceShareBundle,
    ExerciseShareBundle, HighlightsShareBundle, ModuleShareBundle, ProgramShareBundle,
    SessionShareBundle, SetGroupShareBundle, SetShareBundle, WorkoutShareBundle,
};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current snapshot envelope version. Schemas are additive-only, so readers
/// never gate on this; it exists for forensic value in stored payloads.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The closed set of bundle type tags written into snapshot envelopes
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    Program,
    Workout,
    Module,
    Session,
    Exercise,
    Set,
    CompletedModule,
    Highlights,
    ExerciseInstance,
    SetGroup,
    CompletedSetGroup,
}

impl BundleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BundleKind::Program => "program",
            BundleKind::Workout => "workout",
            BundleKind::Module => "module",
            BundleKind::Session => "session",
            BundleKind::Exercise => "exercise",
            BundleKind::Set => "set",
            BundleKind::CompletedModule => "completed_module",
            BundleKind::Highlights => "highlights",
            BundleKind::ExerciseInstance => "exercise_instance",
            BundleKind::SetGroup => "set_group",
            BundleKind::CompletedSetGroup => "completed_set_group",
        }
    }
}

/// Typed decode failure.
///
/// Render boundaries recover from this locally (the `DecodeFailed` content
/// variant); it never propagates through a view layer as a panic.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not a valid snapshot envelope
    #[error("payload is not a valid snapshot envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The envelope carries a type tag we do not recognize
    #[error("unknown content kind `{0}`")]
    UnknownKind(String),

    /// The envelope parsed but its data does not match the bundle schema
    #[error("malformed `{kind}` bundle: {source}")]
    Bundle {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// The original type name carried by the payload, when it parsed far
    /// enough to have one
    pub fn original_type(&self) -> Option<&str> {
        match self {
            DecodeError::Envelope(_) => None,
            DecodeError::UnknownKind(kind) => Some(kind),
            DecodeError::Bundle { kind, .. } => Some(kind),
        }
    }
}

/// Snapshot envelope. `kind` stays a plain string so payloads written by a
/// newer app version still parse far enough to report their type name.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    v: u32,
    data: serde_json::Value,
}

/// A decoded snapshot, one variant per bundle schema.
///
/// Decode failure is a first-class state, not an error path: feed cards and
/// chat bubbles render `Failed` as a stable placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedContent {
    Program(ProgramShareBundle),
    Workout(WorkoutShareBundle),
    Module(ModuleShareBundle),
    Session(SessionShareBundle),
    Exercise(ExerciseShareBundle),
    Set(SetShareBundle),
    CompletedModule(CompletedModuleShareBundle),
    Highlights(HighlightsShareBundle),
    ExerciseInstance(ExerciseInstanceShareBundle),
    SetGroup(SetGroupShareBundle),
    CompletedSetGroup(CompletedSetGroupShareBundle),
    Failed { original_type: Option<String> },
}

impl DecodedContent {
    pub fn is_failed(&self) -> bool {
        matches!(self, DecodedContent::Failed { .. })
    }
}

/// Serialize a bundle into snapshot payload bytes
pub fn encode<T: Serialize>(kind: BundleKind, bundle: &T) -> Result<Vec<u8>> {
    let envelope = Envelope {
        kind: kind.as_str().to_string(),
        v: SNAPSHOT_VERSION,
        data: serde_json::to_value(bundle)?,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode snapshot bytes into one known bundle type.
///
/// Used where the caller already knows the schema (round-trips, typed
/// render paths). Rendering call sites that take arbitrary payloads should
/// go through [`decode_content`] instead.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, DecodeError> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(DecodeError::Envelope)?;
    serde_json::from_value(envelope.data).map_err(|e| DecodeError::Bundle {
        kind: envelope.kind,
        source: e,
    })
}

/// Decode arbitrary snapshot bytes, dispatching on the envelope's type tag.
///
/// Never fails out-of-band: malformed or unrecognized payloads come back as
/// `DecodedContent::Failed` carrying the original type name when known.
pub fn decode_content(bytes: &[u8]) -> DecodedContent {
    let envelope: Envelope = match serde_json::from_slice(bytes) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("Snapshot envelope did not parse: {}", e);
            return DecodedContent::Failed {
                original_type: None,
            };
        }
    };

    let kind = envelope.kind;
    let data = envelope.data;

    fn dispatch<T, F>(kind: &str, data: serde_json::Value, wrap: F) -> DecodedContent
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> DecodedContent,
    {
        match serde_json::from_value(data) {
            Ok(bundle) => wrap(bundle),
            Err(e) => {
                tracing::warn!("Malformed `{}` bundle: {}", kind, e);
                DecodedContent::Failed {
                    original_type: Some(kind.to_string()),
                }
            }
        }
    }

    match kind.as_str() {
        "program" => dispatch(&kind, data, DecodedContent::Program),
        "workout" => dispatch(&kind, data, DecodedContent::Workout),
        "module" => dispatch(&kind, data, DecodedContent::Module),
        "session" => dispatch(&kind, data, DecodedContent::Session),
        "exercise" => dispatch(&kind, data, DecodedContent::Exercise),
        "set" => dispatch(&kind, data, DecodedContent::Set),
        "completed_module" => dispatch(&kind, data, DecodedContent::CompletedModule),
        "highlights" => dispatch(&kind, data, DecodedContent::Highlights),
        "exercise_instance" => dispatch(&kind, data, DecodedContent::ExerciseInstance),
        "set_group" => dispatch(&kind, data, DecodedContent::SetGroup),
        "completed_set_group" => dispatch(&kind, data, DecodedContent::CompletedSetGroup),
        _ => {
            tracing::warn!("Unknown content kind `{}` in snapshot", kind);
            DecodedContent::Failed {
                original_type: Some(kind),
            }
        }
    }
}
