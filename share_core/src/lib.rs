#![forbid(unsafe_code)]

//! Core content-sharing model for the Repshare social module.
//!
//! This crate provides:
//! - Domain types (sessions, modules, exercises, sets, catalog templates)
//! - The shareable content model and per-domain share adapters
//! - Snapshot codec (lenient, failure-is-a-state decoding)
//! - Set-type classification and summary formatting
//! - Highlight selection for sharing parts of a session
//! - Social surface types (posts, messages, profiles)
//! - Local share outbox and badge counts

pub mod types;
pub mod error;
pub mod bundle;
pub mod codec;
pub mod content;
pub mod classify;
pub mod format;
pub mod highlight;
pub mod social;
pub mod badges;
pub mod outbox;
pub mod config;
pub mod logging;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use bundle::*;
pub use codec::{decode, decode_content, encode, BundleKind, DecodeError, DecodedContent};
pub use content::{
    share_completed_module, share_completed_set_group, share_exercise, share_exercise_instance,
    share_highlights, share_module, share_program, share_session, share_session_with_highlights,
    share_set, share_set_group, share_text, share_workout, ShareableContent, Snapshot,
};
pub use classify::{classify, classify_set, SetKind};
pub use format::{describe, describe_content, ContentSummary, Icon};
pub use highlight::{HighlightSelection, MAX_HIGHLIGHTS};
pub use social::{Conversation, Message, Post, UserProfile};
pub use badges::{BadgeCounts, BadgeStore};
pub use config::Config;
pub use outbox::{read_records, JsonlOutbox, ShareRecord, ShareSink};
