//! Local share outbox.
//!
//! Composed shares are appended to a JSONL (JSON Lines) file with file
//! locking so concurrent writers stay safe. Read-back is lenient: a corrupt
//! line is skipped with a warning so the feed still renders when one record
//! is bad.

use crate::content::ShareableContent;
use crate::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One composed share, as stored in the outbox
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShareRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub content: ShareableContent,
}

impl ShareRecord {
    pub fn new(content: ShareableContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            content,
        }
    }
}

/// Sink for persisting composed shares
pub trait ShareSink {
    fn append(&mut self, record: &ShareRecord) -> Result<()>;
}

/// JSONL-based share sink with file locking
pub struct JsonlOutbox {
    path: PathBuf,
}

impl JsonlOutbox {
    /// Create a new outbox sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl ShareSink for JsonlOutbox {
    fn append(&mut self, record: &ShareRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        // Serialize before taking the lock so a bad record never holds it.
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        file.unlock()?;

        tracing::debug!("Appended share {} to outbox", record.id);
        Ok(())
    }
}

/// Read all shares from an outbox file, newest last.
///
/// Corrupt lines are skipped; they surface in the feed only through the
/// records that do parse.
pub fn read_records(path: &Path) -> Result<Vec<ShareRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ShareRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse share at line {}: {}", line_num + 1, e);
                // Keep reading, don't fail the whole feed
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} shares from outbox", records.len());
    Ok(records)
}
