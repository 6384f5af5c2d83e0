use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::model::Checkpoint;

use super::write_atomic;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Bounded on-disk list of commit ids we navigated away from, oldest first.
#[derive(Clone, Debug)]
pub struct UndoJournal {
    path: PathBuf,
    capacity: usize,
}

impl UndoJournal {
    pub fn new(path: PathBuf, capacity: usize) -> Self {
        Self {
            path,
            capacity: capacity.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// A missing file is an empty journal; anything else that fails is reported.
    pub fn try_load(&self) -> Result<Vec<String>, JournalError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(JournalError::Unreadable {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| JournalError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Unreadable or corrupt state counts as no history.
    pub fn load(&self) -> Vec<String> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(error = %err, "treating undo journal as empty");
                Vec::new()
            }
        }
    }

    /// Appends `checkpoint`, evicting from the head so at most `capacity` entries remain.
    pub fn record(&self, checkpoint: &Checkpoint) -> Result<()> {
        let mut entries = self.load();
        let evicted = push_bounded(&mut entries, checkpoint.id.clone(), self.capacity);
        let bytes = serde_json::to_vec_pretty(&entries).context("serialize undo journal")?;
        write_atomic(&self.path, &bytes)
            .with_context(|| format!("write {}", self.path.display()))?;
        tracing::info!(
            id = %checkpoint.id,
            len = entries.len(),
            evicted,
            "recorded position in undo journal"
        );
        Ok(())
    }
}

/// Returns how many entries were evicted.
pub fn push_bounded(entries: &mut Vec<String>, id: String, capacity: usize) -> usize {
    let capacity = capacity.max(1);
    let evict = (entries.len() + 1).saturating_sub(capacity);
    entries.drain(..evict.min(entries.len()));
    entries.push(id);
    evict
}

#[cfg(test)]
#[path = "../tests/store/journal_tests.rs"]
mod tests;
