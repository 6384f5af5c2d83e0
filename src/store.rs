use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::RewindConfig;

mod journal;
mod lock;

pub use self::journal::{JournalError, UndoJournal, push_bounded};
pub use self::lock::SessionLock;

const STATE_DIR: &str = ".rewind";

/// The `.rewind` directory next to the repository's working tree.
#[derive(Clone, Debug)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    pub fn state_dir(workdir: &Path) -> PathBuf {
        workdir.join(STATE_DIR)
    }

    /// Does not touch the filesystem; files are created when first written.
    pub fn at(workdir: &Path) -> Self {
        Self {
            root: Self::state_dir(workdir),
        }
    }

    pub fn open(workdir: &Path) -> Result<Self> {
        let dir = Self::at(workdir);
        fs::create_dir_all(&dir.root)
            .with_context(|| format!("create {}", dir.root.display()))?;
        // Keep our own files out of `git status`, or every tree would look dirty.
        let ignore = dir.root.join(".gitignore");
        if !ignore.exists() {
            write_atomic(&ignore, b"*\n").context("write .gitignore")?;
        }
        Ok(dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn journal_path(&self) -> PathBuf {
        self.root.join("history.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join("rewind.log")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join("lock")
    }

    pub fn read_config(&self) -> Result<RewindConfig> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(RewindConfig::default());
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: RewindConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid {}", path.display()))?;
        Ok(cfg)
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
