use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use crate::model::RewindConfig;
use crate::store::{StateDir, UndoJournal};
use crate::vcs::GitCli;

/// Settings resolved once at startup and handed to each component.
#[derive(Clone, Debug)]
pub struct Context {
    pub workdir: PathBuf,
    pub state: StateDir,
    pub config: RewindConfig,
}

impl Context {
    /// Reads `.rewind/config.json` if present; writes nothing.
    pub fn load(workdir: &Path) -> Result<Self> {
        let state = StateDir::at(workdir);
        let config = state.read_config()?;
        Ok(Self {
            workdir: workdir.to_path_buf(),
            state,
            config,
        })
    }

    pub fn journal(&self) -> UndoJournal {
        UndoJournal::new(self.state.journal_path(), self.config.journal_capacity)
    }

    pub fn git(&self) -> GitCli {
        GitCli::new(
            &self.workdir,
            Duration::from_secs(self.config.git_timeout_secs),
        )
        .with_pull_target(self.config.remote.clone(), self.config.branch.clone())
    }
}
