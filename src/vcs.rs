use anyhow::Result;

use crate::model::{ChangedPath, Checkpoint, ResetMode};

mod git;
mod parse;

pub use self::git::GitCli;
pub use self::parse::{LOG_FORMAT, parse_branch_list, parse_log, parse_status};

/// Everything the navigator asks of the underlying version-control system.
///
/// Calls are blocking and issued one at a time.
pub trait Vcs {
    /// Newest first, at most `limit` entries. Empty when the repository has no commits.
    fn recent(&self, limit: usize) -> Result<Vec<Checkpoint>>;

    fn current(&self) -> Result<Checkpoint>;

    /// `None` when `id` no longer names a commit.
    fn lookup(&self, id: &str) -> Result<Option<Checkpoint>>;

    fn changed_paths(&self) -> Result<Vec<ChangedPath>>;

    fn reset(&self, target: &str, mode: ResetMode) -> Result<()>;

    fn stash(&self, message: &str) -> Result<()>;

    /// Returns git's own summary of what was pulled.
    fn pull(&self) -> Result<String>;

    fn create_branch(&self, name: &str, at: &str) -> Result<()>;

    fn branches(&self) -> Result<Vec<String>>;

    fn delete_branch(&self, name: &str, force: bool) -> Result<()>;

    /// Detaches HEAD at `name`, so later resets never move the named branch.
    fn checkout_detached(&self, name: &str) -> Result<()>;
}
