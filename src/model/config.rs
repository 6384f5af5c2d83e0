use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewindConfig {
    pub version: u32,

    /// Maximum number of entries kept in `history.json`.
    pub journal_capacity: usize,

    /// How many commits the "select" menu offers.
    pub recent_limit: usize,

    pub backup_prefix: String,

    /// Newest backups kept by "prune".
    pub backup_keep_last: usize,

    pub git_timeout_secs: u64,

    /// Optional `git pull <remote> [<branch>]` arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Default for RewindConfig {
    fn default() -> Self {
        Self {
            version: 1,
            journal_capacity: 20,
            recent_limit: 15,
            backup_prefix: "rewind-backup".to_string(),
            backup_keep_last: 5,
            git_timeout_secs: 120,
            remote: None,
            branch: None,
        }
    }
}

impl RewindConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            bail!("unsupported config version {}", self.version);
        }
        if self.journal_capacity == 0 {
            bail!("journal_capacity must be at least 1");
        }
        if self.recent_limit == 0 {
            bail!("recent_limit must be at least 1");
        }
        let prefix = self.backup_prefix.trim();
        if prefix.is_empty() || prefix != self.backup_prefix {
            bail!("backup_prefix must be non-empty and free of surrounding whitespace");
        }
        if self.backup_prefix.chars().any(|c| c.is_whitespace() || c == '~' || c == ':') {
            bail!("backup_prefix {:?} is not a valid branch name prefix", self.backup_prefix);
        }
        if self.git_timeout_secs == 0 {
            bail!("git_timeout_secs must be at least 1");
        }
        if self.branch.is_some() && self.remote.is_none() {
            bail!("branch is set but remote is not");
        }
        Ok(())
    }
}
