mod backup;
mod checkpoint;
mod config;
mod decision;

pub use self::backup::{BackupRef, backup_name, parse_backup_timestamp};
pub use self::checkpoint::{ChangedPath, Checkpoint};
pub use self::config::RewindConfig;
pub use self::decision::{Outcome, ResetDecision, ResetMode};
