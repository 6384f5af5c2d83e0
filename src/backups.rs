use std::collections::HashSet;

use anyhow::Result;
use time::OffsetDateTime;

use crate::console::{Console, Tone};
use crate::model::{BackupRef, Checkpoint, Outcome, backup_name};
use crate::vcs::Vcs;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(String),
    /// A branch with the generated name already exists; it was left alone.
    Skipped(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    Declined,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

/// Safety branches named `<prefix>-<timestamp>`.
pub struct BackupManager<'a> {
    vcs: &'a dyn Vcs,
    prefix: String,
    keep_last: usize,
}

impl<'a> BackupManager<'a> {
    pub fn new(vcs: &'a dyn Vcs, prefix: &str, keep_last: usize) -> Self {
        Self {
            vcs,
            prefix: prefix.to_string(),
            keep_last,
        }
    }

    pub fn create(&self, at: &Checkpoint) -> Result<CreateOutcome> {
        self.create_at(at, OffsetDateTime::now_utc())
    }

    pub fn create_at(&self, at: &Checkpoint, now: OffsetDateTime) -> Result<CreateOutcome> {
        let name = backup_name(&self.prefix, now);
        if self.vcs.branches()?.iter().any(|b| *b == name) {
            tracing::info!(%name, "backup already exists, skipping");
            return Ok(CreateOutcome::Skipped(name));
        }
        self.vcs.create_branch(&name, &at.id)?;
        tracing::info!(%name, at = %at.id, "created backup");
        Ok(CreateOutcome::Created(name))
    }

    /// Backups in the order git lists them.
    pub fn list(&self) -> Result<Vec<BackupRef>> {
        let lead = format!("{}-", self.prefix);
        Ok(self
            .vcs
            .branches()?
            .into_iter()
            .filter(|name| name.starts_with(&lead))
            .map(|name| BackupRef::from_name(&self.prefix, &name))
            .collect())
    }

    pub fn restore(&self, console: &mut dyn Console, backup: &BackupRef) -> Result<RestoreOutcome> {
        let question = format!(
            "Check out backup {}?\nHEAD will be detached at it; the backup branch itself is never moved.",
            backup.label()
        );
        if !console.confirm(&question, false)? {
            console.say(Tone::Info, "Restore cancelled.");
            return Ok(RestoreOutcome::Declined);
        }
        match self.vcs.checkout_detached(&backup.name) {
            Ok(()) => {
                tracing::info!(name = %backup.name, "restored backup");
                console.say(Tone::Success, &format!("Checked out {} (detached HEAD)", backup.name));
                Ok(RestoreOutcome::Restored)
            }
            Err(err) => {
                tracing::warn!(name = %backup.name, error = %format!("{:#}", err), "restore failed");
                console.say(
                    Tone::Error,
                    &format!("Could not restore {}: {:#}", backup.name, err),
                );
                Ok(RestoreOutcome::Failed)
            }
        }
    }

    /// Best effort: one failed deletion does not stop the rest. `None` when the user declines.
    pub fn delete(&self, console: &mut dyn Console, names: &[String]) -> Result<Option<DeleteReport>> {
        if names.is_empty() {
            return Ok(Some(DeleteReport::default()));
        }
        let question = format!(
            "Delete {} backup(s)? This cannot be undone.\n{}",
            names.len(),
            names.join("\n")
        );
        if !console.confirm(&question, false)? {
            console.say(Tone::Info, "Deletion cancelled.");
            return Ok(None);
        }

        let mut report = DeleteReport::default();
        for name in names {
            match self.vcs.delete_branch(name, true) {
                Ok(()) => {
                    tracing::info!(%name, "deleted backup");
                    console.say(Tone::Success, &format!("Deleted {}", name));
                    report.deleted.push(name.clone());
                }
                Err(err) => {
                    tracing::warn!(%name, error = %format!("{:#}", err), "delete failed");
                    console.say(
                        Tone::Warning,
                        &format!("Could not delete {}: {:#}", name, err),
                    );
                    report.failed.push(name.clone());
                }
            }
        }
        Ok(Some(report))
    }

    /// Everything older than the newest `keep_last` dated backups. Undated backups are never proposed.
    pub fn prune_candidates(&self, backups: &[BackupRef]) -> Vec<BackupRef> {
        let mut dated: Vec<&BackupRef> = backups.iter().filter(|b| b.created.is_some()).collect();
        dated.sort_by(|a, b| b.created.cmp(&a.created));
        let doomed: HashSet<&str> = dated
            .iter()
            .skip(self.keep_last)
            .map(|b| b.name.as_str())
            .collect();
        backups
            .iter()
            .filter(|b| doomed.contains(b.name.as_str()))
            .cloned()
            .collect()
    }

    /// The backup submenu. Returns after "back", a successful restore, or when no backups are left.
    pub fn manage(&self, console: &mut dyn Console) -> Result<Outcome> {
        loop {
            let backups = self.list()?;
            if backups.is_empty() {
                console.say(Tone::Info, "No backups found.");
                return Ok(Outcome::Continue);
            }

            let mut overview = format!("{} backup(s):", backups.len());
            for b in &backups {
                overview.push_str("\n  ");
                overview.push_str(&b.label());
            }
            console.say(Tone::Info, &overview);

            let actions = [
                "Restore a backup".to_string(),
                "Delete backups".to_string(),
                format!("Prune old backups (keep newest {})", self.keep_last),
                "Back".to_string(),
            ];
            let doomed = match console.select("Manage backups", &actions, Some(0))? {
                Some(0) => {
                    if self.pick_and_restore(console, &backups)? == RestoreOutcome::Restored {
                        return Ok(Outcome::Continue);
                    }
                    continue;
                }
                Some(1) => {
                    let labels: Vec<String> = backups.iter().map(BackupRef::label).collect();
                    match console.multi_select("Select backups to delete", &labels)? {
                        Some(picked) if !picked.is_empty() => picked
                            .into_iter()
                            .filter_map(|i| backups.get(i))
                            .map(|b| b.name.clone())
                            .collect::<Vec<_>>(),
                        _ => {
                            console.say(Tone::Info, "No backups selected.");
                            continue;
                        }
                    }
                }
                Some(2) => {
                    let candidates = self.prune_candidates(&backups);
                    if candidates.is_empty() {
                        console.say(Tone::Info, "Nothing to prune.");
                        continue;
                    }
                    candidates.into_iter().map(|b| b.name).collect()
                }
                _ => return Ok(Outcome::Continue),
            };

            if self.delete(console, &doomed)?.is_some() && self.list()?.is_empty() {
                console.say(Tone::Info, "No backups remain.");
                return Ok(Outcome::Continue);
            }
        }
    }

    fn pick_and_restore(
        &self,
        console: &mut dyn Console,
        backups: &[BackupRef],
    ) -> Result<RestoreOutcome> {
        let mut labels: Vec<String> = backups.iter().map(BackupRef::label).collect();
        labels.push("Cancel".to_string());
        match console.select("Select a backup to restore", &labels, Some(0))? {
            Some(i) if i < backups.len() => self.restore(console, &backups[i]),
            _ => Ok(RestoreOutcome::Declined),
        }
    }
}

