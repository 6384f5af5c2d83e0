use anyhow::Result;

use crate::backups::{BackupManager, CreateOutcome};
use crate::console::{Console, Tone};
use crate::model::{Checkpoint, Outcome, ResetMode};
use crate::reset_mode;
use crate::store::UndoJournal;
use crate::vcs::Vcs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Undo,
    Select,
    Journal,
    ManageBackups,
    Sync,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Undo,
        MenuAction::Select,
        MenuAction::Journal,
        MenuAction::ManageBackups,
        MenuAction::Sync,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Undo => "Undo: go back to the previous commit (one step back)",
            MenuAction::Select => "Select from a list of recent commits",
            MenuAction::Journal => "Return to a position you left earlier",
            MenuAction::ManageBackups => "Manage safety backups",
            MenuAction::Sync => "Sync with remote (git pull)",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Top-level menu loop tying history, journal, reset mode and backups together.
pub struct Navigator<'a> {
    vcs: &'a dyn Vcs,
    journal: &'a UndoJournal,
    backups: BackupManager<'a>,
    recent_limit: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(
        vcs: &'a dyn Vcs,
        journal: &'a UndoJournal,
        backups: BackupManager<'a>,
        recent_limit: usize,
    ) -> Self {
        Self {
            vcs,
            journal,
            backups,
            recent_limit: recent_limit.max(1),
        }
    }

    /// Prompts until the user exits. Failures inside a step are shown and the menu comes back.
    pub fn run(&self, console: &mut dyn Console) -> Result<()> {
        let labels: Vec<String> = MenuAction::ALL
            .iter()
            .map(|a| a.label().to_string())
            .collect();
        loop {
            let action = match console.select("What do you want to do?", &labels, Some(0))? {
                Some(i) => MenuAction::ALL.get(i).copied().unwrap_or(MenuAction::Exit),
                None => MenuAction::Exit,
            };
            match self.step(console, action) {
                Ok(Outcome::Exit) => return Ok(()),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(?action, error = %format!("{:#}", err), "menu step failed");
                    console.say(Tone::Error, &format!("{:#}", err));
                }
            }
        }
    }

    pub fn step(&self, console: &mut dyn Console, action: MenuAction) -> Result<Outcome> {
        let target = match action {
            MenuAction::Undo => self.previous_checkpoint(console)?,
            MenuAction::Select => self.pick_recent(console)?,
            MenuAction::Journal => self.pick_from_journal(console)?,
            MenuAction::ManageBackups => return self.backups.manage(console),
            MenuAction::Sync => return Ok(self.sync(console)),
            MenuAction::Exit => return Ok(Outcome::Exit),
        };
        match target {
            Some(target) => self.transition(console, &target),
            None => Ok(Outcome::Cancelled),
        }
    }

    fn previous_checkpoint(&self, console: &mut dyn Console) -> Result<Option<Checkpoint>> {
        let mut log = self.vcs.recent(2)?;
        if log.len() < 2 {
            console.say(Tone::Info, "No previous commit to go back to.");
            return Ok(None);
        }
        let previous = log.swap_remove(1);
        console.say(Tone::Info, &format!("Previous commit: {}", previous.label()));
        Ok(Some(previous))
    }

    fn pick_recent(&self, console: &mut dyn Console) -> Result<Option<Checkpoint>> {
        let log = self.vcs.recent(self.recent_limit)?;
        if log.is_empty() {
            console.say(Tone::Info, "No commits to choose from.");
            return Ok(None);
        }
        pick(console, "Select a commit to reset to:", log)
    }

    fn pick_from_journal(&self, console: &mut dyn Console) -> Result<Option<Checkpoint>> {
        let entries = self.journal.load();
        if entries.is_empty() {
            console.say(Tone::Info, "No earlier positions recorded yet.");
            return Ok(None);
        }

        let mut known = Vec::new();
        let mut missing = 0;
        for id in entries.iter().rev() {
            match self.vcs.lookup(id) {
                Ok(Some(checkpoint)) => known.push(checkpoint),
                Ok(None) => missing += 1,
                Err(err) => {
                    tracing::debug!(%id, error = %format!("{:#}", err), "journal lookup failed");
                    missing += 1;
                }
            }
        }
        if missing > 0 {
            console.say(
                Tone::Info,
                &format!("{} recorded position(s) no longer exist and are hidden.", missing),
            );
        }
        if known.is_empty() {
            return Ok(None);
        }
        pick(console, "Select a position to return to (newest first):", known)
    }

    /// Shared tail of every navigation: journal, reset mode, backup, confirmation, reset.
    pub fn transition(&self, console: &mut dyn Console, target: &Checkpoint) -> Result<Outcome> {
        let current = self.vcs.current()?;

        // Recorded before anything is asked, so cancelled attempts are journaled too.
        if let Err(err) = self.journal.record(&current) {
            tracing::warn!(error = %format!("{:#}", err), "could not record undo journal entry");
            console.say(
                Tone::Warning,
                &format!("Could not update the undo journal: {:#}", err),
            );
        }

        let decision = reset_mode::resolve(self.vcs, console)?;
        let Some(mode) = decision.mode() else {
            console.say(Tone::Info, "Cancelled. Nothing was changed.");
            return Ok(Outcome::Cancelled);
        };

        if mode == ResetMode::Hard {
            match self.backups.create(&current)? {
                CreateOutcome::Created(name) => console.say(
                    Tone::Info,
                    &format!("Backup of {} saved as {}", current.short_id(), name),
                ),
                CreateOutcome::Skipped(name) => console.say(
                    Tone::Info,
                    &format!("Backup {} already exists; not creating another.", name),
                ),
            }
        }

        let question = format!(
            "This will reset your repo to commit:\n{}\nMode: {}\nProceed?",
            target.label(),
            mode.label()
        );
        if !console.confirm(&question, false)? {
            console.say(Tone::Info, "Aborted.");
            return Ok(Outcome::Cancelled);
        }

        self.vcs.reset(&target.id, mode)?;
        tracing::info!(from = %current.id, to = %target.id, ?mode, "reset repository");
        console.say(
            Tone::Success,
            &format!("Repository reset to {} ({})", target.short_id(), mode.label()),
        );
        Ok(Outcome::Continue)
    }

    fn sync(&self, console: &mut dyn Console) -> Outcome {
        match self.vcs.pull() {
            Ok(summary) => {
                tracing::info!("pulled from remote");
                console.say(Tone::Success, "Synced with remote.");
                if !summary.is_empty() {
                    console.say(Tone::Info, &summary);
                }
            }
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "pull failed");
                console.say(Tone::Error, &format!("Sync failed: {:#}", err));
            }
        }
        Outcome::Continue
    }
}

/// Lists `options` plus a trailing "Cancel".
fn pick(
    console: &mut dyn Console,
    message: &str,
    mut options: Vec<Checkpoint>,
) -> Result<Option<Checkpoint>> {
    let mut labels: Vec<String> = options.iter().map(Checkpoint::label).collect();
    labels.push("Cancel".to_string());
    match console.select(message, &labels, Some(0))? {
        Some(i) if i < options.len() => Ok(Some(options.swap_remove(i))),
        _ => Ok(None),
    }
}
