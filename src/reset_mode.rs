use anyhow::Result;

use crate::console::{Console, Tone};
use crate::model::{ChangedPath, ResetDecision};
use crate::vcs::Vcs;

pub const STASH_MESSAGE: &str = "rewind: changes saved before navigating";

const CLEAN_CHOICES: [&str; 2] = [
    "Safe: keep the newer changes staged (soft reset)",
    "Hard: make files match the target exactly (hard reset)",
];

const DIRTY_STASH: usize = 0;
const DIRTY_CANCEL: usize = 1;
const DIRTY_HARD: usize = 2;
const DIRTY_CHOICES: [&str; 3] = [
    "Stash my changes, then reset safely",
    "Cancel",
    "Discard changes to tracked files (hard reset; untracked files are kept)",
];

/// Classifies how the working tree should be treated. Only a stash can happen here;
/// backups and the reset itself are up to the caller.
pub fn resolve(vcs: &dyn Vcs, console: &mut dyn Console) -> Result<ResetDecision> {
    let changes = vcs.changed_paths()?;
    let decision = if changes.is_empty() {
        resolve_clean(console)?
    } else {
        resolve_dirty(vcs, console, &changes)?
    };
    tracing::info!(?decision, changed = changes.len(), "resolved reset mode");
    Ok(decision)
}

fn resolve_clean(console: &mut dyn Console) -> Result<ResetDecision> {
    let choices: Vec<String> = CLEAN_CHOICES.iter().map(|c| c.to_string()).collect();
    Ok(
        match console.select("How should the reset treat your files?", &choices, Some(0))? {
            Some(0) => ResetDecision::Soft { stashed: false },
            Some(_) => ResetDecision::Hard,
            None => ResetDecision::Abort,
        },
    )
}

fn resolve_dirty(
    vcs: &dyn Vcs,
    console: &mut dyn Console,
    changes: &[ChangedPath],
) -> Result<ResetDecision> {
    let mut listing = "You have uncommitted changes:".to_string();
    for change in changes {
        listing.push_str("\n  ");
        listing.push_str(&change.display());
    }
    console.say(Tone::Warning, &listing);

    let choices: Vec<String> = DIRTY_CHOICES.iter().map(|c| c.to_string()).collect();
    match console.select(
        "What should happen to these changes?",
        &choices,
        Some(DIRTY_CANCEL),
    )? {
        Some(DIRTY_STASH) => {
            vcs.stash(STASH_MESSAGE)?;
            console.say(
                Tone::Info,
                "Changes stashed. Bring them back later with `git stash pop`.",
            );
            Ok(ResetDecision::Soft { stashed: true })
        }
        Some(DIRTY_HARD) => Ok(ResetDecision::Hard),
        _ => Ok(ResetDecision::Abort),
    }
}
