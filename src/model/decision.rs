#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetMode {
    /// Moves the branch but keeps working changes.
    Soft,
    /// Moves the branch and discards working changes.
    Hard,
}

impl ResetMode {
    pub fn flag(self) -> &'static str {
        match self {
            ResetMode::Soft => "--soft",
            ResetMode::Hard => "--hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResetMode::Soft => "safe (soft)",
            ResetMode::Hard => "hard",
        }
    }
}

/// What to do with the working tree before a reset. Decided per navigation, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetDecision {
    Abort,
    Soft { stashed: bool },
    Hard,
}

impl ResetDecision {
    pub fn mode(self) -> Option<ResetMode> {
        match self {
            ResetDecision::Abort => None,
            ResetDecision::Soft { .. } => Some(ResetMode::Soft),
            ResetDecision::Hard => Some(ResetMode::Hard),
        }
    }
}

/// Result of one menu step; the main loop decides whether to prompt again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Cancelled,
    Exit,
}
