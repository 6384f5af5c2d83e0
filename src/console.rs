use anyhow::Result;

mod keys;
mod terminal;

pub use self::keys::{KeyOutcome, SelectState, confirm_key};
pub use self::terminal::TerminalConsole;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// Interactive prompts plus status output. Every prompt blocks until answered.
pub trait Console {
    /// Index of the chosen entry, or `None` when the user backs out.
    fn select(&mut self, message: &str, choices: &[String], default: Option<usize>)
    -> Result<Option<usize>>;

    /// Indices of the checked entries in display order, or `None` when the user backs out.
    fn multi_select(&mut self, message: &str, choices: &[String]) -> Result<Option<Vec<usize>>>;

    /// Backing out counts as "no".
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    fn say(&mut self, tone: Tone, text: &str);
}
