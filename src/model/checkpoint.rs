use serde::{Deserialize, Serialize};

const SHORT_ID_LEN: usize = 7;

/// A commit as reported by the history provider. Never mutated after it is read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    /// Author date, RFC 3339 (`git log --format=%aI`).
    pub date: String,
    pub summary: String,
}

impl Checkpoint {
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    pub fn day(&self) -> &str {
        match self.date.char_indices().nth(10) {
            Some((idx, _)) => &self.date[..idx],
            None => &self.date,
        }
    }

    /// `abc1234 | 2024-05-01 | summary`
    pub fn label(&self) -> String {
        format!("{} | {} | {}", self.short_id(), self.day(), self.summary)
    }
}

/// One line of `git status --porcelain`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangedPath {
    pub code: String,
    pub path: String,
}

impl ChangedPath {
    pub fn display(&self) -> String {
        format!("{} {}", self.code, self.path)
    }
}
