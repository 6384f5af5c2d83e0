use anyhow::{Result, anyhow};

use crate::model::{ChangedPath, Checkpoint};

/// Fields separated by the ASCII unit separator so summaries may contain anything.
pub const LOG_FORMAT: &str = "--format=%H%x1f%aI%x1f%s";

const FIELD_SEP: char = '\u{1f}';

pub fn parse_log(out: &str) -> Result<Vec<Checkpoint>> {
    out.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_log_line)
        .collect()
}

fn parse_log_line(line: &str) -> Result<Checkpoint> {
    let mut parts = line.splitn(3, FIELD_SEP);
    let (Some(id), Some(date), Some(summary)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(anyhow!("unexpected git log line: {:?}", line));
    };
    if id.is_empty() {
        return Err(anyhow!("git log line without a commit id: {:?}", line));
    }
    Ok(Checkpoint {
        id: id.to_string(),
        date: date.to_string(),
        summary: summary.to_string(),
    })
}

/// `git status --porcelain` (v1): two status columns, a space, then the path.
pub fn parse_status(out: &str) -> Vec<ChangedPath> {
    out.lines()
        .filter(|line| line.len() > 3)
        .map(|line| ChangedPath {
            code: line[..2].trim().to_string(),
            path: line[3..].to_string(),
        })
        .collect()
}

pub fn parse_branch_list(out: &str) -> Vec<String> {
    out.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../tests/vcs/parse_tests.rs"]
mod tests;
