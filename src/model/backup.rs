use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const NAME_STAMP: &[FormatItem<'static>] =
    format_description!("[year][month][day]-[hour][minute][second]");
const DISPLAY_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// A safety branch created before a hard reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackupRef {
    pub name: String,
    pub created: Option<OffsetDateTime>,
}

impl BackupRef {
    pub fn from_name(prefix: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            created: parse_backup_timestamp(prefix, name),
        }
    }

    pub fn created_label(&self) -> String {
        self.created
            .and_then(|ts| ts.format(DISPLAY_STAMP).ok())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.created_label())
    }
}

/// `<prefix>-YYYYMMDD-HHMMSS`, always in UTC so names sort and parse the same everywhere.
pub fn backup_name(prefix: &str, now: OffsetDateTime) -> String {
    let now = now.to_offset(time::UtcOffset::UTC);
    let stamp = now
        .format(NAME_STAMP)
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("{}-{}", prefix, stamp)
}

pub fn parse_backup_timestamp(prefix: &str, name: &str) -> Option<OffsetDateTime> {
    let suffix = name.strip_prefix(prefix)?.strip_prefix('-')?;
    PrimitiveDateTime::parse(suffix, NAME_STAMP)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

#[cfg(test)]
#[path = "../tests/model/backup_tests.rs"]
mod tests;
