use super::*;

use time::macros::datetime;

#[test]
fn name_carries_utc_second_stamp() {
    let ts = datetime!(2024-03-09 07:05:01 +02:00);
    assert_eq!(
        backup_name("rewind-backup", ts),
        "rewind-backup-20240309-050501"
    );
}

#[test]
fn timestamp_parses_back_from_generated_name() {
    let ts = datetime!(2025-12-31 23:59:58 UTC);
    let name = backup_name("safety", ts);
    assert_eq!(parse_backup_timestamp("safety", &name), Some(ts));
}

#[test]
fn foreign_suffix_is_unknown() {
    let b = BackupRef::from_name("rewind-backup", "rewind-backup-manual");
    assert_eq!(b.created, None);
    assert_eq!(b.created_label(), "unknown");
}

#[test]
fn other_prefix_does_not_parse() {
    assert_eq!(
        parse_backup_timestamp("rewind-backup", "rewind-backupx-20240101-000000"),
        None
    );
}

#[test]
fn label_shows_display_stamp() {
    let b = BackupRef::from_name("bk", "bk-20240102-030405");
    assert_eq!(b.label(), "bk-20240102-030405 (2024-01-02 03:04:05 UTC)");
}
