use super::*;

fn ids(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("c{}", i)).collect()
}

#[test]
fn push_below_capacity_keeps_everything() {
    let mut entries = ids(0..3);
    assert_eq!(push_bounded(&mut entries, "c3".to_string(), 5), 0);
    assert_eq!(entries, ids(0..4));
}

#[test]
fn push_at_capacity_evicts_oldest() {
    let mut entries = ids(0..20);
    assert_eq!(push_bounded(&mut entries, "c20".to_string(), 20), 1);
    assert_eq!(entries, ids(1..21));
}

#[test]
fn push_over_capacity_trims_to_newest() {
    // A journal written with a larger capacity shrinks on the next record.
    let mut entries = ids(0..8);
    assert_eq!(push_bounded(&mut entries, "c8".to_string(), 3), 6);
    assert_eq!(entries, ids(6..9));
}

#[test]
fn zero_capacity_behaves_as_one() {
    let mut entries = ids(0..2);
    push_bounded(&mut entries, "c2".to_string(), 0);
    assert_eq!(entries, vec!["c2".to_string()]);
}

#[test]
fn length_never_exceeds_capacity() {
    for capacity in 1..6 {
        let mut entries = Vec::new();
        for i in 0..17 {
            push_bounded(&mut entries, format!("c{}", i), capacity);
            assert!(entries.len() <= capacity);
            assert_eq!(entries.last().map(String::as_str), Some(format!("c{}", i).as_str()));
        }
        assert_eq!(entries, ids(17 - capacity..17));
    }
}
