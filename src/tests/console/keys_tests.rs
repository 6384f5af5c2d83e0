use super::*;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn default_positions_cursor() {
    assert_eq!(SelectState::single(3, Some(2)).cursor, 2);
    assert_eq!(SelectState::single(3, Some(9)).cursor, 0);
}

#[test]
fn arrows_wrap_around() {
    let mut s = SelectState::single(3, None);
    assert_eq!(s.on_key(key(KeyCode::Up)), KeyOutcome::Pending);
    assert_eq!(s.cursor, 2);
    s.on_key(key(KeyCode::Down));
    assert_eq!(s.cursor, 0);
    s.on_key(key(KeyCode::Char('j')));
    assert_eq!(s.cursor, 1);
}

#[test]
fn enter_submits_and_escape_cancels() {
    let mut s = SelectState::single(2, None);
    assert_eq!(s.on_key(key(KeyCode::Enter)), KeyOutcome::Submit);
    assert_eq!(s.on_key(key(KeyCode::Esc)), KeyOutcome::Cancel);
    assert_eq!(
        s.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        KeyOutcome::Cancel
    );
}

#[test]
fn enter_on_empty_list_does_nothing() {
    let mut s = SelectState::multi(0);
    assert_eq!(s.on_key(key(KeyCode::Enter)), KeyOutcome::Pending);
}

#[test]
fn space_toggles_only_in_multi_mode() {
    let mut single = SelectState::single(2, None);
    single.on_key(key(KeyCode::Char(' ')));
    assert!(single.selected().is_empty());

    let mut multi = SelectState::multi(3);
    multi.on_key(key(KeyCode::Down));
    multi.on_key(key(KeyCode::Char(' ')));
    multi.on_key(key(KeyCode::Down));
    multi.on_key(key(KeyCode::Char(' ')));
    multi.on_key(key(KeyCode::Up));
    multi.on_key(key(KeyCode::Char(' ')));
    assert_eq!(multi.selected(), vec![2]);
}

#[test]
fn a_toggles_everything() {
    let mut multi = SelectState::multi(3);
    multi.on_key(key(KeyCode::Char('a')));
    assert_eq!(multi.selected(), vec![0, 1, 2]);
    multi.on_key(key(KeyCode::Char('a')));
    assert!(multi.selected().is_empty());
}

#[test]
fn confirm_keys() {
    assert_eq!(confirm_key(key(KeyCode::Char('y')), false), Some(true));
    assert_eq!(confirm_key(key(KeyCode::Char('N')), true), Some(false));
    assert_eq!(confirm_key(key(KeyCode::Enter), true), Some(true));
    assert_eq!(confirm_key(key(KeyCode::Enter), false), Some(false));
    assert_eq!(confirm_key(key(KeyCode::Esc), true), Some(false));
    assert_eq!(confirm_key(key(KeyCode::Char('x')), true), None);
}
