use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Pending,
    Submit,
    Cancel,
}

/// Cursor and check marks of a list prompt, independent of rendering.
#[derive(Clone, Debug)]
pub struct SelectState {
    pub cursor: usize,
    pub checked: Vec<bool>,
    multi: bool,
}

impl SelectState {
    pub fn single(len: usize, default: Option<usize>) -> Self {
        Self {
            cursor: default.filter(|d| *d < len).unwrap_or(0),
            checked: vec![false; len],
            multi: false,
        }
    }

    pub fn multi(len: usize) -> Self {
        Self {
            cursor: 0,
            checked: vec![false; len],
            multi: true,
        }
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    pub fn selected(&self) -> Vec<usize> {
        self.checked
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
            .collect()
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if is_interrupt(&key) {
            return KeyOutcome::Cancel;
        }
        let len = self.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Cancel,
            KeyCode::Enter if !self.is_empty() => return KeyOutcome::Submit,
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
            }
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                self.cursor = (self.cursor + 1) % len;
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len.saturating_sub(1),
            KeyCode::Char(' ') if self.multi && len > 0 => {
                self.checked[self.cursor] = !self.checked[self.cursor];
            }
            KeyCode::Char('a') if self.multi => {
                let all = self.checked.iter().all(|c| *c);
                self.checked.iter_mut().for_each(|c| *c = !all);
            }
            _ => {}
        }
        KeyOutcome::Pending
    }
}

/// `Some(answer)` once the key settles a yes/no prompt.
pub fn confirm_key(key: KeyEvent, default: bool) -> Option<bool> {
    if is_interrupt(&key) {
        return Some(false);
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        KeyCode::Enter => Some(default),
        _ => None,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

#[cfg(test)]
#[path = "../tests/console/keys_tests.rs"]
mod tests;
