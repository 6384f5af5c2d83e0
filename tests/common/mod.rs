#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};

use anyhow::{Result, anyhow, bail};

use rewind::console::{Console, Tone};
use rewind::model::{ChangedPath, Checkpoint, ResetMode};
use rewind::vcs::Vcs;

pub fn checkpoint(n: usize) -> Checkpoint {
    Checkpoint {
        id: format!("{:07x}{:033x}", 0xabc0000 + n, n),
        date: format!("2024-05-{:02}T12:00:00+00:00", (n % 28) + 1),
        summary: format!("commit {}", n),
    }
}

/// `count` commits, newest first: commit count-1 .. commit 0.
pub fn history(count: usize) -> Vec<Checkpoint> {
    (0..count).rev().map(checkpoint).collect()
}

pub fn changed(path: &str) -> ChangedPath {
    ChangedPath {
        code: "M".to_string(),
        path: path.to_string(),
    }
}

#[derive(Default)]
pub struct FakeState {
    /// Every commit the fake knows, newest first. Commits above `head` stay reachable
    /// after a reset, the way the reflog keeps them.
    pub log: Vec<Checkpoint>,
    pub head: usize,
    pub changes: Vec<ChangedPath>,
    pub branches: Vec<String>,
    pub fail_delete: HashSet<String>,
    pub fail_checkout: bool,
    pub fail_pull: bool,
    pub fail_current: bool,
    /// Every mutating call, in order.
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeVcs {
    pub state: RefCell<FakeState>,
}

impl FakeVcs {
    pub fn with_history(count: usize) -> Self {
        let vcs = Self::default();
        vcs.state.borrow_mut().log = history(count);
        vcs.state.borrow_mut().branches.push("main".to_string());
        vcs
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn branches_now(&self) -> Vec<String> {
        self.state.borrow().branches.clone()
    }

    pub fn head(&self) -> Option<Checkpoint> {
        let st = self.state.borrow();
        st.log.get(st.head).cloned()
    }
}

impl Vcs for FakeVcs {
    fn recent(&self, limit: usize) -> Result<Vec<Checkpoint>> {
        let st = self.state.borrow();
        Ok(st.log.iter().skip(st.head).take(limit).cloned().collect())
    }

    fn current(&self) -> Result<Checkpoint> {
        let st = self.state.borrow();
        if st.fail_current {
            bail!("cannot read HEAD");
        }
        st.log.get(st.head).cloned().ok_or_else(|| anyhow!("no commits"))
    }

    fn lookup(&self, id: &str) -> Result<Option<Checkpoint>> {
        let st = self.state.borrow();
        Ok(st.log.iter().find(|c| c.id == id).cloned())
    }

    fn changed_paths(&self) -> Result<Vec<ChangedPath>> {
        Ok(self.state.borrow().changes.clone())
    }

    fn reset(&self, target: &str, mode: ResetMode) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.calls.push(format!("reset {} {}", mode.flag(), target));
        let Some(pos) = st.log.iter().position(|c| c.id == target) else {
            bail!("unknown revision {}", target);
        };
        st.head = pos;
        if mode == ResetMode::Hard {
            st.changes.clear();
        }
        Ok(())
    }

    fn stash(&self, _message: &str) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.calls.push("stash".to_string());
        st.changes.clear();
        Ok(())
    }

    fn pull(&self) -> Result<String> {
        let mut st = self.state.borrow_mut();
        st.calls.push("pull".to_string());
        if st.fail_pull {
            bail!("could not resolve host");
        }
        Ok("Already up to date.".to_string())
    }

    fn create_branch(&self, name: &str, at: &str) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.calls.push(format!("branch {} {}", name, at));
        if st.branches.iter().any(|b| b == name) {
            bail!("a branch named '{}' already exists", name);
        }
        st.branches.push(name.to_string());
        Ok(())
    }

    fn branches(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().branches.clone())
    }

    fn delete_branch(&self, name: &str, force: bool) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.calls.push(format!("delete {} force={}", name, force));
        if st.fail_delete.contains(name) {
            bail!("branch '{}' is checked out", name);
        }
        st.branches.retain(|b| b != name);
        Ok(())
    }

    fn checkout_detached(&self, name: &str) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.calls.push(format!("checkout --detach {}", name));
        if st.fail_checkout {
            bail!("pathspec '{}' did not match", name);
        }
        Ok(())
    }
}

/// Scripted answer for the next prompt.
#[derive(Clone, Debug)]
pub enum Answer {
    /// First choice whose label contains the text.
    Choose(&'static str),
    /// Backs out of a select or multi-select.
    Back,
    /// Checks every choice whose label contains one of the texts.
    Check(Vec<&'static str>),
    Confirm(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Select {
        message: String,
        choices: Vec<String>,
    },
    MultiSelect {
        message: String,
        choices: Vec<String>,
    },
    Confirm {
        message: String,
        answer: bool,
    },
    Say {
        tone: Tone,
        text: String,
    },
}

/// Replays answers and records everything shown, in order.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<Answer>,
    pub trace: Vec<Event>,
}

impl ScriptedConsole {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            trace: Vec::new(),
        }
    }

    pub fn unanswered(&self) -> usize {
        self.answers.len()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.trace
            .iter()
            .any(|e| matches!(e, Event::Say { text, .. } if text.contains(needle)))
    }

    pub fn said_with(&self, tone: Tone) -> Vec<String> {
        self.trace
            .iter()
            .filter_map(|e| match e {
                Event::Say { tone: t, text } if *t == tone => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.trace.iter().position(pred)
    }

    pub fn confirms(&self) -> Vec<(String, bool)> {
        self.trace
            .iter()
            .filter_map(|e| match e {
                Event::Confirm { message, answer } => Some((message.clone(), *answer)),
                _ => None,
            })
            .collect()
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt {:?}", prompt))
    }
}

fn find(choices: &[String], text: &str) -> usize {
    choices
        .iter()
        .position(|c| c.contains(text))
        .unwrap_or_else(|| panic!("no choice containing {:?} in {:?}", text, choices))
}

impl Console for ScriptedConsole {
    fn select(
        &mut self,
        message: &str,
        choices: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>> {
        self.trace.push(Event::Select {
            message: message.to_string(),
            choices: choices.to_vec(),
        });
        match self.next(message) {
            Answer::Choose(text) => Ok(Some(find(choices, text))),
            Answer::Back => Ok(None),
            other => panic!("select {:?} answered with {:?}", message, other),
        }
    }

    fn multi_select(&mut self, message: &str, choices: &[String]) -> Result<Option<Vec<usize>>> {
        self.trace.push(Event::MultiSelect {
            message: message.to_string(),
            choices: choices.to_vec(),
        });
        match self.next(message) {
            Answer::Check(texts) => Ok(Some(texts.iter().map(|t| find(choices, t)).collect())),
            Answer::Back => Ok(None),
            other => panic!("multi-select {:?} answered with {:?}", message, other),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        let answer = match self.next(message) {
            Answer::Confirm(answer) => answer,
            other => panic!("confirm {:?} answered with {:?}", message, other),
        };
        self.trace.push(Event::Confirm {
            message: message.to_string(),
            answer,
        });
        Ok(answer)
    }

    fn say(&mut self, tone: Tone, text: &str) {
        self.trace.push(Event::Say {
            tone,
            text: text.to_string(),
        });
    }
}
