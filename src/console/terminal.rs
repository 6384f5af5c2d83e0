use std::io::{self, IsTerminal, Stdout, Write};

use anyhow::{Context, Result, bail};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::{Terminal, TerminalOptions, Viewport};

use super::keys::{KeyOutcome, SelectState, confirm_key};
use super::{Console, Tone};

type InlineTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Prompts drawn in a small inline viewport below the shell's scrollback.
pub struct TerminalConsole {
    _private: (),
}

impl TerminalConsole {
    pub fn new() -> Result<Self> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            bail!("rewind requires an interactive terminal (TTY)");
        }
        Ok(Self { _private: () })
    }
}

struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        disable_raw_mode().ok();
    }
}

fn inline_terminal(height: usize) -> Result<InlineTerminal> {
    let (_, rows) = crossterm::terminal::size().context("query terminal size")?;
    let max = rows.saturating_sub(1).max(3);
    let height = u16::try_from(height).unwrap_or(u16::MAX).clamp(3, max);
    Terminal::with_options(
        CrosstermBackend::new(io::stdout()),
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )
    .context("create inline terminal")
}

fn next_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read().context("read terminal event")?
            && key.kind == KeyEventKind::Press
        {
            return Ok(key);
        }
    }
}

fn question_lines(message: &str) -> Vec<Line<'static>> {
    message
        .lines()
        .enumerate()
        .map(|(i, text)| {
            let lead = if i == 0 { "? " } else { "  " };
            Line::from(vec![
                Span::styled(
                    lead,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    text.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Replaces the viewport with a one-line record of the answer and leaves the cursor below it.
fn settle(terminal: &mut InlineTerminal, message: &str, answer: &str) -> Result<()> {
    let first = message.lines().next().unwrap_or("").to_string();
    let answer = answer.to_string();
    let completed = terminal
        .draw(|frame| {
            let line = Line::from(vec![
                Span::styled("✔ ", Style::default().fg(Color::Green)),
                Span::raw(first),
                Span::raw(" › "),
                Span::styled(answer, Style::default().fg(Color::Cyan)),
            ]);
            frame.render_widget(Paragraph::new(line), frame.area());
        })
        .context("draw prompt")?;
    let area = completed.area;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        MoveTo(0, area.y.saturating_add(1)),
        Clear(ClearType::FromCursorDown)
    )
    .context("reset cursor")?;
    terminal.show_cursor().ok();
    Ok(())
}

fn run_list(
    message: &str,
    choices: &[String],
    mut state: SelectState,
    multi: bool,
) -> Result<Option<SelectState>> {
    let question = question_lines(message);
    let hint = if multi {
        "↑/↓ move · space toggle · a all · enter confirm · esc cancel"
    } else {
        "↑/↓ move · enter select · esc cancel"
    };
    let mut terminal = inline_terminal(question.len() + choices.len() + 1)?;
    let _raw = RawMode::enable()?;
    let mut list_state = ListState::default();

    let outcome = loop {
        list_state.select(Some(state.cursor));
        terminal
            .draw(|frame| {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(question.len() as u16),
                        Constraint::Min(1),
                        Constraint::Length(1),
                    ])
                    .split(frame.area());
                frame.render_widget(Paragraph::new(question.clone()), parts[0]);

                let items: Vec<ListItem> = choices
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        if multi {
                            let mark = if state.checked[i] { "[x] " } else { "[ ] " };
                            ListItem::new(format!("{}{}", mark, label))
                        } else {
                            ListItem::new(label.as_str())
                        }
                    })
                    .collect();
                let list = List::new(items)
                    .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .highlight_symbol("❯ ");
                frame.render_stateful_widget(list, parts[1], &mut list_state);
                frame.render_widget(Paragraph::new(hint_line(hint)), parts[2]);
            })
            .context("draw prompt")?;

        match state.on_key(next_key()?) {
            KeyOutcome::Pending => {}
            KeyOutcome::Submit => break Some(state.clone()),
            KeyOutcome::Cancel => break None,
        }
    };

    let answer = match &outcome {
        None => "cancelled".to_string(),
        Some(s) if multi => format!("{} selected", s.selected().len()),
        Some(s) => choices.get(s.cursor).cloned().unwrap_or_default(),
    };
    settle(&mut terminal, message, &answer)?;
    Ok(outcome)
}

impl Console for TerminalConsole {
    fn select(
        &mut self,
        message: &str,
        choices: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        if choices.is_empty() {
            return Ok(None);
        }
        let state = SelectState::single(choices.len(), default);
        Ok(run_list(message, choices, state, false)?.map(|s| s.cursor))
    }

    fn multi_select(&mut self, message: &str, choices: &[String]) -> Result<Option<Vec<usize>>> {
        if choices.is_empty() {
            return Ok(Some(Vec::new()));
        }
        let state = SelectState::multi(choices.len());
        Ok(run_list(message, choices, state, true)?.map(|s| s.selected()))
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let question = question_lines(message);
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let mut terminal = inline_terminal(question.len() + 1)?;
        let _raw = RawMode::enable()?;

        let answer = loop {
            terminal
                .draw(|frame| {
                    let mut lines = question.clone();
                    lines.push(hint_line(hint));
                    frame.render_widget(Paragraph::new(lines), frame.area());
                })
                .context("draw prompt")?;
            if let Some(answer) = confirm_key(next_key()?, default) {
                break answer;
            }
        };

        settle(&mut terminal, message, if answer { "yes" } else { "no" })?;
        Ok(answer)
    }

    fn say(&mut self, tone: Tone, text: &str) {
        let mut stdout = io::stdout();
        for line in text.lines() {
            let _ = match tone {
                Tone::Info => writeln!(stdout, "{}", line),
                Tone::Success => writeln!(stdout, "{} {}", "✔".green(), line),
                Tone::Warning => writeln!(stdout, "{} {}", "!".yellow().bold(), line.yellow()),
                Tone::Error => writeln!(stdout, "{} {}", "✖".red().bold(), line.red()),
            };
        }
        let _ = stdout.flush();
    }
}
