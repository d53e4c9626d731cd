//! Test helpers: key events, a render harness and action assertions
//!
//! ```ignore
//! use skycast_core::testing::*;
//!
//! let actions = view.handle_event(&EventKind::Key(key("enter")), props);
//! actions.assert_first(Action::SearchSubmit);
//!
//! let mut render = RenderHarness::new(80, 24);
//! let output = render.render_to_string_plain(|frame| view.render(frame, frame.area(), props));
//! assert!(output.contains("Sunrise"));
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::event::EventKind;

/// Build a `KeyEvent` from a short description.
///
/// Accepts a single character (`"q"`), a named key (`"enter"`, `"esc"`,
/// `"backspace"`, `"delete"`, `"up"`, `"down"`, `"left"`, `"right"`,
/// `"home"`, `"end"`, `"tab"`, `"space"`, `"f5"`), optionally prefixed with
/// `ctrl+`, `alt+` or `shift+`.
///
/// # Panics
///
/// Panics on anything it does not recognise; meant for tests only.
pub fn key(s: &str) -> KeyEvent {
    let mut modifiers = KeyModifiers::empty();
    let mut rest = s;
    loop {
        if let Some(r) = rest.strip_prefix("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("alt+") {
            modifiers |= KeyModifiers::ALT;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            rest = r;
        } else {
            break;
        }
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "f5" => KeyCode::F(5),
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => panic!("Invalid key string: {s:?}"),
            }
        }
    };

    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// `EventKind::Key` for each character of `text`, for simulating typing.
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars()
        .map(|c| {
            EventKind::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::empty(),
                kind: KeyEventKind::Press,
                state: KeyEventState::empty(),
            })
        })
        .collect()
}

/// Renders into an in-memory terminal.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test backend cannot be created, which does not happen
    /// in practice.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("test backend terminal");
        Self { terminal }
    }

    /// Draw and return the buffer as text, one line per row, no styling.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let completed = self.terminal.draw(draw).expect("draw to test backend");
        buffer_to_string_plain(completed.buffer)
    }
}

/// Buffer contents as plain text, rows joined with `\n`.
fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            out.push('\n');
        }
    }
    out
}

/// Assertions over the actions a component returned.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "expected no actions, got {self:?}");
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "unexpected action count in {self:?}");
    }

    fn assert_first(&self, expected: A) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected, "unexpected first action"),
            None => panic!("expected {expected:?}, got no actions"),
        }
    }
}
