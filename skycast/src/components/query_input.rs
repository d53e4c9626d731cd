//! Single-line city search input

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skycast_core::EventKind;

use super::Component;
use crate::action::Action;

pub struct QueryInputProps<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
}

/// Text input with a cursor. Emits `on_change` with the whole new value on
/// every edit; Enter and navigation keys belong to the parent.
///
/// Edits apply to a local copy of the text, so keys that arrive before the
/// reducer has caught up build on each other instead of on the stale prop.
#[derive(Default)]
pub struct QueryInput {
    /// Byte index into `value`.
    cursor: usize,
    /// Text including edits not yet reflected in props.
    value: String,
    /// Last prop value accounted for.
    acked: String,
    /// Emitted edits not yet seen in props, oldest first.
    in_flight: VecDeque<String>,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn sync(&mut self, incoming: &str) {
        if incoming != self.acked {
            if let Some(pos) = self.in_flight.iter().position(|v| v == incoming) {
                self.in_flight.drain(..=pos);
            } else {
                // Replaced from outside, e.g. by a reset or a lookup result
                self.in_flight.clear();
                self.value = incoming.to_string();
                self.cursor = self.value.len();
            }
            self.acked = incoming.to_string();
        }
        self.cursor = self.cursor.min(self.value.len());
    }

    fn commit(&mut self, next: String, on_change: fn(String) -> Action) -> Option<Action> {
        self.value.clone_from(&next);
        self.in_flight.push_back(next.clone());
        Some(on_change(next))
    }

    fn prev_boundary(value: &str, from: usize) -> usize {
        value[..from]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(value: &str, from: usize) -> usize {
        value[from..]
            .chars()
            .next()
            .map(|c| from + c.len_utf8())
            .unwrap_or(from)
    }
}

impl Component<Action> for QueryInput {
    type Props<'a> = QueryInputProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        self.sync(props.value);
        let value = self.value.clone();
        let value = value.as_str();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    self.commit(String::new(), props.on_change)
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let mut next = String::with_capacity(value.len() + c.len_utf8());
                next.push_str(&value[..self.cursor]);
                next.push(c);
                next.push_str(&value[self.cursor..]);
                self.cursor += c.len_utf8();
                self.commit(next, props.on_change)
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let start = Self::prev_boundary(value, self.cursor);
                let next = format!("{}{}", &value[..start], &value[self.cursor..]);
                self.cursor = start;
                self.commit(next, props.on_change)
            }
            KeyCode::Delete if self.cursor < value.len() => {
                let end = Self::next_boundary(value, self.cursor);
                let next = format!("{}{}", &value[..self.cursor], &value[end..]);
                self.commit(next, props.on_change)
            }
            KeyCode::Left => {
                self.cursor = Self::prev_boundary(value, self.cursor);
                None
            }
            KeyCode::Right => {
                self.cursor = Self::next_boundary(value, self.cursor);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = value.len();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value);

        let text = if self.value.is_empty() {
            Line::from(Span::styled(
                props.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::raw(self.value.as_str())
        };

        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        frame.render_widget(Paragraph::new(text).block(block), area);

        if props.is_focused {
            let column = self.value[..self.cursor].chars().count() as u16;
            let x = area.x + 1 + column;
            if x < area.right().saturating_sub(1) {
                frame.set_cursor_position((x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::{key, ActionAssertions, RenderHarness};

    fn props(value: &str) -> QueryInputProps<'_> {
        QueryInputProps {
            value,
            placeholder: "Search",
            is_focused: true,
            on_change: Action::QueryChange,
        }
    }

    fn press(input: &mut QueryInput, value: &str, k: &str) -> Vec<Action> {
        input
            .handle_event(&EventKind::Key(key(k)), props(value))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_appends() {
        let mut input = QueryInput::new();
        press(&mut input, "Lo", "n").assert_first(Action::QueryChange("Lon".into()));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = QueryInput::new();
        press(&mut input, "Lon", "backspace").assert_first(Action::QueryChange("Lo".into()));

        let mut input = QueryInput::new();
        press(&mut input, "Lon", "home").assert_empty();
        press(&mut input, "Lon", "delete").assert_first(Action::QueryChange("on".into()));
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut input = QueryInput::new();
        press(&mut input, "Pais", "left").assert_empty();
        press(&mut input, "Pais", "left").assert_empty();
        press(&mut input, "Pais", "r").assert_first(Action::QueryChange("Paris".into()));
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut input = QueryInput::new();
        press(&mut input, "Zürich", "home").assert_empty();
        press(&mut input, "Zürich", "right").assert_empty();
        press(&mut input, "Zürich", "right").assert_empty();
        press(&mut input, "Zürich", "backspace").assert_first(Action::QueryChange("Zrich".into()));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = QueryInput::new();
        press(&mut input, "Lon", "ctrl+u").assert_first(Action::QueryChange(String::new()));
    }

    #[test]
    fn test_keys_ahead_of_reducer_build_on_each_other() {
        let mut input = QueryInput::new();
        press(&mut input, "", "L").assert_first(Action::QueryChange("L".into()));
        press(&mut input, "", "o").assert_first(Action::QueryChange("Lo".into()));
        // First edit lands, second still queued
        press(&mut input, "L", "n").assert_first(Action::QueryChange("Lon".into()));
        press(&mut input, "Lon", "backspace").assert_first(Action::QueryChange("Lo".into()));
    }

    #[test]
    fn test_outside_replacement_moves_cursor_to_end() {
        let mut input = QueryInput::new();
        press(&mut input, "", "P").assert_first(Action::QueryChange("P".into()));
        press(&mut input, "Paris, FR", "!").assert_first(Action::QueryChange("Paris, FR!".into()));

        press(&mut input, "", "B").assert_first(Action::QueryChange("B".into()));
    }

    #[test]
    fn test_enter_left_to_parent() {
        let mut input = QueryInput::new();
        press(&mut input, "Lon", "enter").assert_empty();
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = QueryInput::new();
        let actions: Vec<_> = input
            .handle_event(
                &EventKind::Key(key("a")),
                QueryInputProps {
                    is_focused: false,
                    ..props("")
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_placeholder() {
        let mut input = QueryInput::new();
        let mut render = RenderHarness::new(30, 3);
        let output = render.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props(""));
        });
        assert!(output.contains("Search"));
    }
}
