//! Autocomplete candidates under the search box

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};
use skycast_core::EventKind;

use super::Component;
use crate::action::Action;
use crate::api::Suggestion;

pub struct SuggestionListProps<'a> {
    pub items: &'a [Suggestion],
    pub selected: Option<usize>,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

/// Up/Down and the scroll wheel move the highlight. Letters are left alone
/// so they reach the search box.
#[derive(Default)]
pub struct SuggestionList {
    scroll_offset: usize,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected + 1 - viewport_height;
        }
    }
}

impl Component<Action> for SuggestionList {
    type Props<'a> = SuggestionListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.items.is_empty() {
            return None;
        }
        let down = match event {
            EventKind::Key(key) if key.code == KeyCode::Down => true,
            EventKind::Key(key) if key.code == KeyCode::Up => false,
            EventKind::Scroll { delta, .. } => *delta > 0,
            _ => return None,
        };

        let last = props.items.len() - 1;
        let next = match (down, props.selected) {
            (true, None) => 0,
            (true, Some(i)) => (i + 1).min(last),
            (false, None) => return None,
            (false, Some(i)) => i.saturating_sub(1),
        };

        if props.selected == Some(next) {
            None
        } else {
            Some((props.on_select)(next))
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if let Some(selected) = props.selected {
            self.ensure_visible(selected, area.height as usize);
        } else {
            self.scroll_offset = 0;
        }

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::raw(" "),
                    Span::styled(s.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(s.region(), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default().with_selected(props.selected);
        *state.offset_mut() = self.scroll_offset;
        frame.render_stateful_widget(list, area, &mut state);
    }
}
