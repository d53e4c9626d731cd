use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skycast_core::EventKind;

use super::{
    Component, HelpBar, HelpBarProps, QueryInput, QueryInputProps, SuggestionList,
    SuggestionListProps,
};
use crate::action::Action;
use crate::api::LookupTarget;
use crate::state::{AppState, Screen};

const PLACEHOLDER: &str = "Search for a city...";
const WIDTH: u16 = 56;
const MAX_LIST_ROWS: u16 = 5;

const BINDINGS: &[(&str, &str)] = &[
    ("enter", "search"),
    ("↑↓", "pick"),
    ("esc", "clear/quit"),
    ("ctrl+c", "quit"),
];

pub struct SearchViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Search box, suggestion list, status line.
#[derive(Default)]
pub struct SearchView {
    input: QueryInput,
    list: SuggestionList,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    fn status_line(state: &AppState) -> Option<Line<'static>> {
        if let Screen::Search {
            pending: Some(target),
        } = &state.screen
        {
            let what = match target {
                LookupTarget::City(name) => name.clone(),
                LookupTarget::Coordinates { label, .. } => label.clone(),
            };
            return Some(Line::from(vec![
                Span::styled(state.spinner(), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(" Fetching weather for {what}..."),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        state.error.as_deref().map(|error| {
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red).bold(),
            ))
        })
    }
}

impl Component<Action> for SearchView {
    type Props<'a> = SearchViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;
        let list_props = SuggestionListProps {
            items: &state.suggestions,
            selected: state.selected,
            is_focused: true,
            on_select: Action::SuggestionSelect,
        };
        let key = match event {
            EventKind::Key(key) => key,
            EventKind::Scroll { .. } => {
                return self.list.handle_event(event, list_props).into_iter().collect();
            }
            _ => return Vec::new(),
        };

        match key.code {
            KeyCode::Enter => return vec![Action::SuggestionConfirm],
            KeyCode::Esc if state.query.is_empty() && !state.is_loading() => {
                return vec![Action::Quit];
            }
            KeyCode::Esc => return vec![Action::Reset],
            KeyCode::Up | KeyCode::Down => {
                return self.list.handle_event(event, list_props).into_iter().collect();
            }
            _ => {}
        }

        self.input
            .handle_event(
                event,
                QueryInputProps {
                    value: &state.query,
                    placeholder: PLACEHOLDER,
                    is_focused: true,
                    on_change: Action::QueryChange,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let list_rows = (state.suggestions.len() as u16).min(MAX_LIST_ROWS);

        let [body, help] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [column] = Layout::horizontal([Constraint::Length(WIDTH)])
            .flex(Flex::Center)
            .areas(body);
        let [title, tagline, _, input, list, _, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(list_rows),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(column);

        frame.render_widget(
            Paragraph::new(Line::from("skycast").bold().fg(Color::Cyan).centered()),
            title,
        );
        frame.render_widget(
            Paragraph::new(
                Line::from("Check weather conditions anywhere in the world")
                    .fg(Color::DarkGray)
                    .centered(),
            ),
            tagline,
        );

        self.input.render(
            frame,
            input,
            QueryInputProps {
                value: &state.query,
                placeholder: PLACEHOLDER,
                is_focused: props.is_focused,
                on_change: Action::QueryChange,
            },
        );

        if list_rows > 0 {
            self.list.render(
                frame,
                list,
                SuggestionListProps {
                    items: &state.suggestions,
                    selected: state.selected,
                    is_focused: props.is_focused,
                    on_select: Action::SuggestionSelect,
                },
            );
        }

        if let Some(line) = Self::status_line(state) {
            frame.render_widget(Paragraph::new(line.centered()), status);
        }

        HelpBar.render(frame, help, HelpBarProps { bindings: BINDINGS });
    }
}
