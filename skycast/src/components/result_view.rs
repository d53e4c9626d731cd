use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skycast_core::EventKind;

use super::{Component, HelpBar, HelpBarProps};
use crate::action::Action;
use crate::api::{LookupTarget, WeatherSnapshot};
use crate::format::{round_degrees, Readout};
use crate::state::{AppState, Screen};

const WIDTH: u16 = 52;

const BINDINGS: &[(&str, &str)] = &[
    ("u", "°C/°F"),
    ("r", "refresh"),
    ("b", "new search"),
    ("q", "quit"),
];

pub struct ResultViewProps<'a> {
    pub state: &'a AppState,
    /// Unix seconds, for the day/night marker.
    pub now: i64,
    pub is_focused: bool,
}

/// Current conditions for the looked-up place.
pub struct ResultView;

impl ResultView {
    fn heading(city: &str, target: &LookupTarget, snapshot: &WeatherSnapshot) -> String {
        // Suggestion labels already carry the country
        if target.label().is_some() || snapshot.sys.country.is_empty() {
            city.to_string()
        } else {
            format!("{city}, {}", snapshot.sys.country)
        }
    }

    fn detail(label: &'static str, value: String, note: Option<&str>) -> Line<'static> {
        let mut spans = vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White).bold()),
        ];
        if let Some(note) = note {
            spans.push(Span::styled(
                format!("  {note}"),
                Style::default().fg(Color::Gray),
            ));
        }
        Line::from(spans)
    }

    fn lines(heading: String, readout: &Readout, celsius: f64) -> Vec<Line<'static>> {
        let (marker, marker_color) = if readout.is_day {
            ("☀ Day", Color::Yellow)
        } else {
            ("☾ Night", Color::LightBlue)
        };

        vec![
            Line::from(vec![
                Span::styled(heading, Style::default().fg(Color::Cyan).bold()),
                Span::raw("  "),
                Span::styled(marker, Style::default().fg(marker_color)),
            ])
            .centered(),
            Line::from(readout.description.clone())
                .fg(Color::Gray)
                .centered(),
            Line::default(),
            Line::from(readout.temperature.clone())
                .bold()
                .fg(temp_color(celsius))
                .centered(),
            Line::from(vec![
                Span::styled("Feels like ", Style::default().fg(Color::DarkGray)),
                Span::raw(readout.feels_like.clone()),
                Span::styled("   H ", Style::default().fg(Color::DarkGray)),
                Span::raw(readout.temp_max.clone()),
                Span::styled("  L ", Style::default().fg(Color::DarkGray)),
                Span::raw(readout.temp_min.clone()),
            ])
            .centered(),
            Line::default(),
            Self::detail(
                "Humidity",
                readout.humidity.clone(),
                Some(readout.humidity_label),
            ),
            Self::detail(
                "Wind",
                readout.wind_speed.clone(),
                Some(readout.wind_direction.as_str()),
            ),
            Self::detail(
                "Visibility",
                readout.visibility.clone(),
                Some(readout.visibility_label),
            ),
            Self::detail("Pressure", readout.pressure.clone(), None),
            Self::detail("Cloudiness", readout.cloudiness.clone(), None),
            Self::detail("Sunrise", readout.sunrise.clone(), None),
            Self::detail("Sunset", readout.sunset.clone(), None),
        ]
    }
}

/// Cold blue through hot red.
fn temp_color(celsius: f64) -> Color {
    match round_degrees(celsius) {
        i64::MIN..=0 => Color::LightBlue,
        1..=15 => Color::Cyan,
        16..=25 => Color::Green,
        26..=32 => Color::Yellow,
        _ => Color::Red,
    }
}

impl Component<Action> for ResultView {
    type Props<'a> = ResultViewProps<'a>;

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
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Char('u') => Some(Action::UnitToggle),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::LookupRefresh),
            KeyCode::Char('b') | KeyCode::Char('/') | KeyCode::Esc => Some(Action::Reset),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Screen::Result {
            snapshot,
            city,
            target,
        } = &props.state.screen
        else {
            return;
        };

        let readout = Readout::new(snapshot, props.state.unit, props.now);
        let lines = Self::lines(
            Self::heading(city, target, snapshot),
            &readout,
            snapshot.main.temp,
        );

        let [body, help] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [column] = Layout::horizontal([Constraint::Length(WIDTH)])
            .flex(Flex::Center)
            .areas(body);
        let [card] = Layout::vertical([Constraint::Length(lines.len() as u16 + 2)])
            .flex(Flex::Center)
            .areas(column);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::from(format!(" {} ", readout.condition)).centered());
        frame.render_widget(Paragraph::new(lines).block(block), card);

        HelpBar.render(frame, help, HelpBarProps { bindings: BINDINGS });
    }
}
