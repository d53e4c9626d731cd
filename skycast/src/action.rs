//! Actions
//!
//! Intents are named for what the user did (`QueryChange`, `SearchSubmit`).
//! Results of async work carry a `Did` and the generation they were issued
//! with, so the reducer can tell a current answer from a stale one.

use crate::api::{Suggestion, WeatherSnapshot};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Search =====
    /// The text in the search box changed.
    QueryChange(String),

    /// Autocomplete answered.
    SuggestDidLoad {
        generation: u64,
        suggestions: Vec<Suggestion>,
    },

    /// Autocomplete failed. Never shown to the user.
    SuggestDidFail { generation: u64, error: String },

    /// Highlight the suggestion at this index.
    SuggestionSelect(usize),

    /// Look up the highlighted suggestion, or the typed text when nothing is
    /// highlighted.
    SuggestionConfirm,

    /// Look up the typed text.
    SearchSubmit,

    // ===== Lookup =====
    LookupDidLoad {
        generation: u64,
        snapshot: Box<WeatherSnapshot>,
    },

    LookupDidFail { generation: u64, message: String },

    /// Fetch the displayed place again.
    LookupRefresh,

    // ===== Result view =====
    UnitToggle,

    /// Back to an empty search.
    Reset,

    // ===== Global =====
    /// Spinner tick.
    Tick,

    UiTerminalResize(u16, u16),

    Quit,
}

impl skycast_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::QueryChange(_) => "QueryChange",
            Action::SuggestDidLoad { .. } => "SuggestDidLoad",
            Action::SuggestDidFail { .. } => "SuggestDidFail",
            Action::SuggestionSelect(_) => "SuggestionSelect",
            Action::SuggestionConfirm => "SuggestionConfirm",
            Action::SearchSubmit => "SearchSubmit",
            Action::LookupDidLoad { .. } => "LookupDidLoad",
            Action::LookupDidFail { .. } => "LookupDidFail",
            Action::LookupRefresh => "LookupRefresh",
            Action::UnitToggle => "UnitToggle",
            Action::Reset => "Reset",
            Action::Tick => "Tick",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::Quit => "Quit",
        }
    }

    /// Keeps the log readable for data-heavy results.
    fn summary(&self) -> String {
        match self {
            Action::SuggestDidLoad {
                generation,
                suggestions,
            } => format!(
                "SuggestDidLoad {{ generation: {generation}, count: {} }}",
                suggestions.len()
            ),
            Action::LookupDidLoad {
                generation,
                snapshot,
            } => format!(
                "LookupDidLoad {{ generation: {generation}, name: {:?}, temp: {:.1} }}",
                snapshot.name, snapshot.main.temp
            ),
            Action::LookupDidFail {
                generation,
                message,
            } => {
                let message = if message.chars().count() > 40 {
                    format!("{}...", message.chars().take(37).collect::<String>())
                } else {
                    message.clone()
                };
                format!("LookupDidFail {{ generation: {generation}, message: {message:?} }}")
            }
            _ => format!("{self:?}"),
        }
    }
}
