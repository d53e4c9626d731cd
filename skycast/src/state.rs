//! Application state, owned by the store and mutated only by the reducer

use crate::api::{LookupTarget, Suggestion, WeatherSnapshot};
use crate::format::TempUnit;

/// Frames of the loading spinner, advanced once per tick.
pub const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Spinner tick period.
pub const TICK_MS: u64 = 100;

/// Fewest trimmed characters that trigger autocomplete.
pub const MIN_SUGGEST_CHARS: usize = 3;

/// Which view is up. A snapshot only exists on the result screen.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Search {
        /// The lookup in flight, if any.
        pending: Option<LookupTarget>,
    },
    Result {
        snapshot: WeatherSnapshot,
        /// Label of the picked suggestion, or the payload name.
        city: String,
        /// Kept for refresh.
        target: LookupTarget,
    },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Search { pending: None }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    /// Highlighted suggestion.
    pub selected: Option<usize>,
    pub screen: Screen,
    pub unit: TempUnit,
    pub error: Option<String>,

    /// Bumped for every lookup issued; results from older lookups are dropped.
    pub lookup_generation: u64,
    /// Same for autocomplete requests.
    pub suggest_generation: u64,

    pub tick_count: u32,
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(unit: TempUnit) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            selected: None,
            screen: Screen::default(),
            unit,
            error: None,
            lookup_generation: 0,
            suggest_generation: 0,
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self.screen, Screen::Search { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Search { pending: Some(_) })
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.screen {
            Screen::Result { snapshot, .. } => Some(snapshot),
            Screen::Search { .. } => None,
        }
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected.and_then(|i| self.suggestions.get(i))
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.tick_count as usize % SPINNER.len()]
    }

    pub(crate) fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.selected = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TempUnit::default())
    }
}
