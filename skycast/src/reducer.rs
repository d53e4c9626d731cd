//! Reducer: every state transition, no I/O
//!
//! Async work leaves as an [`Effect`] and comes back as a `Did*` action.

use skycast_core::DispatchResult;

use crate::action::Action;
use crate::api::LookupTarget;
use crate::effect::Effect;
use crate::state::{AppState, Screen, MIN_SUGGEST_CHARS};

/// Shown when the search box is submitted empty.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a valid city name.";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search =====
        Action::QueryChange(query) => {
            if !state.is_search() || state.query == query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            state.selected = None;
            suggest(state)
        }

        Action::SuggestDidLoad {
            generation,
            suggestions,
        } => {
            if generation != state.suggest_generation || !state.is_search() {
                tracing::debug!(generation, "dropping stale suggestions");
                return DispatchResult::unchanged();
            }
            state.suggestions = suggestions;
            state.selected = None;
            DispatchResult::changed()
        }

        Action::SuggestDidFail { generation, error } => {
            if generation != state.suggest_generation {
                return DispatchResult::unchanged();
            }
            tracing::warn!(%error, "suggestion request failed");
            if state.suggestions.is_empty() {
                return DispatchResult::unchanged();
            }
            state.clear_suggestions();
            DispatchResult::changed()
        }

        Action::SuggestionSelect(index) => {
            if !state.is_search()
                || index >= state.suggestions.len()
                || state.selected == Some(index)
            {
                return DispatchResult::unchanged();
            }
            state.selected = Some(index);
            DispatchResult::changed()
        }

        Action::SuggestionConfirm => {
            if !state.is_search() {
                return DispatchResult::unchanged();
            }
            match state.selected_suggestion().map(|s| s.target()) {
                Some(target) => lookup(state, target),
                None => submit_search(state),
            }
        }

        Action::SearchSubmit => {
            if !state.is_search() {
                return DispatchResult::unchanged();
            }
            submit_search(state)
        }

        // ===== Lookup =====
        Action::LookupDidLoad {
            generation,
            snapshot,
        } => {
            if generation != state.lookup_generation {
                tracing::debug!(generation, "dropping stale lookup result");
                return DispatchResult::unchanged();
            }
            let target = match &state.screen {
                Screen::Search {
                    pending: Some(target),
                } => target.clone(),
                _ => LookupTarget::City(snapshot.name.clone()),
            };
            let city = target
                .label()
                .map(String::from)
                .unwrap_or_else(|| snapshot.name.clone());

            tracing::info!(%city, "lookup succeeded");
            state.query = city.clone();
            state.clear_suggestions();
            state.error = None;
            state.screen = Screen::Result {
                snapshot: *snapshot,
                city,
                target,
            };
            DispatchResult::changed()
        }

        Action::LookupDidFail {
            generation,
            message,
        } => {
            if generation != state.lookup_generation {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::Search { pending: None };
            state.error = Some(message);
            DispatchResult::changed()
        }

        Action::LookupRefresh => match &state.screen {
            Screen::Result { target, .. } => {
                let target = target.clone();
                lookup(state, target)
            }
            Screen::Search { .. } => DispatchResult::unchanged(),
        },

        // ===== Result view =====
        Action::UnitToggle => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::Reset => reset(state),

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Schedule autocomplete for the current query, or clear the list when the
/// query is too short.
fn suggest(state: &mut AppState) -> DispatchResult<Effect> {
    state.suggest_generation += 1;

    let trimmed = state.query.trim();
    if trimmed.chars().count() < MIN_SUGGEST_CHARS {
        state.clear_suggestions();
        return DispatchResult::changed_with(Effect::CancelSuggest);
    }

    DispatchResult::changed_with(Effect::SuggestCities {
        query: trimmed.to_string(),
        generation: state.suggest_generation,
    })
}

/// Start a lookup. Drops the current snapshot and any error, and supersedes
/// whatever lookup was in flight. Suggestions are left in place; only a
/// successful lookup clears them.
fn lookup(state: &mut AppState, target: LookupTarget) -> DispatchResult<Effect> {
    state.lookup_generation += 1;
    state.suggest_generation += 1;
    state.error = None;
    state.screen = Screen::Search {
        pending: Some(target.clone()),
    };

    tracing::info!(?target, generation = state.lookup_generation, "lookup started");
    DispatchResult::changed_with(Effect::CancelSuggest).with(Effect::FetchWeather {
        target,
        generation: state.lookup_generation,
    })
}

fn submit_search(state: &mut AppState) -> DispatchResult<Effect> {
    let city = state.query.trim();
    if city.is_empty() {
        state.error = Some(EMPTY_QUERY_MESSAGE.to_string());
        return DispatchResult::changed();
    }
    let target = LookupTarget::City(city.to_string());
    lookup(state, target)
}

fn reset(state: &mut AppState) -> DispatchResult<Effect> {
    state.lookup_generation += 1;
    state.suggest_generation += 1;
    state.query.clear();
    state.clear_suggestions();
    state.error = None;
    state.screen = Screen::Search { pending: None };
    DispatchResult::changed_with(Effect::CancelLookup).with(Effect::CancelSuggest)
}
