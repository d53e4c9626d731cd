//! Effects declared by the reducer, and the handler that turns them into
//! keyed tasks

use std::time::Duration;

use skycast_core::{EffectContext, TaskKey};

use crate::action::Action;
use crate::api::{LookupTarget, OpenWeatherClient};

/// Task key for the debounced autocomplete request.
pub const SUGGEST_TASK: &str = "suggest";
/// Task key for the weather lookup.
pub const LOOKUP_TASK: &str = "lookup";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the geocoding endpoint for candidates once typing settles.
    SuggestCities { query: String, generation: u64 },
    CancelSuggest,
    /// Fetch current weather, replacing any lookup in flight.
    FetchWeather {
        target: LookupTarget,
        generation: u64,
    },
    CancelLookup,
}

/// Schedule the work an effect describes. Results come back as actions.
pub fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    client: &OpenWeatherClient,
    debounce: Duration,
) {
    match effect {
        Effect::SuggestCities { query, generation } => {
            let client = client.clone();
            ctx.tasks().debounce(SUGGEST_TASK, debounce, async move {
                tracing::debug!(%query, generation, "requesting suggestions");
                match client.suggest_cities(&query).await {
                    Ok(suggestions) => Action::SuggestDidLoad {
                        generation,
                        suggestions,
                    },
                    Err(e) => Action::SuggestDidFail {
                        generation,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::CancelSuggest => {
            ctx.tasks().cancel(&TaskKey::new(SUGGEST_TASK));
        }
        Effect::FetchWeather { target, generation } => {
            let client = client.clone();
            ctx.tasks().spawn(LOOKUP_TASK, async move {
                match client.fetch_weather(&target).await {
                    Ok(snapshot) => Action::LookupDidLoad {
                        generation,
                        snapshot: Box::new(snapshot),
                    },
                    Err(e) => {
                        tracing::info!(?target, status = ?e.status(), error = %e, "lookup failed");
                        Action::LookupDidFail {
                            generation,
                            message: e.to_string(),
                        }
                    }
                }
            });
        }
        Effect::CancelLookup => {
            ctx.tasks().cancel(&TaskKey::new(LOOKUP_TASK));
        }
    }
}
