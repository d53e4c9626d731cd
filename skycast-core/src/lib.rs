//! Runtime pieces shared by the skycast terminal app.
//!
//! The app follows a reducer/effect split:
//!
//! - **Action**: something that happened (a key press turned into intent,
//!   or the result of an HTTP call coming back)
//! - **Reducer**: `fn(&mut State, Action) -> DispatchResult<Effect>`, pure
//! - **Effect**: declarative description of async work the reducer wants
//! - **TaskManager**: runs effects as keyed tokio tasks (spawn, debounce,
//!   cancel); results come back as actions
//! - **EffectRuntime**: polls terminal events, drains the action queue,
//!   renders when state changed
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::SearchSubmit => {
//!             state.error = None;
//!             DispatchResult::changed_with(Effect::FetchWeather { .. })
//!         }
//!         Action::LookupDidLoad { .. } => DispatchResult::changed(),
//!     }
//! }
//! ```
//!
//! Result actions use a `Did` infix (`LookupDidLoad`, `SuggestDidFail`) so
//! intent and outcome are easy to tell apart in logs.

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod runtime;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore, Middleware, TracingMiddleware};
pub use event::EventKind;
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};
