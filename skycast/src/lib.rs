//! skycast: terminal weather lookup with city autocomplete
//!
//! Keys go through components into [`action::Action`]s, the
//! [`reducer::reducer`] updates [`state::AppState`] and declares
//! [`effect::Effect`]s, and [`effect::handle_effect`] runs them as keyed
//! tasks against the OpenWeather API.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod format;
pub mod reducer;
pub mod state;
