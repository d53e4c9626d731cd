//! skycast - current weather for any city, in the terminal
//!
//! ```sh
//! export OPENWEATHER_API_KEY=...
//! skycast
//! skycast --city Paris --units fahrenheit
//! RUST_LOG=skycast=debug skycast --log-file skycast.log
//! ```

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use skycast_core::{EffectRuntime, EffectStore, EventKind, EventOutcome, TracingMiddleware};
use tracing_subscriber::EnvFilter;

use skycast::action::Action;
use skycast::api::OpenWeatherClient;
use skycast::components::{
    Component, ResultView, ResultViewProps, SearchView, SearchViewProps,
};
use skycast::config::{Args, Config};
use skycast::effect::handle_effect;
use skycast::reducer::reducer;
use skycast::state::{AppState, TICK_MS};

const DEFAULT_LOG_FILTER: &str = "skycast=info,skycast_core=info";

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let client = match OpenWeatherClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        geocode = %config.geocode_url,
        weather = %config.weather_url,
        debounce_ms = config.debounce.as_millis() as u64,
        "starting"
    );

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, client).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

/// Plain-text logs to `path`; nothing reaches the terminal the UI owns.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

struct SkycastUi {
    search: SearchView,
    result: ResultView,
}

impl SkycastUi {
    fn new() -> Self {
        Self {
            search: SearchView::new(),
            result: ResultView,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if state.is_search() {
            let props = SearchViewProps {
                state,
                is_focused: true,
            };
            self.search.render(frame, area, props);
        } else {
            let props = ResultViewProps {
                state,
                now: chrono::Utc::now().timestamp(),
                is_focused: true,
            };
            self.result.render(frame, area, props);
        }
    }

    fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(width, height) => {
                return EventOutcome::action(Action::UiTerminalResize(*width, *height))
                    .with_render();
            }
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c') =>
            {
                return EventOutcome::action(Action::Quit);
            }
            _ => {}
        }

        if state.is_search() {
            let props = SearchViewProps {
                state,
                is_focused: true,
            };
            // Cursor moves change nothing in state but still need a redraw
            EventOutcome::from_actions(self.search.handle_event(event, props)).with_render()
        } else {
            let props = ResultViewProps {
                state,
                now: chrono::Utc::now().timestamp(),
                is_focused: true,
            };
            EventOutcome::from_actions(self.result.handle_event(event, props))
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
    client: OpenWeatherClient,
) -> io::Result<()> {
    let mut state = AppState::new(config.initial_unit);
    if let Some(city) = &config.initial_city {
        state.query = city.clone();
    }

    let store = EffectStore::with_middleware(state, reducer, TracingMiddleware);
    let mut runtime = EffectRuntime::from_store(store);

    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);

    if config.initial_city.is_some() {
        runtime.enqueue(Action::SearchSubmit);
    }

    let debounce = config.debounce;
    let ui = RefCell::new(SkycastUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(effect, ctx, &client, debounce),
        )
        .await
}
