//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::error::ConfigError;
use crate::format::TempUnit;

pub const DEFAULT_GEOCODE_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const SUGGESTION_LIMIT: u8 = 5;

/// Look up current weather for any city, with autocomplete.
#[derive(Parser, Debug, Clone)]
#[command(name = "skycast", version)]
#[command(about = "Check weather conditions anywhere in the world")]
pub struct Args {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Look this city up immediately on start
    #[arg(long, short)]
    pub city: Option<String>,

    /// Initial temperature unit
    #[arg(long, short, value_enum, default_value_t = TempUnit::Celsius)]
    pub units: TempUnit,

    /// Quiet period before autocomplete fires, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Geocoding endpoint
    #[arg(long, default_value = DEFAULT_GEOCODE_URL)]
    pub geocode_url: String,

    /// Current weather endpoint
    #[arg(long, default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub geocode_url: Url,
    pub weather_url: Url,
    pub debounce: Duration,
    pub timeout: Duration,
    pub suggestion_limit: u8,
    pub initial_city: Option<String>,
    pub initial_unit: TempUnit,
}

impl Config {
    /// Validate parsed arguments. A missing or blank API key is an error
    /// rather than a stream of 401s later.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?
            .to_string();

        if !(1..=10_000).contains(&args.debounce_ms) {
            return Err(ConfigError::InvalidDebounce(args.debounce_ms));
        }

        Ok(Self {
            api_key,
            geocode_url: parse_endpoint("geocoding", &args.geocode_url)?,
            weather_url: parse_endpoint("weather", &args.weather_url)?,
            debounce: Duration::from_millis(args.debounce_ms),
            timeout: Duration::from_secs(args.timeout_secs.max(1)),
            suggestion_limit: SUGGESTION_LIMIT,
            initial_city: args
                .city
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
            initial_unit: args.units,
        })
    }

    /// Config pointing both endpoints at `base`, for tests against a mock
    /// server.
    pub fn for_base_url(api_key: &str, base: &str) -> Result<Self, ConfigError> {
        let base = base.trim_end_matches('/');
        Ok(Self {
            api_key: api_key.to_string(),
            geocode_url: parse_endpoint("geocoding", &format!("{base}/geo/1.0/direct"))?,
            weather_url: parse_endpoint("weather", &format!("{base}/data/2.5/weather"))?,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            timeout: Duration::from_secs(5),
            suggestion_limit: SUGGESTION_LIMIT,
            initial_city: None,
            initial_unit: TempUnit::Celsius,
        })
    }
}

fn parse_endpoint(which: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        which,
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
