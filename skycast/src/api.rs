//! OpenWeather geocoding and current-weather client

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{ApiError, ConfigError};

/// Shown when a failed lookup carries no upstream message.
pub const NOT_FOUND_FALLBACK: &str = "City not found";

// ============================================================================
// Payloads
// ============================================================================

/// One geocoding candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Suggestion {
    /// `"Springfield, US, Illinois"`, or `"Paris, FR"` without a state.
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        if !self.country.is_empty() {
            label.push_str(", ");
            label.push_str(&self.country);
        }
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            label.push_str(", ");
            label.push_str(state);
        }
        label
    }

    /// Secondary text for the suggestion list: country and state.
    pub fn region(&self) -> String {
        match self.state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}", self.country, state),
            None => self.country.clone(),
        }
    }

    pub fn target(&self) -> LookupTarget {
        LookupTarget::Coordinates {
            lat: self.lat,
            lon: self.lon,
            label: self.label(),
        }
    }
}

/// Current conditions for one place, metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub name: String,
    pub sys: Sys,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub clouds: Clouds,
    /// Shift from UTC in seconds.
    #[serde(default)]
    pub timezone: i32,
}

impl WeatherSnapshot {
    /// The primary condition, when the payload lists any.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u16,
    pub main: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// What to look up: a typed city name or a picked suggestion.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupTarget {
    City(String),
    Coordinates { lat: f64, lon: f64, label: String },
}

impl LookupTarget {
    /// Name to show for the result, when the target carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            LookupTarget::City(_) => None,
            LookupTarget::Coordinates { label, .. } => Some(label),
        }
    }
}

/// Cheap to clone; every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
    geocode_url: reqwest::Url,
    weather_url: reqwest::Url,
    suggestion_limit: u8,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            geocode_url: config.geocode_url.clone(),
            weather_url: config.weather_url.clone(),
            suggestion_limit: config.suggestion_limit,
        })
    }

    /// Up to `suggestion_limit` places matching `query`.
    pub async fn suggest_cities(&self, query: &str) -> Result<Vec<Suggestion>, ApiError> {
        let limit = self.suggestion_limit.to_string();
        let request = self.http.get(self.geocode_url.clone()).query(&[
            ("q", query),
            ("limit", limit.as_str()),
            ("appid", self.api_key.as_str()),
        ]);

        let response = request.send().await.map_err(ApiError::Transport)?;
        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Current conditions for a city name or a coordinate pair.
    pub async fn fetch_weather(&self, target: &LookupTarget) -> Result<WeatherSnapshot, ApiError> {
        let request = self.http.get(self.weather_url.clone());
        let request = match target {
            LookupTarget::City(name) => request.query(&[("q", name.as_str())]),
            LookupTarget::Coordinates { lat, lon, .. } => {
                request.query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            }
        };
        let request = request.query(&[("appid", self.api_key.as_str()), ("units", "metric")]);

        let response = request.send().await.map_err(ApiError::Transport)?;
        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }
}

/// Pass success responses through, turn everything else into an
/// `ApiError` carrying the body's `message` field when it has one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| NOT_FOUND_FALLBACK.to_string());

    tracing::debug!(status = status.as_u16(), %message, "request rejected");

    if status == reqwest::StatusCode::NOT_FOUND {
        Err(ApiError::NotFound { message })
    } else {
        Err(ApiError::Upstream {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{
        "coord": {"lon": 2.3488, "lat": 48.8534},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 21.4, "feels_like": 20.9, "temp_min": 19.8, "temp_max": 23.1,
                 "pressure": 1016, "humidity": 48},
        "visibility": 10000,
        "wind": {"speed": 3.6, "deg": 250},
        "clouds": {"all": 0},
        "dt": 1718960000,
        "sys": {"country": "FR", "sunrise": 1718941500, "sunset": 1718999900},
        "timezone": 7200,
        "name": "Paris",
        "cod": 200
    }"#;

    #[test]
    fn test_decode_weather_payload() {
        let snapshot: WeatherSnapshot = serde_json::from_str(PARIS).unwrap();

        assert_eq!(snapshot.name, "Paris");
        assert_eq!(snapshot.sys.country, "FR");
        assert_eq!(snapshot.main.humidity, 48);
        assert_eq!(snapshot.wind.deg, Some(250.0));
        assert_eq!(snapshot.visibility, Some(10_000));
        assert_eq!(snapshot.timezone, 7200);
        assert_eq!(snapshot.condition().map(|c| c.main.as_str()), Some("Clear"));
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        let json = r#"{
            "name": "Nowhere",
            "sys": {"sunrise": 1, "sunset": 2},
            "main": {"temp": 1.0, "feels_like": 0.0, "temp_min": 0.0, "temp_max": 2.0,
                     "pressure": 1000, "humidity": 90},
            "wind": {"speed": 0.0}
        }"#;
        let snapshot: WeatherSnapshot = serde_json::from_str(json).unwrap();

        assert!(snapshot.condition().is_none());
        assert!(snapshot.visibility.is_none());
        assert!(snapshot.wind.deg.is_none());
        assert_eq!(snapshot.timezone, 0);
    }

    #[test]
    fn test_suggestion_label() {
        let paris = Suggestion {
            name: "Paris".into(),
            country: "FR".into(),
            state: None,
            lat: 48.85,
            lon: 2.35,
        };
        assert_eq!(paris.label(), "Paris, FR");
        assert_eq!(paris.region(), "FR");

        let springfield = Suggestion {
            name: "Springfield".into(),
            country: "US".into(),
            state: Some("Illinois".into()),
            lat: 39.8,
            lon: -89.6,
        };
        assert_eq!(springfield.label(), "Springfield, US, Illinois");
        assert_eq!(springfield.region(), "US, Illinois");
        assert_eq!(
            springfield.target().label(),
            Some("Springfield, US, Illinois")
        );
    }
}
