use thiserror::Error;

/// Problems with the startup configuration. Fatal: reported before the
/// terminal is taken over.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no OpenWeather API key: set OPENWEATHER_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("invalid {which} endpoint {url:?}: {reason}")]
    InvalidUrl {
        which: &'static str,
        url: String,
        reason: String,
    },

    #[error("debounce must be between 1 and 10000 ms, got {0}")]
    InvalidDebounce(u64),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failure of a single geocoding or weather request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 from the weather endpoint. Carries the upstream message verbatim.
    #[error("{message}")]
    NotFound { message: String },

    /// Any other non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A success response whose body did not have the expected shape.
    #[error("unexpected response from weather service: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Upstream { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}
