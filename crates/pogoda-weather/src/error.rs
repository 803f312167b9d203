//! Weather pipeline error types.
//!
//! Every variant is scoped to a single (location, unit system) pair; none of
//! them aborts a refresh cycle.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum WeatherError {
    #[error("Error fetching weather data for {location}: {message}")]
    Network { location: String, message: String },

    #[error("Malformed observation for {location}: missing {field}")]
    MalformedObservation {
        location: String,
        field: &'static str,
    },

    #[error("Corrupt cache entry {key}: {message}")]
    CacheCorruption { key: String, message: String },

    #[error("Store error: {0}")]
    Store(String),
}

impl WeatherError {
    pub fn network(location: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Network {
            location: location.into(),
            message: cause.to_string(),
        }
    }

    /// Short message for the map's error line; `Display` keeps the detail
    /// for logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { location, .. } => {
                format!("Could not load weather for {}. Check your connection.", location)
            }
            Self::MalformedObservation { location, .. } => {
                format!("Weather data for {} is incomplete.", location)
            }
            Self::CacheCorruption { .. } => "Cached weather data was discarded.".to_string(),
            Self::Store(_) => "Local weather cache is unavailable.".to_string(),
        }
    }

    /// Whether this error is recorded as the displayed error message.
    /// Cache problems degrade to a refetch and are never shown.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::MalformedObservation { .. }
        )
    }
}

impl From<rusqlite::Error> for WeatherError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Store(e.to_string())
    }
}
