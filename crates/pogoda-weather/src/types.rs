use serde::{Deserialize, Serialize};

/// Measurement convention requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Imperial];

    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Temperature label shown next to a reading
    pub fn temperature_label(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a location marker on the map, in percent of width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPlacement {
    pub left: u8,
    pub top: u8,
}

/// Named geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub placement: MapPlacement,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, left: u8, top: u8) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            placement: MapPlacement { left, top },
        }
    }

    /// Cache key component derived from the coordinates, so renaming a
    /// location keeps its cached entries.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.latitude, self.longitude)
    }
}

/// Provider payload. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<RawMain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Vec<RawCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<RawSys>,
    /// Report time, unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMain {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSys {
    /// Sunset, unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
}

impl RawObservation {
    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    pub fn first_condition(&self) -> Option<&RawCondition> {
        self.weather.as_ref().and_then(|w| w.first())
    }

    pub fn sunset(&self) -> Option<i64> {
        self.sys.as_ref().and_then(|s| s.sunset)
    }
}

/// Observation after defaulting rules have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedObservation {
    pub location: String,
    pub temperature_whole: i64,
    pub condition_class: String,
    /// Always lowercase
    pub condition_detail: String,
    pub sunset_epoch: i64,
    pub is_daytime: bool,
}

/// Per (location, unit system) refresh progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
    Cached,
    Failed,
}
