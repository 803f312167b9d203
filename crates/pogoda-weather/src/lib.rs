//! Weather pipeline for Pogoda
//!
//! Fetches current conditions for a fixed set of locations, caches them per
//! unit system with a 15 minute TTL, and derives a day/night-aware icon for
//! display.

pub mod aggregator;
pub mod cache;
pub mod error;
pub mod icon;
pub mod location;
pub mod normalize;
pub mod provider;
pub mod store;
pub mod types;

pub use aggregator::{DisplayReading, ObservationSet, RefreshSummary, WeatherAggregator};
pub use cache::{WeatherCache, CACHE_TTL_MS};
pub use error::WeatherError;
pub use icon::{resolve_icon, DaySegment, Icon, IconKey, DEFAULT_ICON_BASE_URL};
pub use location::default_locations;
pub use normalize::normalize;
pub use provider::{OpenWeatherClient, WeatherFetcher, OPENWEATHER_URL};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
pub use types::*;
