//! Per-location, per-unit-system observation cache with a fixed TTL.

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;
use crate::store::KeyValueStore;
use crate::types::{Location, RawObservation, UnitSystem};

/// Entries older than this are treated as absent.
pub const CACHE_TTL_MS: i64 = 15 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: RawObservation,
    pub stored_at_ms: i64,
}

/// Store key for a (location, unit system) pair.
pub fn cache_key(location: &Location, units: UnitSystem) -> String {
    format!("weather_{}_{}", location.cache_key(), units)
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug)]
pub struct WeatherCache<S> {
    store: S,
}

impl<S: KeyValueStore> WeatherCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&mut self, location: &Location, units: UnitSystem) -> Option<RawObservation> {
        self.get_at(location, units, now_ms())
    }

    /// Look up an entry as of `now` (epoch ms). Expired and unreadable
    /// entries are removed and reported as a miss.
    pub fn get_at(
        &mut self,
        location: &Location,
        units: UnitSystem,
        now: i64,
    ) -> Option<RawObservation> {
        let key = cache_key(location, units);

        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                let err = WeatherError::CacheCorruption {
                    key: key.clone(),
                    message: e.to_string(),
                };
                tracing::debug!("{}", err);
                self.evict(&key);
                return None;
            }
        };

        // An age that overflows or lies in the future can only come from a
        // damaged entry.
        match now.checked_sub(entry.stored_at_ms) {
            Some(elapsed) if (0..CACHE_TTL_MS).contains(&elapsed) => {}
            Some(elapsed) if elapsed >= CACHE_TTL_MS => {
                tracing::debug!("Cache entry {} expired ({} ms old)", key, elapsed);
                self.evict(&key);
                return None;
            }
            _ => {
                tracing::debug!(
                    "Cache entry {} has an impossible timestamp {}",
                    key,
                    entry.stored_at_ms
                );
                self.evict(&key);
                return None;
            }
        }

        tracing::debug!("Cache hit for {}", key);
        Some(entry.payload)
    }

    pub fn put(
        &mut self,
        location: &Location,
        units: UnitSystem,
        payload: &RawObservation,
    ) -> Result<(), WeatherError> {
        self.put_at(location, units, payload, now_ms())
    }

    /// Overwrite the entry for this pair, stamped with `now` (epoch ms).
    pub fn put_at(
        &mut self,
        location: &Location,
        units: UnitSystem,
        payload: &RawObservation,
        now: i64,
    ) -> Result<(), WeatherError> {
        let key = cache_key(location, units);
        let entry = CacheEntry {
            payload: payload.clone(),
            stored_at_ms: now,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| WeatherError::Store(format!("Failed to serialize {}: {}", key, e)))?;
        self.store.set(&key, &json)
    }

    /// Remove every entry belonging to the given locations.
    pub fn clear(&mut self, locations: &[Location]) -> Result<(), WeatherError> {
        for location in locations {
            for units in UnitSystem::ALL {
                self.store.delete(&cache_key(location, units))?;
            }
        }
        Ok(())
    }

    fn evict(&mut self, key: &str) {
        if let Err(e) = self.store.delete(key) {
            tracing::warn!("Failed to evict cache entry {}: {}", key, e);
        }
    }
}
