//! Fetch-or-reuse orchestration over all registered locations.
//!
//! Each (location, unit system) pair moves through
//! `Idle -> Fetching -> {Cached, Failed}` independently; a cache hit goes
//! straight to `Cached` without touching the fetcher. All pairs of a refresh
//! are polled concurrently on the calling task, so locks below are only held
//! for synchronous sections and never across an await.

use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::cache::{now_ms, WeatherCache};
use crate::error::WeatherError;
use crate::icon::{resolve_icon, Icon, DEFAULT_ICON_BASE_URL};
use crate::normalize::normalize;
use crate::provider::WeatherFetcher;
use crate::store::KeyValueStore;
use crate::types::{FetchState, Location, MapPlacement, NormalizedObservation, UnitSystem};

/// Location name to its latest observation, for one unit system.
pub type ObservationSet = HashMap<String, NormalizedObservation>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshOutcome {
    CacheHit,
    Fetched,
    Failed,
}

/// Counts from one refresh call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub cache_hits: usize,
    pub fetched: usize,
    pub failed: usize,
}

impl RefreshSummary {
    fn merge(mut self, other: RefreshSummary) -> Self {
        self.cache_hits += other.cache_hits;
        self.fetched += other.fetched;
        self.failed += other.failed;
        self
    }
}

/// What the map shows for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayReading {
    pub name: String,
    pub temperature: i64,
    pub unit_label: &'static str,
    pub icon: Icon,
    pub icon_url: String,
    pub placement: MapPlacement,
}

pub struct WeatherAggregator<F, S> {
    locations: Vec<Location>,
    fetcher: F,
    cache: Mutex<WeatherCache<S>>,
    observations: Mutex<HashMap<UnitSystem, ObservationSet>>,
    states: Mutex<HashMap<(String, UnitSystem), FetchState>>,
    active: Mutex<UnitSystem>,
    last_error: Mutex<Option<WeatherError>>,
    icon_base_url: String,
}

impl<F: WeatherFetcher, S: KeyValueStore> WeatherAggregator<F, S> {
    pub fn new(locations: Vec<Location>, fetcher: F, store: S) -> Self {
        Self {
            locations,
            fetcher,
            cache: Mutex::new(WeatherCache::new(store)),
            observations: Mutex::new(HashMap::new()),
            states: Mutex::new(HashMap::new()),
            active: Mutex::new(UnitSystem::default()),
            last_error: Mutex::new(None),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }

    pub fn with_icon_base_url(mut self, url: impl Into<String>) -> Self {
        self.icon_base_url = url.into();
        self
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Refresh every location for one unit system. Failures are recorded
    /// per location and never abort the others.
    pub async fn refresh(&self, units: UnitSystem) -> RefreshSummary {
        self.refresh_at(units, now_ms()).await
    }

    /// Same as [`refresh`](Self::refresh), with cache freshness judged and
    /// new entries stamped at `now` (epoch ms).
    pub async fn refresh_at(&self, units: UnitSystem, now: i64) -> RefreshSummary {
        let outcomes = join_all(
            self.locations
                .iter()
                .map(|location| self.refresh_location(location, units, now)),
        )
        .await;

        let mut summary = RefreshSummary::default();
        for outcome in outcomes {
            match outcome {
                RefreshOutcome::CacheHit => summary.cache_hits += 1,
                RefreshOutcome::Fetched => summary.fetched += 1,
                RefreshOutcome::Failed => summary.failed += 1,
            }
        }

        tracing::info!(
            "Refreshed {} weather: {} cached, {} fetched, {} failed",
            units,
            summary.cache_hits,
            summary.fetched,
            summary.failed
        );
        summary
    }

    /// Refresh both unit systems concurrently, so switching units later
    /// needs no network round trip.
    pub async fn refresh_all(&self) -> RefreshSummary {
        let summaries = join_all(UnitSystem::ALL.map(|units| self.refresh(units))).await;
        summaries
            .into_iter()
            .fold(RefreshSummary::default(), RefreshSummary::merge)
    }

    pub fn get_current(&self, location: &str, units: UnitSystem) -> Option<NormalizedObservation> {
        self.observations
            .lock()
            .get(&units)
            .and_then(|set| set.get(location))
            .cloned()
    }

    /// Change which observation set display queries read. Never refetches.
    pub fn switch_active_unit_system(&self, units: UnitSystem) {
        *self.active.lock() = units;
    }

    pub fn active_unit_system(&self) -> UnitSystem {
        *self.active.lock()
    }

    pub fn state(&self, location: &str, units: UnitSystem) -> FetchState {
        self.states
            .lock()
            .get(&(location.to_string(), units))
            .copied()
            .unwrap_or_default()
    }

    /// Most recent user-visible error. Overwritten by the next one and
    /// never cleared.
    pub fn last_error(&self) -> Option<WeatherError> {
        self.last_error.lock().clone()
    }

    /// Reading for a location in the active unit system.
    pub fn display(&self, location: &str) -> Option<DisplayReading> {
        let units = self.active_unit_system();
        let placement = self
            .locations
            .iter()
            .find(|l| l.name == location)?
            .placement;
        let observation = self.get_current(location, units)?;
        let icon = resolve_icon(&observation);

        Some(DisplayReading {
            name: observation.location,
            temperature: observation.temperature_whole,
            unit_label: units.temperature_label(),
            icon,
            icon_url: icon.href(&self.icon_base_url),
            placement,
        })
    }

    pub fn clear_cache(&self) -> Result<(), WeatherError> {
        self.cache.lock().clear(&self.locations)
    }

    async fn refresh_location(
        &self,
        location: &Location,
        units: UnitSystem,
        now: i64,
    ) -> RefreshOutcome {
        let now_secs = now / 1000;
        let cached = self.cache.lock().get_at(location, units, now);
        if let Some(raw) = cached {
            match normalize(&location.name, &raw, now_secs) {
                Ok(observation) => {
                    self.publish(units, observation);
                    self.set_state(location, units, FetchState::Cached);
                    return RefreshOutcome::CacheHit;
                }
                Err(e) => tracing::debug!("Ignoring cached entry: {}", e),
            }
        }

        self.set_state(location, units, FetchState::Fetching);

        let result = self
            .fetcher
            .fetch(location, units)
            .await
            .and_then(|raw| normalize(&location.name, &raw, now_secs).map(|obs| (raw, obs)));

        match result {
            Ok((raw, observation)) => {
                if let Err(e) = self.cache.lock().put_at(location, units, &raw, now) {
                    tracing::warn!("Failed to cache weather for {}: {}", location.name, e);
                }
                self.publish(units, observation);
                self.set_state(location, units, FetchState::Cached);
                RefreshOutcome::Fetched
            }
            Err(e) => {
                tracing::warn!("{}", e);
                if e.is_user_visible() {
                    *self.last_error.lock() = Some(e);
                }
                self.set_state(location, units, FetchState::Failed);
                RefreshOutcome::Failed
            }
        }
    }

    fn publish(&self, units: UnitSystem, observation: NormalizedObservation) {
        self.observations
            .lock()
            .entry(units)
            .or_default()
            .insert(observation.location.clone(), observation);
    }

    fn set_state(&self, location: &Location, units: UnitSystem, state: FetchState) {
        self.states
            .lock()
            .insert((location.name.clone(), units), state);
    }
}
