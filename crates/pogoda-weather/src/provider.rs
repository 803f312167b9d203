//! OpenWeatherMap current-conditions fetcher.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{Location, RawObservation, UnitSystem};

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Network call returning the current observation for a point.
///
/// Implementations never retry; a failure carries the location it was for.
#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<RawObservation, WeatherError>;
}

#[async_trait]
impl<T: WeatherFetcher + ?Sized> WeatherFetcher for Arc<T> {
    async fn fetch(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<RawObservation, WeatherError> {
        (**self).fetch(location, units).await
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, OPENWEATHER_URL, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| WeatherError::network("client", e))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    #[instrument(skip(self, location), fields(city = %location.name), level = "debug")]
    async fn fetch(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<RawObservation, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("units", units.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::network(&location.name, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::network(
                &location.name,
                format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }

        response
            .json::<RawObservation>()
            .await
            .map_err(|e| WeatherError::network(&location.name, format!("invalid response: {}", e)))
    }
}
