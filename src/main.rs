use anyhow::{Context, Result};
use clap::Parser;
use pogoda_core::{Config, ConfigError};
use pogoda_weather::{
    default_locations, OpenWeatherClient, SqliteStore, UnitSystem, WeatherAggregator,
};

mod cli;

/// Put the short explanation in front of configuration failures.
fn explain_config_error(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<ConfigError>() {
        Some(config_err) => {
            let hint = config_err.user_message();
            err.context(hint)
        }
        None => err,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    pogoda_core::init()?;

    let (config, _warnings) = Config::load_validated().map_err(explain_config_error)?;
    let Some(api_key) = config.weather.resolved_api_key() else {
        let err = ConfigError::MissingSetting("weather.api_key".to_string());
        return Err(explain_config_error(err.into()));
    };

    let fetcher = OpenWeatherClient::with_base_url(
        &api_key,
        &config.weather.api_url,
        config.weather.request_timeout_secs,
    )?;

    std::fs::create_dir_all(&config.config_dir).context("Failed to create config directory")?;
    let store = SqliteStore::open(config.cache_path())?;

    let aggregator = WeatherAggregator::new(default_locations(), fetcher, store)
        .with_icon_base_url(config.weather.icon_base_url.clone());

    if args.clear_cache {
        aggregator.clear_cache()?;
        tracing::info!("Weather cache cleared");
    }

    aggregator.refresh_all().await;

    let units = if args.imperial {
        UnitSystem::Imperial
    } else if args.metric {
        UnitSystem::Metric
    } else {
        config.weather.units
    };
    aggregator.switch_active_unit_system(units);

    for location in aggregator.locations() {
        match aggregator.display(&location.name) {
            Some(reading) => println!(
                "{:<20} {:>4}{}  {}",
                reading.name, reading.temperature, reading.unit_label, reading.icon_url
            ),
            None => println!("{:<20}    -", location.name),
        }
    }

    if let Some(error) = aggregator.last_error() {
        tracing::debug!("Last weather error: {}", error);
        eprintln!("\n{}", error.user_message());
    }

    Ok(())
}
