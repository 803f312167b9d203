//! Raw provider payload to [`NormalizedObservation`].

use crate::error::WeatherError;
use crate::types::{NormalizedObservation, RawObservation};

pub const UNKNOWN_CONDITION: &str = "Unknown";
pub const UNKNOWN_DETAIL: &str = "no description";

/// Apply the defaulting rules to a provider payload.
///
/// `now_epoch` (unix seconds) stands in for the report time when the payload
/// has no `dt`. A missing sunset defaults to 0, so such observations are
/// always night.
///
/// # Errors
/// Returns `WeatherError::MalformedObservation` when `main.temp` is absent.
pub fn normalize(
    location: &str,
    raw: &RawObservation,
    now_epoch: i64,
) -> Result<NormalizedObservation, WeatherError> {
    let temp = raw
        .temperature()
        .ok_or_else(|| WeatherError::MalformedObservation {
            location: location.to_string(),
            field: "main.temp",
        })?;

    let condition = raw.first_condition();
    let condition_class = condition
        .and_then(|c| non_empty(c.main.as_deref()))
        .unwrap_or(UNKNOWN_CONDITION)
        .to_string();
    let condition_detail = condition
        .and_then(|c| non_empty(c.description.as_deref()))
        .unwrap_or(UNKNOWN_DETAIL)
        .to_lowercase();

    let sunset_epoch = raw.sunset().unwrap_or_else(|| {
        tracing::debug!("No sunset for {}, treating as night", location);
        0
    });
    let observed_at = raw.dt.unwrap_or(now_epoch);

    Ok(NormalizedObservation {
        location: location.to_string(),
        temperature_whole: temp.floor() as i64,
        condition_class,
        condition_detail,
        sunset_epoch,
        is_daytime: observed_at < sunset_epoch,
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawObservation {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_clear_day_scenario() {
        let raw = parse(
            r#"{"main":{"temp":5.9},"weather":[{"main":"Clear","description":"clear sky"}],"sys":{"sunset":2000},"dt":1000}"#,
        );
        let obs = normalize("Gdańsk", &raw, 0).unwrap();

        assert_eq!(obs.location, "Gdańsk");
        assert_eq!(obs.temperature_whole, 5);
        assert_eq!(obs.condition_class, "Clear");
        assert_eq!(obs.condition_detail, "clear sky");
        assert_eq!(obs.sunset_epoch, 2000);
        assert!(obs.is_daytime);
    }

    #[test]
    fn test_after_sunset_is_night() {
        let raw = parse(
            r#"{"main":{"temp":1.0},"weather":[{"main":"Clear","description":"clear sky"}],"sys":{"sunset":2000},"dt":3000}"#,
        );
        assert!(!normalize("Hel", &raw, 0).unwrap().is_daytime);
    }

    #[test]
    fn test_sunset_boundary() {
        let before = parse(r#"{"main":{"temp":0},"sys":{"sunset":1000},"dt":999}"#);
        let at = parse(r#"{"main":{"temp":0},"sys":{"sunset":1000},"dt":1000}"#);

        assert!(normalize("Ustka", &before, 0).unwrap().is_daytime);
        assert!(!normalize("Ustka", &at, 0).unwrap().is_daytime);
    }

    #[test]
    fn test_missing_dt_uses_now() {
        let raw = parse(r#"{"main":{"temp":0},"sys":{"sunset":1000}}"#);
        assert!(normalize("Puck", &raw, 999).unwrap().is_daytime);
        assert!(!normalize("Puck", &raw, 1000).unwrap().is_daytime);
    }

    #[test]
    fn test_missing_sunset_is_night() {
        let raw = parse(r#"{"main":{"temp":12.3},"dt":5}"#);
        let obs = normalize("Łeba", &raw, 0).unwrap();
        assert_eq!(obs.sunset_epoch, 0);
        assert!(!obs.is_daytime);
    }

    #[test]
    fn test_missing_weather_defaults() {
        let raw = parse(r#"{"main":{"temp":3.0}}"#);
        let obs = normalize("Tczew", &raw, 0).unwrap();
        assert_eq!(obs.condition_class, "Unknown");
        assert_eq!(obs.condition_detail, "no description");
    }

    #[test]
    fn test_empty_weather_fields_default() {
        let raw = parse(r#"{"main":{"temp":3.0},"weather":[{"main":"","description":null}]}"#);
        let obs = normalize("Tczew", &raw, 0).unwrap();
        assert_eq!(obs.condition_class, "Unknown");
        assert_eq!(obs.condition_detail, "no description");
    }

    #[test]
    fn test_detail_is_lowercased() {
        let raw = parse(
            r#"{"main":{"temp":3.0},"weather":[{"main":"Clouds","description":"Broken Clouds"}]}"#,
        );
        assert_eq!(
            normalize("Kartuzy", &raw, 0).unwrap().condition_detail,
            "broken clouds"
        );
    }

    #[test]
    fn test_negative_temperature_floors_down() {
        let raw = parse(r#"{"main":{"temp":-0.5}}"#);
        assert_eq!(normalize("Hel", &raw, 0).unwrap().temperature_whole, -1);
    }

    #[test]
    fn test_missing_temperature_is_malformed() {
        let raw = parse(r#"{"weather":[{"main":"Rain","description":"light rain"}]}"#);
        let err = normalize("Bytów", &raw, 0).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MalformedObservation { ref location, field: "main.temp" } if location == "Bytów"
        ));
    }

    #[test]
    fn test_deterministic() {
        let raw = parse(r#"{"main":{"temp":7.7},"weather":[{"main":"Mist","description":"mist"}]}"#);
        assert_eq!(
            normalize("Malbork", &raw, 42).unwrap(),
            normalize("Malbork", &raw, 42).unwrap()
        );
    }
}
