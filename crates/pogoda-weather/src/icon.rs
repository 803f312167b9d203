//! Presentation icon for a normalized observation.

use crate::types::NormalizedObservation;

pub const DEFAULT_ICON_BASE_URL: &str =
    "https://ocdn.eu/ucs/static/pogoda/578fda62bf6ad47469548f67246cf7fc/mainWidget/png_icons_70";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySegment {
    Day,
    Night,
}

impl DaySegment {
    pub fn of(observation: &NormalizedObservation) -> Self {
        if observation.is_daytime {
            Self::Day
        } else {
            Self::Night
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

/// Lookup key. `segment` is only set for conditions that look different
/// at night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconKey<'a> {
    pub class: &'a str,
    pub detail: &'a str,
    pub segment: Option<DaySegment>,
}

impl<'a> IconKey<'a> {
    pub fn for_observation(observation: &'a NormalizedObservation) -> Self {
        let class = observation.condition_class.as_str();
        let detail = observation.condition_detail.as_str();
        let segment = has_night_variant(class, detail).then(|| DaySegment::of(observation));
        Self {
            class,
            detail,
            segment,
        }
    }
}

impl std::fmt::Display for IconKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.class, self.detail)?;
        if let Some(segment) = self.segment {
            write!(f, "_{}", segment.suffix())?;
        }
        Ok(())
    }
}

fn has_night_variant(class: &str, detail: &str) -> bool {
    class == "Clear" || (class == "Clouds" && detail.contains("few"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    ClearDay,
    FewCloudsDay,
    ScatteredClouds,
    BrokenClouds,
    OvercastClouds,
    LightRain,
    ModerateRain,
    HeavyIntensityRain,
    VeryHeavyRain,
    FreezingRain,
    LightSnow,
    ModerateSnow,
    HeavySnow,
    ThunderstormWithLightRain,
    ThunderstormWithRain,
    ThunderstormWithHeavyRain,
    LightThunderstorm,
    ClearNight,
    FewCloudsNight,
    BrokenCloudsNight,
    FogNight,
    Unknown,
}

impl Icon {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ClearDay => "1.png",
            Self::FewCloudsDay => "2.png",
            Self::ScatteredClouds => "3.png",
            Self::BrokenClouds => "4.png",
            Self::OvercastClouds => "5.png",
            Self::LightRain => "6.png",
            Self::ModerateRain => "7.png",
            Self::HeavyIntensityRain => "8.png",
            Self::VeryHeavyRain => "9.png",
            Self::FreezingRain => "10.png",
            Self::LightSnow => "11.png",
            Self::ModerateSnow => "12.png",
            Self::HeavySnow => "13.png",
            Self::ThunderstormWithLightRain => "14.png",
            Self::ThunderstormWithRain => "15.png",
            Self::ThunderstormWithHeavyRain => "16.png",
            Self::LightThunderstorm => "17.png",
            Self::Unknown => "18.png",
            Self::ClearNight => "19.png",
            Self::FewCloudsNight => "20.png",
            Self::BrokenCloudsNight => "21.png",
            Self::FogNight => "22.png",
        }
    }

    /// Full icon URL under `base_url`.
    pub fn href(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.file_name())
    }
}

/// Resolve the icon for an observation. Total: unmatched combinations map
/// to [`Icon::Unknown`].
pub fn resolve_icon(observation: &NormalizedObservation) -> Icon {
    if !observation.is_daytime {
        if let Some(icon) =
            night_override(&observation.condition_class, &observation.condition_detail)
        {
            return icon;
        }
    }

    let key = IconKey::for_observation(observation);
    let icon = lookup(&key);
    if icon == Icon::Unknown {
        tracing::debug!("No icon for {}, using fallback", key);
    }
    icon
}

// Checked in priority order.
fn night_override(class: &str, detail: &str) -> Option<Icon> {
    if class == "Clear" {
        Some(Icon::ClearNight)
    } else if class == "Clouds" && detail.contains("few") {
        Some(Icon::FewCloudsNight)
    } else if class == "Clouds" && detail == "broken clouds" {
        Some(Icon::BrokenCloudsNight)
    } else if matches!(class, "Fog" | "Mist" | "Haze") {
        Some(Icon::FogNight)
    } else {
        None
    }
}

fn lookup(key: &IconKey<'_>) -> Icon {
    use DaySegment::Day;

    match (key.class, key.detail, key.segment) {
        ("Clear", "clear sky", Some(Day)) => Icon::ClearDay,
        ("Clouds", "few clouds", Some(Day)) => Icon::FewCloudsDay,
        ("Clouds", "scattered clouds", None) => Icon::ScatteredClouds,
        ("Clouds", "broken clouds", None) => Icon::BrokenClouds,
        ("Clouds", "overcast clouds", None) => Icon::OvercastClouds,
        ("Rain", "light rain", None) => Icon::LightRain,
        ("Rain", "moderate rain", None) => Icon::ModerateRain,
        ("Rain", "heavy intensity rain", None) => Icon::HeavyIntensityRain,
        ("Rain", "very heavy rain", None) => Icon::VeryHeavyRain,
        ("Rain", "freezing rain", None) => Icon::FreezingRain,
        ("Snow", "light snow", None) => Icon::LightSnow,
        ("Snow", "moderate snow", None) => Icon::ModerateSnow,
        ("Snow", "heavy snow", None) => Icon::HeavySnow,
        ("Thunderstorm", "thunderstorm with light rain", None) => Icon::ThunderstormWithLightRain,
        ("Thunderstorm", "thunderstorm with rain", None) => Icon::ThunderstormWithRain,
        ("Thunderstorm", "thunderstorm with heavy rain", None) => Icon::ThunderstormWithHeavyRain,
        ("Thunderstorm", "light thunderstorm", None) => Icon::LightThunderstorm,
        _ => Icon::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(class: &str, detail: &str, is_daytime: bool) -> NormalizedObservation {
        NormalizedObservation {
            location: "Gdańsk".to_string(),
            temperature_whole: 5,
            condition_class: class.to_string(),
            condition_detail: detail.to_string(),
            sunset_epoch: 2000,
            is_daytime,
        }
    }

    #[test]
    fn test_key_suffix_only_for_day_night_conditions() {
        let clear = obs("Clear", "clear sky", true);
        assert_eq!(IconKey::for_observation(&clear).to_string(), "Clear_clear sky_day");

        let few = obs("Clouds", "few clouds", false);
        assert_eq!(IconKey::for_observation(&few).to_string(), "Clouds_few clouds_night");

        let rain = obs("Rain", "light rain", false);
        assert_eq!(IconKey::for_observation(&rain).to_string(), "Rain_light rain");
    }

    #[test]
    fn test_clear_day() {
        assert_eq!(resolve_icon(&obs("Clear", "clear sky", true)), Icon::ClearDay);
    }

    #[test]
    fn test_clear_night_overrides_any_detail() {
        assert_eq!(resolve_icon(&obs("Clear", "clear sky", false)), Icon::ClearNight);
        assert_eq!(resolve_icon(&obs("Clear", "sky is clear", false)), Icon::ClearNight);
    }

    #[test]
    fn test_few_clouds_day_and_night() {
        assert_eq!(resolve_icon(&obs("Clouds", "few clouds", true)), Icon::FewCloudsDay);
        assert_eq!(resolve_icon(&obs("Clouds", "few clouds", false)), Icon::FewCloudsNight);
        // Any detail mentioning "few" gets the night icon
        assert_eq!(
            resolve_icon(&obs("Clouds", "few clouds: 11-25%", false)),
            Icon::FewCloudsNight
        );
    }

    #[test]
    fn test_broken_clouds_day_and_night() {
        assert_eq!(resolve_icon(&obs("Clouds", "broken clouds", true)), Icon::BrokenClouds);
        assert_eq!(
            resolve_icon(&obs("Clouds", "broken clouds", false)),
            Icon::BrokenCloudsNight
        );
    }

    #[test]
    fn test_fog_family_at_night() {
        for class in ["Fog", "Mist", "Haze"] {
            assert_eq!(resolve_icon(&obs(class, "whatever", false)), Icon::FogNight);
        }
        // No daytime entry for fog
        assert_eq!(resolve_icon(&obs("Mist", "mist", true)), Icon::Unknown);
    }

    #[test]
    fn test_night_without_override_uses_general_table() {
        assert_eq!(resolve_icon(&obs("Rain", "light rain", false)), Icon::LightRain);
        assert_eq!(
            resolve_icon(&obs("Clouds", "overcast clouds", false)),
            Icon::OvercastClouds
        );
    }

    #[test]
    fn test_general_table() {
        let cases = [
            ("Clouds", "scattered clouds", Icon::ScatteredClouds),
            ("Rain", "moderate rain", Icon::ModerateRain),
            ("Rain", "heavy intensity rain", Icon::HeavyIntensityRain),
            ("Rain", "very heavy rain", Icon::VeryHeavyRain),
            ("Rain", "freezing rain", Icon::FreezingRain),
            ("Snow", "light snow", Icon::LightSnow),
            ("Snow", "moderate snow", Icon::ModerateSnow),
            ("Snow", "heavy snow", Icon::HeavySnow),
            ("Thunderstorm", "thunderstorm with light rain", Icon::ThunderstormWithLightRain),
            ("Thunderstorm", "thunderstorm with rain", Icon::ThunderstormWithRain),
            ("Thunderstorm", "thunderstorm with heavy rain", Icon::ThunderstormWithHeavyRain),
            ("Thunderstorm", "light thunderstorm", Icon::LightThunderstorm),
        ];
        for (class, detail, expected) in cases {
            assert_eq!(resolve_icon(&obs(class, detail, true)), expected, "{}_{}", class, detail);
        }
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(resolve_icon(&obs("Unknown", "no description", true)), Icon::Unknown);
        assert_eq!(resolve_icon(&obs("Unknown", "no description", false)), Icon::Unknown);
        assert_eq!(resolve_icon(&obs("Tornado", "tornado", true)), Icon::Unknown);
        assert_eq!(resolve_icon(&obs("", "", false)), Icon::Unknown);
    }

    #[test]
    fn test_href() {
        assert_eq!(Icon::ClearDay.href("https://cdn.example/icons/"), "https://cdn.example/icons/1.png");
        assert_eq!(
            Icon::Unknown.href(DEFAULT_ICON_BASE_URL),
            format!("{}/18.png", DEFAULT_ICON_BASE_URL)
        );
    }
}
