//! AQI severity bands and the colors derived from them.
//!
//! `classify` is the only place severity is computed; markers, badges, list
//! rows and route lines all go through it.

use routing::{Pollutant, Priority, RoutePriority};
use scene::components::Badge;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Severity {
    pub level: SeverityLevel,
    pub color: &'static str,
    pub category: &'static str,
    pub css_class: &'static str,
}

impl Severity {
    const fn new(
        level: SeverityLevel,
        color: &'static str,
        category: &'static str,
        css_class: &'static str,
    ) -> Self {
        Self {
            level,
            color,
            category,
            css_class,
        }
    }
}

const HAZARDOUS: Severity = Severity::new(
    SeverityLevel::Hazardous,
    "#7e0023",
    "Hazardous",
    "status-hazardous",
);

/// Inclusive upper bounds, ascending.
const BANDS: [(f64, Severity); 5] = [
    (
        50.0,
        Severity::new(SeverityLevel::Good, "#00e400", "Good", "status-good"),
    ),
    (
        100.0,
        Severity::new(
            SeverityLevel::Moderate,
            "#ffff00",
            "Moderate",
            "status-moderate",
        ),
    ),
    (
        150.0,
        Severity::new(
            SeverityLevel::UnhealthyForSensitiveGroups,
            "#ff7e00",
            "Unhealthy for Sensitive Groups",
            "status-unhealthy-sensitive",
        ),
    ),
    (
        200.0,
        Severity::new(
            SeverityLevel::Unhealthy,
            "#ff0000",
            "Unhealthy",
            "status-unhealthy",
        ),
    ),
    (
        300.0,
        Severity::new(
            SeverityLevel::VeryUnhealthy,
            "#8f3f97",
            "Very Unhealthy",
            "status-very-unhealthy",
        ),
    ),
];

/// Total over all `f64`; anything above 300 (and NaN) is Hazardous.
pub fn classify(aqi: f64) -> Severity {
    BANDS
        .iter()
        .find(|(upper, _)| aqi <= *upper)
        .map(|(_, severity)| *severity)
        .unwrap_or(HAZARDOUS)
}

pub fn badge_text_color(aqi: f64) -> &'static str {
    if aqi > 150.0 { "#fff" } else { "#000" }
}

pub fn aqi_badge(aqi: f64) -> Badge {
    let severity = classify(aqi);
    Badge {
        text: (aqi.round() as i64).to_string(),
        background: severity.color,
        foreground: badge_text_color(aqi),
        css_class: Some(severity.css_class),
    }
}

pub const FALLBACK_ROUTE_COLOR: &str = "#999999";

pub fn priority_color(priority: &RoutePriority) -> &'static str {
    match priority.known() {
        Some(Priority::Shortest) => "#00e400",
        Some(Priority::Balanced) => "#ffff00",
        Some(Priority::Cleanest) => "#00b4d8",
        Some(Priority::Pm25) => "#ff7e00",
        Some(Priority::Pm10) => "#ff0000",
        Some(Priority::Co) => "#8f3f97",
        Some(Priority::O3) => "#06d6a0",
        Some(Priority::So2) => "#7e0023",
        None => FALLBACK_ROUTE_COLOR,
    }
}

/// Display and badge parameters for a pollutant concentration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PollutantScale {
    pub label: &'static str,
    pub unit: &'static str,
    /// Multiplier that maps a concentration onto the AQI bands.
    pub aqi_factor: f64,
    /// Above this concentration the badge text switches to white.
    pub contrast_above: f64,
}

pub fn pollutant_scale(pollutant: Pollutant) -> PollutantScale {
    match pollutant {
        Pollutant::Pm25 => PollutantScale {
            label: "PM2.5",
            unit: "µg/m³",
            aqi_factor: 2.0,
            contrast_above: 75.0,
        },
        Pollutant::Pm10 => PollutantScale {
            label: "PM10",
            unit: "µg/m³",
            aqi_factor: 1.0,
            contrast_above: 100.0,
        },
        Pollutant::No2 => PollutantScale {
            label: "NO₂",
            unit: "µg/m³",
            aqi_factor: 2.0,
            contrast_above: 60.0,
        },
        Pollutant::Co => PollutantScale {
            label: "CO",
            unit: "mg/m³",
            aqi_factor: 10.0,
            contrast_above: 15.0,
        },
        Pollutant::O3 => PollutantScale {
            label: "O₃",
            unit: "µg/m³",
            aqi_factor: 1.0,
            contrast_above: 75.0,
        },
    }
}

pub fn pollutant_badge(pollutant: Pollutant, value: i64) -> Badge {
    let scale = pollutant_scale(pollutant);
    let v = value as f64;
    Badge {
        text: format!("{value} {}", scale.unit),
        background: classify(v * scale.aqi_factor).color,
        foreground: if v > scale.contrast_above { "#fff" } else { "#000" },
        css_class: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn band_edges_are_inclusive_upper_bounds() {
        assert_eq!(classify(50.0).level, SeverityLevel::Good);
        assert_eq!(classify(51.0).level, SeverityLevel::Moderate);
        assert_eq!(classify(100.0).level, SeverityLevel::Moderate);
        assert_eq!(classify(150.0).level, SeverityLevel::UnhealthyForSensitiveGroups);
        assert_eq!(classify(200.0).level, SeverityLevel::Unhealthy);
        assert_eq!(classify(300.0).level, SeverityLevel::VeryUnhealthy);
        assert_eq!(classify(301.0).level, SeverityLevel::Hazardous);
    }

    #[test]
    fn out_of_range_values_still_classify() {
        assert_eq!(classify(-20.0).level, SeverityLevel::Good);
        assert_eq!(classify(50.5).level, SeverityLevel::Moderate);
        assert_eq!(classify(9_999.0).level, SeverityLevel::Hazardous);
        assert_eq!(classify(f64::INFINITY).level, SeverityLevel::Hazardous);
        assert_eq!(classify(f64::NAN).level, SeverityLevel::Hazardous);
    }

    #[test]
    fn bands_are_monotonic_and_distinct() {
        let samples: Vec<Severity> = (0..=400).map(|v| classify(v as f64)).collect();
        for pair in samples.windows(2) {
            assert!(pair[0].level <= pair[1].level);
        }
        let mut classes: Vec<&str> = BANDS.iter().map(|(_, s)| s.css_class).collect();
        classes.push(HAZARDOUS.css_class);
        classes.dedup();
        assert_eq!(classes.len(), 6);
    }

    #[test]
    fn classification_is_deterministic() {
        for v in [0.0, 49.9, 123.4, 250.0, 777.0] {
            assert_eq!(classify(v), classify(v));
        }
    }

    #[test]
    fn aqi_badge_rounds_and_contrasts() {
        let badge = aqi_badge(151.6);
        assert_eq!(badge.text, "152");
        assert_eq!(badge.background, "#ff0000");
        assert_eq!(badge.foreground, "#fff");
        assert_eq!(badge.css_class, Some("status-unhealthy"));

        assert_eq!(aqi_badge(40.0).foreground, "#000");
    }

    #[test]
    fn unknown_priority_falls_back_to_gray() {
        assert_eq!(
            priority_color(&RoutePriority::Other("scenic".to_string())),
            FALLBACK_ROUTE_COLOR
        );
        assert_eq!(priority_color(&Priority::Cleanest.into()), "#00b4d8");
    }

    #[test]
    fn pollutant_badges_scale_before_classifying() {
        // 30 µg/m³ PM2.5 reads as AQI 60.
        let pm25 = pollutant_badge(Pollutant::Pm25, 30);
        assert_eq!(pm25.background, "#ffff00");
        assert_eq!(pm25.text, "30 µg/m³");

        let co = pollutant_badge(Pollutant::Co, 16);
        assert_eq!(co.background, "#ff0000");
        assert_eq!(co.foreground, "#fff");
        assert!(co.text.ends_with("mg/m³"));
    }
}
