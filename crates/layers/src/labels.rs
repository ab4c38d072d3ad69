use routing::{Checkpoint, Location, Pollutant, Route};
use scene::components::{Badge, PinIcon, Popup, PopupRow};

use crate::symbology::{aqi_badge, classify, pollutant_scale, priority_color};

pub const NOT_AVAILABLE: &str = "N/A";

pub fn checkpoint_title(index: usize) -> String {
    format!("Checkpoint {}", index + 1)
}

pub fn format_reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn endpoint_popup(icon: PinIcon, location: &Location) -> Popup {
    let title = match icon {
        PinIcon::Source => "Source:",
        PinIcon::Destination => "Destination:",
    };
    Popup::new(title).row(PopupRow::new("Name", location.name.clone()))
}

/// Rounded AQI with its category badge, then every pollutant reading.
pub fn checkpoint_popup(index: usize, checkpoint: &Checkpoint) -> Popup {
    let severity = classify(checkpoint.aqi);
    let category = Badge {
        text: severity.category.to_string(),
        ..aqi_badge(checkpoint.aqi)
    };
    let mut popup = Popup::new(checkpoint_title(index)).row(
        PopupRow::new("AQI", (checkpoint.aqi.round() as i64).to_string()).with_badge(category),
    );
    for pollutant in Pollutant::ALL {
        let scale = pollutant_scale(pollutant);
        popup = popup.row(PopupRow::new(
            scale.label,
            format_reading(checkpoint.reading(pollutant), scale.unit),
        ));
    }
    popup
}

pub fn comparison_popup(route: &Route) -> Popup {
    Popup::new(format!("{} Route", route.priority.as_str().to_uppercase()))
        .with_accent(priority_color(&route.priority))
        .row(PopupRow::new("Distance", format!("{} km", route.distance_km)))
        .row(PopupRow::new(
            "Duration",
            format!("{} min", route.duration_min.round() as i64),
        ))
        .row(PopupRow::new(
            "Avg AQI",
            (route.average_aqi.round() as i64).to_string(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routing::{Priority, RoutePriority};

    #[test]
    fn checkpoint_popup_marks_missing_readings() {
        let cp = Checkpoint {
            location: Some(Location::new(22.5, 88.3, "Park Street")),
            aqi: 162.4,
            pm25: Some(71.0),
            pm10: None,
            no2: Some(18.5),
            co: None,
            o3: Some(40.0),
        };
        let popup = checkpoint_popup(2, &cp);
        assert_eq!(popup.title, "Checkpoint 3");
        assert_eq!(popup.value_of("AQI"), Some("162"));
        assert_eq!(popup.value_of("PM2.5"), Some("71 µg/m³"));
        assert_eq!(popup.value_of("PM10"), Some(NOT_AVAILABLE));
        assert_eq!(popup.value_of("NO₂"), Some("18.5 µg/m³"));
        assert_eq!(popup.value_of("CO"), Some(NOT_AVAILABLE));

        let badge = popup.rows[0].badge.as_ref().unwrap();
        assert_eq!(badge.text, "Unhealthy");
        assert_eq!(badge.foreground, "#fff");
    }

    #[test]
    fn comparison_popup_summarizes_route() {
        let route = Route {
            source: Location::new(0.0, 0.0, "A"),
            destination: Location::new(1.0, 1.0, "B"),
            coordinates: Vec::new(),
            distance_km: 9.35,
            duration_min: 27.6,
            average_aqi: 101.2,
            priority: RoutePriority::Known(Priority::Pm10),
            aqi_data: Vec::new(),
        };
        let popup = comparison_popup(&route);
        assert_eq!(popup.title, "PM10 Route");
        assert_eq!(popup.accent, Some("#ff0000"));
        assert_eq!(popup.value_of("Distance"), Some("9.35 km"));
        assert_eq!(popup.value_of("Duration"), Some("28 min"));
        assert_eq!(popup.value_of("Avg AQI"), Some("101"));
    }
}
