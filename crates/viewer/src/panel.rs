//! Side-panel renderer: route info, pollutant summary, checkpoint list and
//! comparison cards.

use foundation::geo::LatLng;
use layers::labels::checkpoint_title;
use layers::symbology::{aqi_badge, classify, pollutant_badge, pollutant_scale, priority_color};
use routing::{Checkpoint, Pollutant, Route};
use scene::components::Badge;
use serde::Serialize;

use crate::commands::{CommandBuffer, PanelId, RenderCommand};

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
    pub priority: String,
    pub distance: String,
    pub duration: String,
    pub average_aqi: Badge,
    pub status: &'static str,
}

/// Rounded mean of each pollutant over located checkpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PollutantSummary {
    pub pm25: i64,
    pub pm10: i64,
    pub no2: i64,
    pub co: i64,
    pub o3: i64,
}

impl PollutantSummary {
    pub fn get(&self, pollutant: Pollutant) -> i64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    fn set(&mut self, pollutant: Pollutant, value: i64) {
        match pollutant {
            Pollutant::Pm25 => self.pm25 = value,
            Pollutant::Pm10 => self.pm10 = value,
            Pollutant::No2 => self.no2 = value,
            Pollutant::Co => self.co = value,
            Pollutant::O3 => self.o3 = value,
        }
    }

    pub fn readings(&self) -> Vec<PollutantReading> {
        Pollutant::ALL
            .into_iter()
            .map(|pollutant| PollutantReading {
                pollutant,
                label: pollutant_scale(pollutant).label,
                badge: pollutant_badge(pollutant, self.get(pollutant)),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    pub label: &'static str,
    pub badge: Badge,
}

/// One list row; `index` is the checkpoint's position in `aqi_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointRow {
    pub index: usize,
    pub title: String,
    pub aqi: i64,
    pub category: &'static str,
    pub color: &'static str,
    pub location_name: String,
    pub position: LatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCard {
    pub priority: String,
    pub color: &'static str,
    pub distance: String,
    pub duration: String,
    pub average_aqi: Badge,
}

/// Checkpoints without a location are excluded from both the sums and the
/// count. A missing reading on a located checkpoint counts as zero.
pub fn summarize_pollutants(checkpoints: &[Checkpoint]) -> Option<PollutantSummary> {
    let located: Vec<&Checkpoint> = checkpoints
        .iter()
        .filter(|c| c.location.is_some())
        .collect();
    if located.is_empty() {
        return None;
    }

    let count = located.len() as f64;
    let mut summary = PollutantSummary::default();
    for pollutant in Pollutant::ALL {
        let sum: f64 = located
            .iter()
            .map(|c| c.reading(pollutant).unwrap_or(0.0))
            .sum();
        summary.set(pollutant, (sum / count).round() as i64);
    }
    Some(summary)
}

pub fn route_info(route: &Route) -> RouteInfo {
    RouteInfo {
        priority: capitalize(route.priority.as_str()),
        distance: format!("{} km", route.distance_km),
        duration: format!("{} minutes", route.duration_min.round() as i64),
        average_aqi: aqi_badge(route.average_aqi),
        status: classify(route.average_aqi).category,
    }
}

pub fn checkpoint_rows(route: &Route) -> Vec<CheckpointRow> {
    route
        .located_checkpoints()
        .map(|(index, checkpoint, location)| {
            let severity = classify(checkpoint.aqi);
            let location_name = if location.name.trim().is_empty() {
                UNKNOWN_LOCATION.to_string()
            } else {
                location.name.clone()
            };
            CheckpointRow {
                index,
                title: checkpoint_title(index),
                aqi: checkpoint.aqi.round() as i64,
                category: severity.category,
                color: severity.color,
                location_name,
                position: location.position(),
            }
        })
        .collect()
}

pub fn comparison_cards(routes: &[Route]) -> Vec<ComparisonCard> {
    routes
        .iter()
        .map(|route| ComparisonCard {
            priority: route.priority.as_str().to_uppercase(),
            color: priority_color(&route.priority),
            distance: format!("{} km", route.distance_km),
            duration: format!("{} min", route.duration_min.round() as i64),
            average_aqi: aqi_badge(route.average_aqi),
        })
        .collect()
}

/// Draws the single-route panels. Panels with nothing to show stay hidden.
pub fn show_single(route: &Route, out: &mut CommandBuffer) {
    out.emit(RenderCommand::ShowRouteInfo {
        info: route_info(route),
    });

    if let Some(summary) = summarize_pollutants(&route.aqi_data) {
        out.emit(RenderCommand::ShowPollutantSummary {
            readings: summary.readings(),
            summary,
        });
    }

    let rows = checkpoint_rows(route);
    if !rows.is_empty() {
        out.emit(RenderCommand::ShowCheckpointList { rows });
    }
}

pub fn show_comparison(routes: &[Route], out: &mut CommandBuffer) {
    out.emit(RenderCommand::ShowComparison {
        cards: comparison_cards(routes),
    });
}

pub fn hide_all(out: &mut CommandBuffer) {
    for panel in PanelId::ALL {
        out.emit(RenderCommand::HidePanel { panel });
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routing::{Location, Priority, RoutePriority};

    fn located(pm25: Option<f64>, pm10: Option<f64>) -> Checkpoint {
        Checkpoint {
            location: Some(Location::new(22.5, 88.3, "Gariahat")),
            aqi: 80.0,
            pm25,
            pm10,
            ..Checkpoint::default()
        }
    }

    fn route(aqi_data: Vec<Checkpoint>) -> Route {
        Route {
            source: Location::new(22.57, 88.36, "A"),
            destination: Location::new(22.52, 88.33, "B"),
            coordinates: vec![[88.36, 22.57], [88.33, 22.52]],
            distance_km: 7.42,
            duration_min: 21.6,
            average_aqi: 132.4,
            priority: RoutePriority::Known(Priority::Pm25),
            aqi_data,
        }
    }

    #[test]
    fn summary_is_the_rounded_mean() {
        let summary = summarize_pollutants(&[
            located(Some(10.0), Some(20.0)),
            located(Some(20.0), Some(40.0)),
        ])
        .unwrap();
        assert_eq!(summary.pm25, 15);
        assert_eq!(summary.pm10, 30);
        assert_eq!(summary.no2, 0);
    }

    #[test]
    fn missing_readings_count_as_zero_but_unlocated_checkpoints_do_not_count() {
        let unlocated = Checkpoint {
            pm25: Some(1_000.0),
            ..Checkpoint::default()
        };
        let summary = summarize_pollutants(&[
            located(Some(9.0), None),
            located(None, Some(5.0)),
            unlocated,
        ])
        .unwrap();
        // (9 + 0) / 2 rounds to 5; (0 + 5) / 2 rounds to 3.
        assert_eq!(summary.pm25, 5);
        assert_eq!(summary.pm10, 3);
    }

    #[test]
    fn no_located_checkpoints_means_no_summary() {
        assert_eq!(summarize_pollutants(&[]), None);
        assert_eq!(summarize_pollutants(&[Checkpoint::default()]), None);
    }

    #[test]
    fn rows_keep_checkpoint_indices() {
        let r = route(vec![
            located(Some(1.0), None),
            Checkpoint::default(),
            Checkpoint {
                location: Some(Location::new(22.4, 88.2, "")),
                aqi: 301.0,
                ..Checkpoint::default()
            },
        ]);
        let rows = checkpoint_rows(&r);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].title, "Checkpoint 3");
        assert_eq!(rows[1].category, "Hazardous");
        assert_eq!(rows[1].location_name, UNKNOWN_LOCATION);
    }

    #[test]
    fn route_info_formats_the_summary_line() {
        let info = route_info(&route(Vec::new()));
        assert_eq!(info.priority, "Pm25");
        assert_eq!(info.distance, "7.42 km");
        assert_eq!(info.duration, "22 minutes");
        assert_eq!(info.average_aqi.text, "132");
        assert_eq!(info.average_aqi.css_class, Some("status-unhealthy-sensitive"));
        assert_eq!(info.status, "Unhealthy for Sensitive Groups");
    }

    #[test]
    fn empty_checkpoints_show_only_route_info() {
        let mut out = CommandBuffer::new();
        show_single(&route(Vec::new()), &mut out);
        assert_eq!(out.len(), 1);
        assert!(matches!(
            out.commands()[0],
            RenderCommand::ShowRouteInfo { .. }
        ));
    }

    #[test]
    fn comparison_cards_use_priority_palette() {
        let cards = comparison_cards(&[route(Vec::new())]);
        assert_eq!(cards[0].priority, "PM25");
        assert_eq!(cards[0].color, "#ff7e00");
        assert_eq!(cards[0].duration, "22 min");
        assert_eq!(cards[0].average_aqi.background, "#ff7e00");
    }
}
