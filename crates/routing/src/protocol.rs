//! Wire types for the routing backend's `POST /api/find-route/` endpoint.
//!
//! The backend is treated as a black box. Decoding is lenient where the
//! deployed service is known to vary:
//! - `distance` / `duration` are accepted for `distance_km` / `duration_min`
//! - `null` checkpoints decode as location-less checkpoints so indices hold
//! - unknown priorities survive as `RoutePriority::Other`

use std::fmt;
use std::str::FromStr;

use foundation::geo::LatLng;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::error::RouteError;

/// Optimization objective for a route.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Shortest,
    #[default]
    Balanced,
    Cleanest,
    Pm25,
    Pm10,
    Co,
    O3,
    So2,
}

impl Priority {
    /// Fixed comparison order.
    pub const ALL: [Priority; 8] = [
        Priority::Shortest,
        Priority::Balanced,
        Priority::Cleanest,
        Priority::Pm25,
        Priority::Pm10,
        Priority::Co,
        Priority::O3,
        Priority::So2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Shortest => "shortest",
            Priority::Balanced => "balanced",
            Priority::Cleanest => "cleanest",
            Priority::Pm25 => "pm25",
            Priority::Pm10 => "pm10",
            Priority::Co => "co",
            Priority::O3 => "o3",
            Priority::So2 => "so2",
        }
    }

    /// Single-pollutant strategies name the pollutant they minimize.
    pub fn pollutant_type(&self) -> Option<&'static str> {
        match self {
            Priority::Pm25 | Priority::Pm10 | Priority::Co | Priority::O3 | Priority::So2 => {
                Some(self.as_str())
            }
            Priority::Shortest | Priority::Balanced | Priority::Cleanest => None,
        }
    }

    /// Position in [`Priority::ALL`].
    pub fn rank(&self) -> usize {
        Priority::ALL
            .iter()
            .position(|p| p == self)
            .unwrap_or(Priority::ALL.len())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Priority::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == lowered)
            .ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

/// Priority echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoutePriority {
    Known(Priority),
    Other(String),
}

impl RoutePriority {
    pub fn known(&self) -> Option<Priority> {
        match self {
            RoutePriority::Known(p) => Some(*p),
            RoutePriority::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoutePriority::Known(p) => p.as_str(),
            RoutePriority::Other(name) => name,
        }
    }
}

impl From<Priority> for RoutePriority {
    fn from(p: Priority) -> Self {
        RoutePriority::Known(p)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub name: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: name.into(),
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Pollutants measured at each checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    Co,
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 5] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];
}

/// One AQI sample along the route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub aqi: f64,
    #[serde(default)]
    pub pm25: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
}

impl Checkpoint {
    pub fn reading(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub source: Location,
    pub destination: Location,
    /// `[lng, lat]` pairs from source to destination.
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
    #[serde(alias = "distance")]
    pub distance_km: f64,
    #[serde(alias = "duration")]
    pub duration_min: f64,
    pub average_aqi: f64,
    pub priority: RoutePriority,
    #[serde(default, deserialize_with = "checkpoints_allow_null")]
    pub aqi_data: Vec<Checkpoint>,
}

impl Route {
    pub fn path(&self) -> impl Iterator<Item = LatLng> + '_ {
        self.coordinates.iter().map(|pair| LatLng::from_lng_lat(*pair))
    }

    /// Checkpoints that can be placed on the map, keyed by their index.
    pub fn located_checkpoints(&self) -> impl Iterator<Item = (usize, &Checkpoint, &Location)> {
        self.aqi_data
            .iter()
            .enumerate()
            .filter_map(|(idx, c)| c.location.as_ref().map(|loc| (idx, c, loc)))
    }
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn checkpoints_allow_null<'de, D>(deserializer: D) -> Result<Vec<Checkpoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<Checkpoint>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Request body for `POST /api/find-route/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindRouteRequest {
    pub source_address: String,
    pub destination_address: String,
    pub priority: Priority,
    pub pollutant_type: Option<&'static str>,
}

impl FindRouteRequest {
    pub fn new(
        source_address: impl Into<String>,
        destination_address: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            source_address: source_address.into(),
            destination_address: destination_address.into(),
            priority,
            pollutant_type: priority.pollutant_type(),
        }
    }
}

/// Response envelope: `{success: true, route}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindRouteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FindRouteResponse {
    pub fn into_result(self) -> Result<Route, RouteError> {
        match (self.success, self.route) {
            (true, Some(route)) => Ok(route),
            (true, None) => Err(RouteError::Malformed(
                "success response without a route".to_string(),
            )),
            (false, _) => Err(RouteError::Backend(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn route_json() -> serde_json::Value {
        json!({
            "source": {"lat": 22.57, "lng": 88.36, "name": "Esplanade"},
            "destination": {"lat": 22.52, "lng": 88.33, "name": "Kalighat"},
            "distance": 7.42,
            "duration": 21.6,
            "average_aqi": 132.4,
            "geometry": {"type": "LineString", "coordinates": []},
            "coordinates": [[88.36, 22.57], [88.35, 22.55], [88.33, 22.52]],
            "priority": "cleanest",
            "aqi_data": [
                {"aqi": 120, "pm25": 55.0, "pm10": 80, "no2": null, "co": 0.8, "o3": 30,
                 "location": {"lat": 22.57, "lng": 88.36, "name": "Esplanade"}},
                null,
                {"aqi": 140, "pm25": 60}
            ]
        })
    }

    #[test]
    fn decodes_legacy_field_names() {
        let route: Route = serde_json::from_value(route_json()).unwrap();
        assert_eq!(route.distance_km, 7.42);
        assert_eq!(route.duration_min, 21.6);
        assert_eq!(route.priority, RoutePriority::Known(Priority::Cleanest));
        assert_eq!(route.coordinates.len(), 3);
    }

    #[test]
    fn null_checkpoints_keep_their_slot() {
        let route: Route = serde_json::from_value(route_json()).unwrap();
        assert_eq!(route.aqi_data.len(), 3);
        assert!(route.aqi_data[1].location.is_none());
        assert_eq!(route.aqi_data[1].aqi, 0.0);

        let located: Vec<usize> = route.located_checkpoints().map(|(i, _, _)| i).collect();
        assert_eq!(located, vec![0]);
    }

    #[test]
    fn absent_readings_decode_as_none() {
        let route: Route = serde_json::from_value(route_json()).unwrap();
        let first = &route.aqi_data[0];
        assert_eq!(first.reading(Pollutant::Pm25), Some(55.0));
        assert_eq!(first.reading(Pollutant::No2), None);
        assert_eq!(route.aqi_data[2].reading(Pollutant::O3), None);
    }

    #[test]
    fn unknown_priority_is_preserved() {
        let mut v = route_json();
        v["priority"] = json!("scenic");
        let route: Route = serde_json::from_value(v).unwrap();
        assert_eq!(route.priority.known(), None);
        assert_eq!(route.priority.as_str(), "scenic");
    }

    #[test]
    fn path_swaps_to_lat_lng() {
        let route: Route = serde_json::from_value(route_json()).unwrap();
        let first = route.path().next().unwrap();
        assert_eq!(first, LatLng::new(22.57, 88.36));
    }

    #[test]
    fn request_carries_pollutant_type_for_pollutant_priorities() {
        let req = FindRouteRequest::new("A", "B", Priority::Pm25);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "source_address": "A",
                "destination_address": "B",
                "priority": "pm25",
                "pollutant_type": "pm25"
            })
        );

        let req = FindRouteRequest::new("A", "B", Priority::Balanced);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["pollutant_type"], serde_json::Value::Null);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("PM25".parse::<Priority>(), Ok(Priority::Pm25));
        assert_eq!(" so2 ".parse::<Priority>(), Ok(Priority::So2));
        let err = "fastest".parse::<Priority>().unwrap_err();
        assert_eq!(err, ParsePriorityError("fastest".to_string()));
        assert_eq!(err.to_string(), "unknown route priority: fastest");
    }

    #[test]
    fn ranks_follow_the_fixed_order() {
        let ranks: Vec<usize> = Priority::ALL.iter().map(Priority::rank).collect();
        assert_eq!(ranks, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn failed_envelope_maps_to_backend_error() {
        let resp: FindRouteResponse =
            serde_json::from_value(json!({"success": false, "error": "Could not geocode"}))
                .unwrap();
        assert_eq!(
            resp.into_result(),
            Err(RouteError::Backend("Could not geocode".to_string()))
        );
    }

    #[test]
    fn success_without_route_is_malformed() {
        let resp = FindRouteResponse {
            success: true,
            route: None,
            error: None,
        };
        assert!(matches!(resp.into_result(), Err(RouteError::Malformed(_))));
    }
}
