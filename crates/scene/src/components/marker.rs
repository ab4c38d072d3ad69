use foundation::geo::LatLng;
use serde::Serialize;

use crate::components::popup::Popup;

const PIN_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.7.1/images/marker-shadow.png";

/// Pin icons for route endpoints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinIcon {
    Source,
    Destination,
}

impl PinIcon {
    pub fn icon_url(&self) -> &'static str {
        match self {
            PinIcon::Source => {
                "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-green.png"
            }
            PinIcon::Destination => {
                "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-red.png"
            }
        }
    }

    pub fn shadow_url(&self) -> &'static str {
        PIN_SHADOW_URL
    }

    /// `(icon_size, icon_anchor)` in pixels.
    pub fn geometry(&self) -> ([u32; 2], [u32; 2]) {
        ([25, 41], [12, 41])
    }
}

/// Endpoint pin. Carries the resolved icon so the host needs no lookup table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinMarker {
    pub position: LatLng,
    pub icon: PinIcon,
    pub icon_url: &'static str,
    pub shadow_url: &'static str,
    pub icon_size: [u32; 2],
    pub icon_anchor: [u32; 2],
    pub popup: Popup,
}

impl PinMarker {
    pub fn new(position: LatLng, icon: PinIcon, popup: Popup) -> Self {
        let (icon_size, icon_anchor) = icon.geometry();
        Self {
            position,
            icon,
            icon_url: icon.icon_url(),
            shadow_url: icon.shadow_url(),
            icon_size,
            icon_anchor,
            popup,
        }
    }
}

/// Filled circle used for AQI checkpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    pub center: LatLng,
    pub radius_px: f32,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
    pub stroke_color: &'static str,
    pub stroke_weight: f32,
    pub stroke_opacity: f32,
    pub popup: Popup,
}
