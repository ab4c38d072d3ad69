use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;
use serde::Serialize;

use crate::components::popup::Popup;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub path: Vec<LatLng>,
    pub color: &'static str,
    pub weight: f32,
    pub opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<Popup>,
}

impl Polyline {
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.path.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::Polyline;
    use foundation::geo::LatLng;

    #[test]
    fn bounds_follow_the_path() {
        let line = Polyline {
            path: vec![LatLng::new(1.0, 2.0), LatLng::new(3.0, 0.0)],
            color: "#00e400",
            weight: 6.0,
            opacity: 0.8,
            popup: None,
        };
        let b = line.bounds().unwrap();
        assert_eq!(b.south_west, LatLng::new(1.0, 0.0));
        assert_eq!(b.north_east, LatLng::new(3.0, 2.0));
    }
}
