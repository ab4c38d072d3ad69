use serde::Serialize;

use crate::geo::LatLng;

/// Lat/lng bounding box used for viewport fitting.
///
/// Longitudes are not wrapped; routes never cross the antimeridian.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GeoBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl GeoBounds {
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south_west: p,
            north_east: p,
        }
    }

    /// Returns `None` for an empty iterator. Non-finite points are skipped.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut out: Option<Self> = None;
        for p in points.into_iter().filter(LatLng::is_finite) {
            match out.as_mut() {
                Some(b) => b.extend(p),
                None => out = Some(Self::from_point(p)),
            }
        }
        out
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.extend(other.south_west);
        out.extend(other.north_east);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::GeoBounds;
    use crate::geo::LatLng;

    #[test]
    fn empty_input_has_no_bounds() {
        assert!(GeoBounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn from_points_covers_every_point() {
        let pts = vec![
            LatLng::new(22.5, 88.3),
            LatLng::new(22.7, 88.1),
            LatLng::new(22.6, 88.5),
        ];
        let b = GeoBounds::from_points(pts).unwrap();
        assert_eq!(b.south_west, LatLng::new(22.5, 88.1));
        assert_eq!(b.north_east, LatLng::new(22.7, 88.5));
    }

    #[test]
    fn union_is_the_enclosing_box() {
        let a = GeoBounds::from_points([LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]).unwrap();
        let b = GeoBounds::from_points([LatLng::new(-1.0, 2.0), LatLng::new(0.5, 3.0)]).unwrap();
        let u = a.union(&b);
        assert_eq!(u.south_west, LatLng::new(-1.0, 0.0));
        assert_eq!(u.north_east, LatLng::new(1.0, 3.0));
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let b = GeoBounds::from_points([LatLng::new(f64::NAN, 0.0), LatLng::new(1.0, 1.0)])
            .unwrap();
        assert_eq!(b.south_west, LatLng::new(1.0, 1.0));
    }
}
