use std::f64::consts::PI;

use geo_types::{Coord, LineString};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Half the Web-Mercator extent in meters (earth radius 6378137m x PI)
pub const MERCATOR_HALF_EXTENT_M: f64 = 20_037_508.342789244;
const MERCATOR_MAX_LAT: f64 = 85.051129;

/// Axis-aligned box around a set of coordinates, `x` = longitude, `y` = latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min: Coord,
    pub max: Coord,
}

impl GeoBounds {
    pub fn new(coord: Coord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    pub fn from_coords<I: IntoIterator<Item = Coord>>(coords: I) -> Option<Self> {
        let mut iter = coords.into_iter();
        let mut bounds = GeoBounds::new(iter.next()?);

        for coord in iter {
            bounds.extend(coord);
        }

        Some(bounds)
    }

    pub fn extend(&mut self, coord: Coord) {
        self.min.x = self.min.x.min(coord.x);
        self.min.y = self.min.y.min(coord.y);

        self.max.x = self.max.x.max(coord.x);
        self.max.y = self.max.y.max(coord.y);
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= self.min.x && coord.x <= self.max.x && coord.y >= self.min.y && coord.y <= self.max.y
    }

    pub fn center(&self) -> Coord {
        Coord {
            x: (self.min.x + self.max.x) / 2.,
            y: (self.min.y + self.max.y) / 2.,
        }
    }

    /// Extent of the box in projected meters, (width, height).
    pub fn mercator_span(&self) -> (f64, f64) {
        let min = GeoUtils::to_mercator(self.min);
        let max = GeoUtils::to_mercator(self.max);

        ((max.x - min.x).abs(), (max.y - min.y).abs())
    }
}

pub struct GeoUtils;

impl GeoUtils {
    /// Projects WGS84 degrees to Web-Mercator meters (EPSG:3857).
    pub fn to_mercator(coord: Coord) -> Coord {
        let x = coord.x * MERCATOR_HALF_EXTENT_M / 180.0;

        // tan() blows up at the poles
        let lat = coord.y.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);
        let y = ((90.0 + lat) * PI / 360.0).tan().ln() * MERCATOR_HALF_EXTENT_M / PI;

        Coord { x, y }
    }

    pub fn deg2rad(deg: f64) -> f64 {
        deg * PI / 180.0
    }

    /// Haversine distance between two points, in meters.
    pub fn distance_m(p1: Coord, p2: Coord) -> f64 {
        let lat1 = GeoUtils::deg2rad(p1.y);
        let lat2 = GeoUtils::deg2rad(p2.y);
        let dlat = lat2 - lat1;
        let dlon = GeoUtils::deg2rad(p2.x - p1.x);

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }

    pub fn path_length_m(path: &LineString<f64>) -> f64 {
        path.0
            .windows(2)
            .map(|pair| GeoUtils::distance_m(pair[0], pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_every_coord() {
        let coords = vec![
            Coord { x: 115.18, y: -8.40 },
            Coord { x: 115.21, y: -8.45 },
            Coord { x: 115.19, y: -8.38 },
        ];

        let bounds = GeoBounds::from_coords(coords.iter().copied()).unwrap();

        assert_eq!(bounds.min, Coord { x: 115.18, y: -8.45 });
        assert_eq!(bounds.max, Coord { x: 115.21, y: -8.38 });
        for coord in coords {
            assert!(bounds.contains(coord));
        }
    }

    #[test]
    fn bounds_of_nothing() {
        assert_eq!(GeoBounds::from_coords(std::iter::empty()), None);
    }

    #[test]
    fn bounds_center_is_midpoint() {
        let mut bounds = GeoBounds::new(Coord { x: 115.0, y: -8.0 });
        bounds.extend(Coord { x: 115.2, y: -8.4 });

        let center = bounds.center();
        assert!((center.x - 115.1).abs() < 1e-9);
        assert!((center.y - -8.2).abs() < 1e-9);
    }

    #[test]
    fn mercator_origin() {
        let projected = GeoUtils::to_mercator(Coord { x: 0.0, y: 0.0 });
        assert!(projected.x.abs() < 1e-6);
        assert!(projected.y.abs() < 1e-6);
    }

    #[test]
    fn mercator_antimeridian_hits_extent() {
        let projected = GeoUtils::to_mercator(Coord { x: 180.0, y: 0.0 });
        assert!((projected.x - MERCATOR_HALF_EXTENT_M).abs() < 1e-3);
    }

    #[test]
    fn distance_denpasar_to_ubud() {
        // Roughly 23km apart
        let denpasar = Coord { x: 115.216667, y: -8.65 };
        let ubud = Coord { x: 115.263056, y: -8.506944 };

        let d = GeoUtils::distance_m(denpasar, ubud);
        assert!(d > 15_000.0 && d < 25_000.0, "d = {}", d);
    }

    #[test]
    fn path_length_sums_legs() {
        let path = LineString::new(vec![
            Coord { x: 115.0, y: -8.0 },
            Coord { x: 115.01, y: -8.0 },
            Coord { x: 115.02, y: -8.0 },
        ]);

        let total = GeoUtils::path_length_m(&path);
        let direct = GeoUtils::distance_m(path.0[0], path.0[2]);
        assert!((total - direct).abs() < 1.0);
    }
}
