//! WGS84 coordinates and the distance/centroid helpers shared by the
//! clustering engine, ranking, and providers.

use geo::{Distance, Geodesic};
use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lng")]
    pub lon: f64,
}

impl Point {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Geodesic distance to `other`, see [`distance_km`].
    pub fn distance_km(&self, other: &Point) -> f64 {
        distance_km(*self, *other)
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(p: Point) -> Self {
        // geo points are (x, y) = (lon, lat)
        geo::Point::new(p.lon, p.lat)
    }
}

/// Geodesic (ellipsoidal) distance in kilometres, rounded to 3 decimals.
///
/// Threshold comparisons are made against the rounded value, so a pair
/// 1.0004 km apart counts as within 1 km.
pub fn distance_km(a: Point, b: Point) -> f64 {
    let meters = Geodesic::distance(geo::Point::from(a), geo::Point::from(b));
    round_km(meters / 1000.0)
}

fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

/// Arithmetic mean of latitudes and of longitudes; `None` when empty.
pub fn centroid_of(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Some(Point::new(lat_sum / n, lon_sum / n))
}
