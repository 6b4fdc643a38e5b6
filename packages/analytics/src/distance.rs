//! Great-circle distance between coordinate pairs.

use geo::{Distance, Haversine, Point};

/// Haversine distance between two `(latitude, longitude)` pairs, in
/// kilometers.
///
/// Coordinates are angular degrees, so flat Euclidean distance is wrong
/// at the kilometer scales the clustering epsilon operates on.
#[must_use]
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let from = Point::new(a.1, a.0);
    let to = Point::new(b.1, b.0);
    Haversine.distance(from, to) / 1000.0
}
