use std::{cmp, fmt::Display};

use serde::{Deserialize, Serialize};

/// Fixed conversion from planar degrees to meters.
/// Only a rough local approximation, not a geodesic distance.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.0)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    /// Converts a planar degree-space distance into meters, rounded to centimeters.
    pub fn from_degrees(degrees: f64) -> Self {
        Self((degrees * METERS_PER_DEGREE * 100.0).round() / 100.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate from a GeoJSON style `[lon, lat, ..]` position.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [longitude, latitude, ..] if longitude.is_finite() && latitude.is_finite() => {
                Some(Self::new(*latitude, *longitude))
            }
            _ => None,
        }
    }

    /// GeoJSON style `[lon, lat]` position.
    pub fn to_position(&self) -> Vec<f64> {
        vec![self.longitude, self.latitude]
    }

    /// Euclidean distance in degree space.
    pub fn planar_distance(&self, coord: &Self) -> f64 {
        planar_distance(self, coord)
    }
}

/// Euclidean distance between two coordinates treating (lon, lat) as plane coordinates.
pub fn planar_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    f64::hypot(a.longitude - b.longitude, a.latitude - b.latitude)
}

/// Distance from `point` to the closed segment `start`..`end`.
/// A zero length segment degrades to a point distance.
pub fn segment_distance(point: &Coordinate, start: &Coordinate, end: &Coordinate) -> f64 {
    let dx = end.longitude - start.longitude;
    let dy = end.latitude - start.latitude;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return planar_distance(point, start);
    }
    let t = ((point.longitude - start.longitude) * dx + (point.latitude - start.latitude) * dy)
        / length_sq;
    let t = t.clamp(0.0, 1.0);
    let projected = Coordinate::new(start.latitude + t * dy, start.longitude + t * dx);
    planar_distance(point, &projected)
}

/// Minimum distance from `point` to any segment of `shape`.
/// Returns `f64::INFINITY` for an empty shape.
pub fn polyline_distance(point: &Coordinate, shape: &[Coordinate]) -> f64 {
    match shape {
        [] => f64::INFINITY,
        [only] => planar_distance(point, only),
        _ => shape
            .windows(2)
            .map(|pair| segment_distance(point, &pair[0], &pair[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

#[test]
fn segment_distance_perpendicular_test() {
    let start = Coordinate::new(0.0, 0.0);
    let end = Coordinate::new(10.0, 0.0);
    let point = Coordinate::new(5.0, 1.0);
    assert_eq!(segment_distance(&point, &start, &end), 1.0);
}

#[test]
fn segment_distance_clamps_to_endpoint_test() {
    let start = Coordinate::new(0.0, 0.0);
    let end = Coordinate::new(10.0, 0.0);
    let point = Coordinate::new(14.0, 3.0);
    assert_eq!(segment_distance(&point, &start, &end), 5.0);
}

#[test]
fn distance_from_degrees_test() {
    assert_eq!(Distance::from_degrees(1.0).as_meters(), 111_000.0);
    assert_eq!(Distance::from_degrees(0.000_012_345).as_meters(), 1.37);
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_meters(500.0);
    assert!(dist_a > dist_b)
}
