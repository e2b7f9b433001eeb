use std::sync::Arc;

use crate::shared::geo::{Coordinate, planar_distance, polyline_distance};

/// One polyline piece of a route. A route may be made of many pieces
/// sharing the same `route_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// Name of the route directory the piece was loaded from.
    pub route_id: Arc<str>,
    /// Display label, discovered from the file's properties.
    pub label: Arc<str>,
    pub shape: Box<[Coordinate]>,
}

impl RouteGeometry {
    pub fn new(route_id: &str, label: &str, shape: impl Into<Box<[Coordinate]>>) -> Self {
        Self {
            route_id: route_id.into(),
            label: label.into(),
            shape: shape.into(),
        }
    }

    /// Planar distance from `point` to the closest segment of the shape.
    pub fn distance_to(&self, point: &Coordinate) -> f64 {
        polyline_distance(point, &self.shape)
    }
}

/// A stop, linked to its route by `route_id` equality only.
#[derive(Debug, Clone, PartialEq)]
pub struct StopGeometry {
    pub route_id: Arc<str>,
    pub label: Arc<str>,
    pub position: Coordinate,
}

impl StopGeometry {
    pub fn new(route_id: &str, label: &str, position: Coordinate) -> Self {
        Self {
            route_id: route_id.into(),
            label: label.into(),
            position,
        }
    }

    pub fn distance_to(&self, point: &Coordinate) -> f64 {
        planar_distance(point, &self.position)
    }
}

/// Everything a matching run needs, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Geometries {
    pub routes: Box<[RouteGeometry]>,
    pub stops: Box<[StopGeometry]>,
}

/// What a single geometry file contributed.
#[derive(Debug, Clone, PartialEq)]
pub enum FileGeometries {
    Routes(Vec<RouteGeometry>),
    Stops(Vec<StopGeometry>),
    /// The first feature was neither a line nor a point.
    Ignored,
}
