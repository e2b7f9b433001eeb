//! Two stage nearest neighbour matching.
//!
//! A query point is first assigned to the closest route piece overall, then to
//! the closest stop among the stops of that route only. A stop on another
//! route is never chosen, even when it is physically closer.
//!
//! Both stages are linear scans with no spatial index, so the cost per point
//! is O(routes + stops). That is fine for tens to low hundreds of geometries.

use rayon::prelude::*;

mod models;
pub use models::*;

use crate::{
    shared::geo::Distance,
    source::{RouteGeometry, StopGeometry},
};

/// Matches a single point. Pure: the same inputs always give the same result.
///
/// Ties on distance go to the geometry that comes first in the input slice.
pub fn match_point(
    point: &QueryPoint,
    routes: &[RouteGeometry],
    stops: &[StopGeometry],
) -> MatchResult {
    let Some(route) = nearest_route(point, routes) else {
        return MatchResult::unmatched(point);
    };

    let mut result = MatchResult::unmatched(point);
    result.route_id = Some(route.route_id.clone());
    result.route_label = Some(route.label.clone());

    if let Some((stop, degrees)) = nearest_stop(point, &route.route_id, stops) {
        result.stop_label = Some(stop.label.clone());
        result.stop_position = Some(stop.position);
        result.distance = Some(Distance::from_degrees(degrees));
    }
    result
}

/// Matches every point against the same geometries, in parallel.
/// The output keeps the order of `points`.
pub fn match_all(
    points: &[QueryPoint],
    routes: &[RouteGeometry],
    stops: &[StopGeometry],
) -> Vec<MatchResult> {
    points
        .par_iter()
        .map(|point| match_point(point, routes, stops))
        .collect()
}

/// Closest route piece to `point`, first one wins on ties.
/// A piece at infinite distance (an empty shape) never matches.
pub fn nearest_route<'a>(
    point: &QueryPoint,
    routes: &'a [RouteGeometry],
) -> Option<&'a RouteGeometry> {
    let mut best: Option<&RouteGeometry> = None;
    let mut best_distance = f64::INFINITY;
    for route in routes {
        let distance = route.distance_to(&point.position);
        if distance < best_distance {
            best = Some(route);
            best_distance = distance;
        }
    }
    best
}

/// Closest stop belonging to `route_id`, with its planar distance in degrees.
pub fn nearest_stop<'a>(
    point: &QueryPoint,
    route_id: &str,
    stops: &'a [StopGeometry],
) -> Option<(&'a StopGeometry, f64)> {
    let mut best: Option<(&StopGeometry, f64)> = None;
    for stop in stops.iter().filter(|stop| &*stop.route_id == route_id) {
        let distance = stop.distance_to(&point.position);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((stop, distance));
        }
    }
    best
}
