use std::sync::Arc;

use crate::shared::geo::{Coordinate, Distance};

/// A geocoded address.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPoint {
    pub source_address: Arc<str>,
    pub position: Coordinate,
}

impl QueryPoint {
    pub fn new(source_address: &str, position: Coordinate) -> Self {
        Self {
            source_address: source_address.into(),
            position,
        }
    }
}

/// Outcome of matching one [`QueryPoint`].
///
/// Route fields are `None` only when there were no routes to match against,
/// stop fields are `None` when the matched route has no stops.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub query: QueryPoint,
    pub route_id: Option<Arc<str>>,
    pub route_label: Option<Arc<str>>,
    pub stop_label: Option<Arc<str>>,
    pub stop_position: Option<Coordinate>,
    /// Planar distance from the query to the matched stop, in meters.
    pub distance: Option<Distance>,
}

impl MatchResult {
    pub(crate) fn unmatched(query: &QueryPoint) -> Self {
        Self {
            query: query.clone(),
            route_id: None,
            route_label: None,
            stop_label: None,
            stop_position: None,
            distance: None,
        }
    }

    pub fn has_stop(&self) -> bool {
        self.stop_position.is_some()
    }
}
