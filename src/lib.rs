//! Matches geocoded points to the nearest transit route, then to the nearest
//! stop along that route.
//!
//! ```no_run
//! use stopmatch::prelude::*;
//!
//! let geometries = GeometrySource::default().load("routes")?;
//! let point = QueryPoint::new("Calle 26 # 68", Coordinate::new(4.6571, -74.0946));
//! let result = match_point(&point, &geometries.routes, &geometries.stops);
//!
//! let mut recorder = MatchRecorder::new(MemoryStore::new());
//! recorder.record(&result);
//! # Ok::<(), stopmatch::source::Error>(())
//! ```

pub mod export;
pub mod matcher;
pub mod recorder;
pub mod shared;
pub mod source;

pub mod prelude {
    pub use crate::matcher::{MatchResult, QueryPoint, match_all, match_point};
    pub use crate::recorder::{CsvStore, MatchRecorder, MatchRow, MatchStore, MemoryStore};
    pub use crate::shared::geo::{Coordinate, Distance, METERS_PER_DEGREE};
    pub use crate::source::{Geometries, GeometrySource, RouteGeometry, StopGeometry};
}
