//! Loading of route and stop geometries from a directory tree.
//!
//! The root directory holds one subdirectory per route. Every GeoJSON file in
//! a route directory is classified by the geometry of its first feature:
//! lines become [`RouteGeometry`] pieces, points become [`StopGeometry`]s.

use geojson::{Feature, GeoJson, JsonObject, JsonValue, Value};
use std::{
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};
use thiserror::Error;
use tracing::{debug, info, warn};

mod config;
mod models;
pub use config::*;
pub use models::*;

use crate::shared::geo::Coordinate;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("Unsupported coordinate reference system: {0}")]
    UnsupportedCrs(String),
    #[error("File has no features")]
    NoFeatures,
    #[error("No {0} geometries found")]
    EmptyInput(GeometryKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Route,
    Stop,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryKind::Route => f.write_str("route"),
            GeometryKind::Stop => f.write_str("stop"),
        }
    }
}

#[derive(Default)]
pub struct GeometrySource {
    config: Config,
}

impl GeometrySource {
    pub fn new(config: self::Config) -> Self {
        Self { config }
    }

    /// Loads every route directory under `root`.
    ///
    /// Files that cannot be read or parsed are skipped with a warning. Fails
    /// only when `root` itself cannot be listed or when either collection ends
    /// up empty. Directories and files are visited in name order so repeated
    /// runs see the geometries in the same order.
    pub fn load<P: AsRef<Path>>(&self, root: P) -> Result<Geometries, self::Error> {
        let root = root.as_ref();
        debug!("Loading geometries from {}...", root.display());
        let now = Instant::now();

        let mut routes: Vec<RouteGeometry> = Vec::new();
        let mut stops: Vec<StopGeometry> = Vec::new();
        for route_dir in sorted_entries(root)? {
            if !route_dir.is_dir() {
                continue;
            }
            let Some(route_id) = route_dir.file_name().and_then(|name| name.to_str()) else {
                warn!("Skipping route directory with invalid name: {}", route_dir.display());
                continue;
            };
            let files = match sorted_entries(&route_dir) {
                Ok(files) => files,
                Err(err) => {
                    warn!("Failed to list {}: {err}", route_dir.display());
                    continue;
                }
            };

            for path in files.iter().filter(|path| self.is_geometry_file(path)) {
                match self.load_file(path, route_id) {
                    Ok(FileGeometries::Routes(mut pieces)) => routes.append(&mut pieces),
                    Ok(FileGeometries::Stops(mut values)) => stops.append(&mut values),
                    Ok(FileGeometries::Ignored) => {
                        debug!("Ignoring {}: not a line or point layer", path.display())
                    }
                    Err(err) => warn!("Failed to load {}: {err}", path.display()),
                }
            }
        }

        if routes.is_empty() {
            return Err(self::Error::EmptyInput(GeometryKind::Route));
        }
        if stops.is_empty() {
            return Err(self::Error::EmptyInput(GeometryKind::Stop));
        }

        info!(
            "Loaded {} route pieces and {} stops in {:?}",
            routes.len(),
            stops.len(),
            now.elapsed()
        );
        Ok(Geometries {
            routes: routes.into(),
            stops: stops.into(),
        })
    }

    /// Loads a single file, tagging everything in it with `route_id`.
    pub fn load_file<P: AsRef<Path>>(
        &self,
        path: P,
        route_id: &str,
    ) -> Result<FileGeometries, self::Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let features = into_features(content.parse()?)?;
        let file_stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(route_id);

        let first = features.first().ok_or(self::Error::NoFeatures)?;
        match first.geometry.as_ref().map(|geometry| &geometry.value) {
            Some(Value::LineString(_)) | Some(Value::MultiLineString(_)) => {
                let label = first
                    .properties
                    .as_ref()
                    .and_then(|properties| {
                        discover_label(properties, &self.config.route_label_patterns)
                    })
                    .unwrap_or_else(|| file_stem.to_string());
                let pieces = features
                    .iter()
                    .filter_map(|feature| feature.geometry.as_ref())
                    .flat_map(|geometry| line_pieces(&geometry.value))
                    .map(|shape| RouteGeometry::new(route_id, &label, shape))
                    .collect();
                Ok(FileGeometries::Routes(pieces))
            }
            Some(Value::Point(_)) => {
                let stops = features
                    .iter()
                    .filter_map(|feature| {
                        let Some(Value::Point(position)) =
                            feature.geometry.as_ref().map(|geometry| &geometry.value)
                        else {
                            return None;
                        };
                        let position = Coordinate::from_position(position)?;
                        let label = feature
                            .properties
                            .as_ref()
                            .and_then(|properties| {
                                discover_label(properties, &self.config.stop_label_patterns)
                            })
                            .unwrap_or_else(|| file_stem.to_string());
                        Some(StopGeometry::new(route_id, &label, position))
                    })
                    .collect();
                Ok(FileGeometries::Stops(stops))
            }
            _ => Ok(FileGeometries::Ignored),
        }
    }

    fn is_geometry_file(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| self.config.accepts_extension(extension))
    }
}

/// Returns the value of the first property whose name contains any of
/// `patterns`, ignoring case. Properties are scanned in file order. Null and
/// blank string values are passed over.
pub fn discover_label(properties: &JsonObject, patterns: &[String]) -> Option<String> {
    let patterns: Vec<String> = patterns.iter().map(|p| p.to_lowercase()).collect();
    properties.iter().find_map(|(key, value)| {
        let key = key.to_lowercase();
        if !patterns.iter().any(|pattern| key.contains(pattern.as_str())) {
            return None;
        }
        match value {
            JsonValue::Null => None,
            JsonValue::String(value) if value.trim().is_empty() => None,
            JsonValue::String(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

fn into_features(geojson: GeoJson) -> Result<Vec<Feature>, self::Error> {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            if let Some(crs) = collection
                .foreign_members
                .as_ref()
                .and_then(|members| members.get("crs"))
            {
                check_crs(crs)?;
            }
            Ok(collection.features)
        }
        GeoJson::Feature(feature) => Ok(vec![feature]),
        GeoJson::Geometry(geometry) => Ok(vec![Feature::from(geometry)]),
    }
}

/// Coordinates are consumed as WGS84 lon/lat. The legacy `crs` member is
/// accepted only when it names that system.
fn check_crs(crs: &JsonValue) -> Result<(), self::Error> {
    let name = crs
        .get("properties")
        .and_then(|properties| properties.get("name"))
        .and_then(|name| name.as_str())
        .unwrap_or_default();
    let upper = name.to_uppercase();
    if upper.ends_with("CRS84") || upper.ends_with(":4326") {
        Ok(())
    } else {
        Err(self::Error::UnsupportedCrs(name.to_string()))
    }
}

fn line_pieces(value: &Value) -> Vec<Vec<Coordinate>> {
    let lines: Vec<&Vec<Vec<f64>>> = match value {
        Value::LineString(line) => vec![line],
        Value::MultiLineString(lines) => lines.iter().collect(),
        _ => Vec::new(),
    };
    lines
        .into_iter()
        .map(|line| {
            line.iter()
                .filter_map(|position| Coordinate::from_position(position))
                .collect::<Vec<_>>()
        })
        .filter(|shape| shape.len() >= 2)
        .collect()
}
