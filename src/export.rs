//! GeoJSON export of a matching run, for rendering in any map viewer.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use std::{fs, io, path::Path};
use thiserror::Error;
use tracing::info;

use crate::{
    matcher::MatchResult,
    shared::geo::Coordinate,
    source::{Geometries, RouteGeometry, StopGeometry},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Routes, stops, query points and point-to-stop connectors as one collection.
/// Every feature carries a `kind` property to style by.
pub fn to_feature_collection(
    geometries: &Geometries,
    results: &[MatchResult],
) -> FeatureCollection {
    let routes = geometries.routes.iter().map(route_feature);
    let stops = geometries.stops.iter().map(stop_feature);
    let matches = results.iter().flat_map(match_features);

    FeatureCollection {
        bbox: None,
        features: routes.chain(stops).chain(matches).collect(),
        foreign_members: None,
    }
}

pub fn write<P: AsRef<Path>>(path: P, collection: FeatureCollection) -> Result<(), self::Error> {
    let path = path.as_ref();
    info!(
        "Writing {} map features to {}",
        collection.features.len(),
        path.display()
    );
    let geojson = GeoJson::from(collection);
    fs::write(path, serde_json::to_string_pretty(&geojson)?)?;
    Ok(())
}

fn route_feature(route: &RouteGeometry) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".into(), "route".into());
    properties.insert("route_id".into(), route.route_id.as_ref().into());
    properties.insert("label".into(), route.label.as_ref().into());
    let line = route.shape.iter().map(Coordinate::to_position).collect();
    feature(Value::LineString(line), properties)
}

fn stop_feature(stop: &StopGeometry) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".into(), "stop".into());
    properties.insert("route_id".into(), stop.route_id.as_ref().into());
    properties.insert("label".into(), stop.label.as_ref().into());
    feature(Value::Point(stop.position.to_position()), properties)
}

fn match_features(result: &MatchResult) -> Vec<Feature> {
    let mut properties = JsonObject::new();
    properties.insert("kind".into(), "infraction".into());
    properties.insert("address".into(), result.query.source_address.as_ref().into());
    properties.insert("route_label".into(), result.route_label.as_deref().into());
    properties.insert("stop".into(), result.stop_label.as_deref().into());
    let mut features = vec![feature(
        Value::Point(result.query.position.to_position()),
        properties,
    )];

    if let Some(stop_position) = result.stop_position {
        let mut properties = JsonObject::new();
        properties.insert("kind".into(), "connector".into());
        properties.insert(
            "distance_m".into(),
            result.distance.map(|distance| distance.as_meters()).into(),
        );
        let line = vec![
            result.query.position.to_position(),
            stop_position.to_position(),
        ];
        features.push(feature(Value::LineString(line), properties));
    }
    features
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
