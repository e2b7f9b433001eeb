use geojson::{GeoJson, Value};
use stopmatch::{export, prelude::*};

fn geometries() -> Geometries {
    Geometries {
        routes: vec![RouteGeometry::new(
            "R1",
            "Calle 26",
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)],
        )]
        .into(),
        stops: vec![StopGeometry::new("R1", "S1", Coordinate::new(5.0, 0.0))].into(),
    }
}

fn kinds(collection: &geojson::FeatureCollection) -> Vec<String> {
    collection
        .features
        .iter()
        .map(|feature| {
            feature
                .property("kind")
                .and_then(|kind| kind.as_str())
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

#[test]
fn features_by_kind() {
    let geometries = geometries();
    let matched = QueryPoint::new("Calle 1", Coordinate::new(5.0, 1.0));
    let results = vec![match_point(&matched, &geometries.routes, &geometries.stops)];

    let collection = export::to_feature_collection(&geometries, &results);
    assert_eq!(kinds(&collection), ["route", "stop", "infraction", "connector"]);

    let connector = &collection.features[3];
    assert_eq!(
        connector.geometry.as_ref().map(|geometry| &geometry.value),
        Some(&Value::LineString(vec![vec![1.0, 5.0], vec![0.0, 5.0]]))
    );
    assert_eq!(
        connector.property("distance_m").and_then(|d| d.as_f64()),
        Some(111_000.0)
    );
}

#[test]
fn no_connector_without_stop() {
    let geometries = geometries();
    let point = QueryPoint::new("Calle 1", Coordinate::new(5.0, 1.0));
    let results = vec![match_point(&point, &geometries.routes, &[])];
    let collection = export::to_feature_collection(&geometries, &results);
    assert_eq!(kinds(&collection), ["route", "stop", "infraction"]);
}

#[test]
fn written_file_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.geojson");
    let geometries = geometries();
    export::write(&path, export::to_feature_collection(&geometries, &[])).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let GeoJson::FeatureCollection(collection) = content.parse::<GeoJson>().unwrap() else {
        panic!("expected a feature collection");
    };
    assert_eq!(collection.features.len(), 2);
}
