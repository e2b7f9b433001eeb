use stopmatch::prelude::*;

/// Fixtures are written as `(lon, lat)`.
fn xy(x: f64, y: f64) -> Coordinate {
    Coordinate::new(y, x)
}

fn route(id: &str, shape: &[(f64, f64)]) -> RouteGeometry {
    let shape: Vec<_> = shape.iter().map(|(x, y)| xy(*x, *y)).collect();
    RouteGeometry::new(id, &format!("{id} label"), shape)
}

fn stop(route_id: &str, label: &str, x: f64, y: f64) -> StopGeometry {
    StopGeometry::new(route_id, label, xy(x, y))
}

#[test]
fn matches_route_and_stop() {
    let routes = [route("R1", &[(0.0, 0.0), (0.0, 10.0)])];
    let stops = [stop("R1", "S1", 0.0, 5.0)];
    let point = QueryPoint::new("Calle 1", xy(1.0, 5.0));

    let result = match_point(&point, &routes, &stops);
    assert_eq!(result.route_id.as_deref(), Some("R1"));
    assert_eq!(result.route_label.as_deref(), Some("R1 label"));
    assert_eq!(result.stop_label.as_deref(), Some("S1"));
    assert_eq!(result.stop_position, Some(xy(0.0, 5.0)));
    assert_eq!(result.distance, Some(Distance::from_meters(111_000.0)));
}

#[test]
fn route_without_stops() {
    let routes = [route("R1", &[(0.0, 0.0), (0.0, 10.0)])];
    let point = QueryPoint::new("Calle 1", xy(1.0, 5.0));

    let result = match_point(&point, &routes, &[]);
    assert_eq!(result.route_id.as_deref(), Some("R1"));
    assert_eq!(result.stop_label, None);
    assert_eq!(result.stop_position, None);
    assert_eq!(result.distance, None);
    assert!(!result.has_stop());
}

#[test]
fn closer_shape_wins() {
    let routes = [
        route("R1", &[(0.0, 0.0), (0.0, 10.0)]),
        route("R2", &[(5.0, 0.0), (5.0, 10.0)]),
    ];
    let point = QueryPoint::new("Calle 1", xy(4.9, 5.0));
    let result = match_point(&point, &routes, &[]);
    assert_eq!(result.route_id.as_deref(), Some("R2"));
}

#[test]
fn no_routes_skips_stop_lookup() {
    let stops = [stop("R1", "S1", 1.0, 5.0)];
    let point = QueryPoint::new("Calle 1", xy(1.0, 5.0));
    let result = match_point(&point, &[], &stops);
    assert_eq!(result.route_id, None);
    assert_eq!(result.route_label, None);
    assert_eq!(result.stop_label, None);
    assert_eq!(result.distance, None);
    assert_eq!(result.query, point);
}

#[test]
fn stop_is_restricted_to_matched_route() {
    let routes = [
        route("R1", &[(0.0, 0.0), (0.0, 10.0)]),
        route("R2", &[(3.0, 0.0), (3.0, 10.0)]),
    ];
    // R2's stop sits right next to the point, but the point is closer to R1.
    let stops = [
        stop("R1", "far", 0.0, 9.0),
        stop("R2", "near", 1.1, 5.0),
        stop("R1", "closest on R1", 0.0, 6.0),
    ];
    let point = QueryPoint::new("Calle 1", xy(1.0, 5.0));

    let result = match_point(&point, &routes, &stops);
    assert_eq!(result.route_id.as_deref(), Some("R1"));
    assert_eq!(result.stop_label.as_deref(), Some("closest on R1"));
    let expected = (2.0_f64.sqrt() * METERS_PER_DEGREE * 100.0).round() / 100.0;
    assert_eq!(result.distance.unwrap().as_meters(), expected);
}

#[test]
fn pieces_of_one_route_share_stops() {
    let routes = [
        route("R1", &[(0.0, 0.0), (0.0, 4.0)]),
        route("R2", &[(2.0, 0.0), (2.0, 10.0)]),
        route("R1", &[(10.0, 0.0), (10.0, 10.0)]),
    ];
    let stops = [stop("R2", "R2 stop", 2.0, 0.0), stop("R1", "R1 stop", 10.0, 0.0)];
    let point = QueryPoint::new("Calle 1", xy(9.5, 9.0));

    let result = match_point(&point, &routes, &stops);
    assert_eq!(result.route_id.as_deref(), Some("R1"));
    assert_eq!(result.stop_label.as_deref(), Some("R1 stop"));
}

#[test]
fn polyline_uses_closest_segment() {
    let routes = [
        route("L", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]),
        route("S", &[(6.0, 0.0), (6.0, 4.0)]),
    ];
    // 0.5 from L's second segment, 1.5 from S.
    let point = QueryPoint::new("Calle 1", xy(4.5, 2.0));
    let result = match_point(&point, &routes, &[]);
    assert_eq!(result.route_id.as_deref(), Some("L"));
}

#[test]
fn matching_is_idempotent() {
    let routes = [
        route("R1", &[(0.0, 0.0), (0.0, 10.0)]),
        route("R2", &[(5.0, 0.0), (5.0, 10.0)]),
    ];
    let stops = [stop("R1", "S1", 0.0, 5.0), stop("R2", "S2", 5.0, 2.0)];
    let point = QueryPoint::new("Calle 1", xy(3.3, 2.7));
    assert_eq!(
        match_point(&point, &routes, &stops),
        match_point(&point, &routes, &stops)
    );
}

#[test]
fn match_all_keeps_input_order() {
    let routes = [
        route("R1", &[(0.0, 0.0), (0.0, 10.0)]),
        route("R2", &[(5.0, 0.0), (5.0, 10.0)]),
    ];
    let stops = [stop("R1", "S1", 0.0, 5.0), stop("R2", "S2", 5.0, 5.0)];
    let points: Vec<_> = (0..50)
        .map(|i| {
            let x = if i % 2 == 0 { 0.5 } else { 4.5 };
            QueryPoint::new(&format!("Calle {i}"), xy(x, 5.0))
        })
        .collect();

    let results = match_all(&points, &routes, &stops);
    assert_eq!(results.len(), points.len());
    for (i, (point, result)) in points.iter().zip(&results).enumerate() {
        assert_eq!(&result.query, point);
        let expected = if i % 2 == 0 { "R1" } else { "R2" };
        assert_eq!(result.route_id.as_deref(), Some(expected));
        assert_eq!(result, &match_point(point, &routes, &stops));
    }
}
