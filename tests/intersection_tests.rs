use geogrid::{
    BoundaryPolicy, BoundingRegion, Coordinate, GeoGrid, GridBuilder, GridConfig, QueryPolygon,
    StorageMode,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scenario_region() -> BoundingRegion {
    BoundingRegion::new(40.0, 45.0, -115.0, -105.0)
}

fn scenario_triangle() -> QueryPolygon {
    QueryPolygon::new(vec![
        Coordinate::new(44.919, -112.242),
        Coordinate::new(43.111, -105.414),
        Coordinate::new(41.271, -111.421),
    ])
}

fn grid_with(region: BoundingRegion, resolution: u32, boundary: BoundaryPolicy) -> GeoGrid {
    GridBuilder::new()
        .region(region)
        .resolution(resolution)
        .boundary(boundary)
        .build()
        .expect("Failed to build grid")
}

/// Test 1: The reference scenario matches the inserted cell under both policies
#[test]
fn test_scenario_triangle() {
    init_logger();

    for policy in [BoundaryPolicy::Inclusive, BoundaryPolicy::Exclusive] {
        let mut grid = grid_with(scenario_region(), 10, policy);
        let code = grid
            .insert(Coordinate::new(44.919, -112.242))
            .expect("Failed to insert");

        let result = grid.intersect(&scenario_triangle());
        assert!(result.contains(&code), "{:?} missed the cell", policy);
        assert_eq!(result, vec![code]);
        assert!(grid.intersects(&scenario_triangle()));
    }
}

/// Test 2: Scenario with additional points inside and outside the triangle
#[test]
fn test_scenario_with_neighbours() {
    init_logger();

    for policy in [BoundaryPolicy::Inclusive, BoundaryPolicy::Exclusive] {
        let mut grid = grid_with(scenario_region(), 10, policy);
        let vertex = grid.insert(Coordinate::new(44.919, -112.242)).unwrap();
        // Centroid of the triangle
        let centroid = grid.insert(Coordinate::new(43.1, -109.692)).unwrap();
        // Far corners of the region
        grid.insert(Coordinate::new(40.05, -114.95)).unwrap();
        grid.insert(Coordinate::new(44.95, -105.05)).unwrap();

        let result = grid.intersect(&scenario_triangle());
        let mut expected = vec![vertex, centroid];
        expected.sort();
        assert_eq!(result, expected);
        assert_eq!(result, grid.intersect_exhaustive(&scenario_triangle()));
    }
}

/// Test 3: A polygon sharing only an edge with an occupied cell
#[test]
fn test_edge_touching_policies_differ() {
    init_logger();

    let region = BoundingRegion::new(0.0, 8.0, 0.0, 8.0);
    let touching = QueryPolygon::new(vec![
        Coordinate::new(0.0, 1.0),
        Coordinate::new(0.0, 2.0),
        Coordinate::new(1.0, 2.0),
        Coordinate::new(1.0, 1.0),
    ]);

    let mut inclusive = grid_with(region, 6, BoundaryPolicy::Inclusive);
    let code = inclusive.insert(Coordinate::new(0.5, 0.5)).unwrap();
    assert_eq!(inclusive.intersect(&touching), vec![code]);

    let mut exclusive = grid_with(region, 6, BoundaryPolicy::Exclusive);
    exclusive.insert(Coordinate::new(0.5, 0.5)).unwrap();
    assert!(exclusive.intersect(&touching).is_empty());
    assert!(!exclusive.intersects(&touching));
}

/// Test 4: A polygon covering the whole region returns every occupied cell
#[test]
fn test_full_coverage() {
    init_logger();

    for storage in [StorageMode::Dense, StorageMode::Sparse] {
        for policy in [BoundaryPolicy::Inclusive, BoundaryPolicy::Exclusive] {
            let config = GridConfig::with_resolution(14)
                .with_boundary(policy)
                .with_storage(storage);
            let mut grid = GeoGrid::with_config(scenario_region(), &config).unwrap();

            for i in 0..200 {
                let lat = 40.0 + (i as f64 * 0.0249);
                let lon = -115.0 + (i as f64 * 0.0499);
                grid.insert(Coordinate::new(lat, lon)).unwrap();
            }
            // Region corners, including the upper edges
            grid.insert(Coordinate::new(40.0, -115.0)).unwrap();
            grid.insert(Coordinate::new(45.0, -105.0)).unwrap();

            let all: Vec<_> = grid.occupied_codes().collect();

            let exact = QueryPolygon::from_region(&scenario_region());
            assert_eq!(grid.intersect(&exact), all);

            let larger = QueryPolygon::from_region(&BoundingRegion::new(
                30.0, 50.0, -120.0, -100.0,
            ));
            assert_eq!(grid.intersect(&larger), all);
        }
    }
}

/// Test 5: Polygons disjoint from every occupied cell return nothing
#[test]
fn test_disjoint_polygons() {
    init_logger();

    let mut grid = grid_with(scenario_region(), 16, BoundaryPolicy::Inclusive);
    grid.insert(Coordinate::new(44.0, -112.0)).unwrap();
    grid.insert(Coordinate::new(41.0, -107.0)).unwrap();

    // Entirely outside the region
    let outside = QueryPolygon::from_region(&BoundingRegion::new(10.0, 20.0, 10.0, 20.0));
    assert!(grid.intersect(&outside).is_empty());
    assert_eq!(grid.try_intersect(&outside).unwrap(), vec![]);

    // Inside the region but away from both points
    let gap = QueryPolygon::from_region(&BoundingRegion::new(42.0, 43.0, -110.0, -109.0));
    let (result, stats) = grid.intersect_with_stats(&gap);
    assert!(result.is_empty());
    assert!(stats.pruned_empty + stats.pruned_disjoint > 0);
    assert!(!grid.intersects(&gap));
}

/// Test 6: Empty grid never matches
#[test]
fn test_empty_grid() {
    let grid = grid_with(scenario_region(), 12, BoundaryPolicy::Inclusive);
    assert!(grid.intersect(&scenario_triangle()).is_empty());
    assert!(
        grid.intersect(&QueryPolygon::from_region(&scenario_region()))
            .is_empty()
    );
}

/// Test 7: Concave polygon excludes cells in its notch
#[test]
fn test_concave_polygon() {
    init_logger();

    let region = BoundingRegion::new(0.0, 8.0, 0.0, 8.0);
    let mut grid = grid_with(region, 6, BoundaryPolicy::Exclusive);

    let in_leg = grid.insert(Coordinate::new(0.5, 6.5)).unwrap();
    let in_corner = grid.insert(Coordinate::new(0.5, 0.5)).unwrap();
    let in_notch = grid.insert(Coordinate::new(6.5, 6.5)).unwrap();

    // L shape: full bottom row and left column, four cells thick
    let l_shape = QueryPolygon::new(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(0.0, 8.0),
        Coordinate::new(4.0, 8.0),
        Coordinate::new(4.0, 4.0),
        Coordinate::new(8.0, 4.0),
        Coordinate::new(8.0, 0.0),
    ]);

    let result = grid.intersect(&l_shape);
    assert!(result.contains(&in_leg));
    assert!(result.contains(&in_corner));
    assert!(!result.contains(&in_notch));
    assert_eq!(result, grid.intersect_exhaustive(&l_shape));
}

/// Test 8: Vertex order does not change the answer
#[test]
fn test_winding_order_is_irrelevant() {
    let mut grid = grid_with(scenario_region(), 12, BoundaryPolicy::Inclusive);
    grid.insert(Coordinate::new(44.919, -112.242)).unwrap();
    grid.insert(Coordinate::new(43.0, -109.0)).unwrap();

    let forward = scenario_triangle();
    let reversed: QueryPolygon = forward.vertices().iter().rev().copied().collect();
    assert_eq!(grid.intersect(&forward), grid.intersect(&reversed));
}

/// Test 9: Malformed polygons are empty for intersect and errors for try_intersect
#[test]
fn test_malformed_polygons() {
    init_logger();

    let mut grid = grid_with(scenario_region(), 10, BoundaryPolicy::Inclusive);
    grid.insert(Coordinate::new(42.0, -110.0)).unwrap();

    let empty = QueryPolygon::new(vec![]);
    let line = QueryPolygon::new(vec![
        Coordinate::new(41.0, -111.0),
        Coordinate::new(43.0, -109.0),
    ]);
    let infinite = QueryPolygon::new(vec![
        Coordinate::new(41.0, -111.0),
        Coordinate::new(43.0, f64::INFINITY),
        Coordinate::new(43.0, -109.0),
    ]);

    for polygon in [&empty, &line, &infinite] {
        assert!(grid.intersect(polygon).is_empty());
        assert!(!grid.intersects(polygon));
        assert!(grid.try_intersect(polygon).is_err());
    }
}
