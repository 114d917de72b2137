use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geo::{Intersects, Point};
use geogrid::{BoundaryPolicy, Coordinate, GeoGrid, GridConfig, QueryPolygon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::{AABB, RTree};

const BASE_GEOHASH: &str = "9x";

fn triangle() -> QueryPolygon {
    QueryPolygon::new(vec![
        Coordinate::new(44.919, -112.242),
        Coordinate::new(43.111, -105.414),
        Coordinate::new(41.271, -111.421),
    ])
}

fn random_coordinates(count: usize, grid: &GeoGrid) -> Vec<Coordinate> {
    let region = grid.region();
    let mut rng = StdRng::seed_from_u64(1);
    (0..count)
        .map(|_| {
            Coordinate::new(
                rng.gen_range(region.min_lat()..region.max_lat()),
                rng.gen_range(region.min_lon()..region.max_lon()),
            )
        })
        .collect()
}

fn populated(resolution: u32, count: usize) -> (GeoGrid, Vec<Coordinate>) {
    let mut grid = GeoGrid::from_geohash(BASE_GEOHASH, resolution).unwrap();
    let coords = random_coordinates(count, &grid);
    for c in &coords {
        grid.insert(*c).unwrap();
    }
    (grid, coords)
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for resolution in [16, 30] {
        let mut grid = GeoGrid::from_geohash(BASE_GEOHASH, resolution).unwrap();
        let coords = random_coordinates(10_000, &grid);

        group.bench_with_input(
            BenchmarkId::new("single_insert", resolution),
            &coords,
            |b, coords| {
                let mut i = 0;
                b.iter(|| {
                    let code = grid.insert(black_box(coords[i % coords.len()])).unwrap();
                    i += 1;
                    code
                })
            },
        );
    }

    group.finish();
}

fn benchmark_triangle_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangle_query");
    let polygon = triangle();

    for count in [1_000, 100_000] {
        let (grid, _) = populated(30, count);

        group.bench_with_input(BenchmarkId::new("pruned", count), &polygon, |b, p| {
            b.iter(|| grid.intersect(black_box(p)))
        });

        group.bench_with_input(BenchmarkId::new("exhaustive", count), &polygon, |b, p| {
            b.iter(|| grid.intersect_exhaustive(black_box(p)))
        });

        group.bench_with_input(BenchmarkId::new("any", count), &polygon, |b, p| {
            b.iter(|| grid.intersects(black_box(p)))
        });
    }

    for policy in [BoundaryPolicy::Inclusive, BoundaryPolicy::Exclusive] {
        let config = GridConfig::with_resolution(20).with_boundary(policy);
        let mut grid = GeoGrid::from_geohash_with_config(BASE_GEOHASH, &config).unwrap();
        for c in random_coordinates(100_000, &grid) {
            grid.insert(c).unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("policy", format!("{:?}", policy)),
            &polygon,
            |b, p| b.iter(|| grid.intersect(black_box(p))),
        );
    }

    group.finish();
}

/// Point R-tree answering the same question: any stored point inside the
/// triangle.
fn benchmark_rtree_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_baseline");
    let shape = triangle().to_geo();
    let bbox = triangle().bounding_region().unwrap();
    let envelope = AABB::from_corners(
        [bbox.min_lon(), bbox.min_lat()],
        [bbox.max_lon(), bbox.max_lat()],
    );

    for count in [1_000, 100_000] {
        let (_, coords) = populated(30, count);
        let tree = RTree::bulk_load(
            coords
                .iter()
                .map(|c| [c.longitude(), c.latitude()])
                .collect::<Vec<_>>(),
        );

        group.bench_with_input(BenchmarkId::new("points_in_triangle", count), &envelope, |b, env| {
            b.iter(|| {
                tree.locate_in_envelope(black_box(env))
                    .filter(|p| shape.intersects(&Point::new(p[0], p[1])))
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_triangle_query,
    benchmark_rtree_baseline
);

criterion_main!(benches);
