//! Benchmarks for graph construction, flood classification and routing
//! on a synthetic street grid.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use floodpath_core::prelude::*;

const GRID_LINES: usize = 20;
const GRID_SPACING_DEG: f64 = 0.001;
const GRID_ORIGIN: (f64, f64) = (16.90, 52.40);

/// GeoJSON for a square grid of streets with shared junctions.
fn grid_network(lines: usize) -> String {
    let (lon0, lat0) = GRID_ORIGIN;
    let mut features = Vec::new();
    for i in 0..lines {
        let lat = lat0 + i as f64 * GRID_SPACING_DEG;
        let coords: Vec<[f64; 2]> = (0..lines)
            .map(|j| [lon0 + j as f64 * GRID_SPACING_DEG, lat])
            .collect();
        features.push(json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "LineString", "coordinates": coords }
        }));
    }
    for j in 0..lines {
        let lon = lon0 + j as f64 * GRID_SPACING_DEG;
        let coords: Vec<[f64; 2]> = (0..lines)
            .map(|i| [lon, lat0 + i as f64 * GRID_SPACING_DEG])
            .collect();
        features.push(json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "LineString", "coordinates": coords }
        }));
    }
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

fn classified_grid() -> RoadGraph {
    let mut graph =
        road_graph_from_geojson(&grid_network(GRID_LINES), DEFAULT_JUNCTION_TOLERANCE_M)
            .expect("grid fixture must parse");
    classify_flood_risk(&mut graph, &SimulatedScene::default());
    graph
}

fn bench_build_graph(c: &mut Criterion) {
    let geojson = grid_network(GRID_LINES);

    c.bench_function("build_graph_20x20", |b| {
        b.iter(|| {
            black_box(road_graph_from_geojson(
                black_box(&geojson),
                DEFAULT_JUNCTION_TOLERANCE_M,
            ))
        });
    });
}

fn bench_classify(c: &mut Criterion) {
    let mut graph = classified_grid();
    let scene = SimulatedScene::default();

    c.bench_function("classify_20x20", |b| {
        b.iter(|| black_box(classify_flood_risk(&mut graph, &scene)));
    });
}

fn bench_route(c: &mut Criterion) {
    let graph = classified_grid();
    let (lon0, lat0) = GRID_ORIGIN;
    let span = (GRID_LINES - 1) as f64 * GRID_SPACING_DEG;
    let start = Coordinate::new(lat0, lon0).expect("valid fixture coordinate");
    let end = Coordinate::new(lat0 + span, lon0 + span).expect("valid fixture coordinate");

    c.bench_function("route_cross_grid_20x20", |b| {
        b.iter(|| black_box(find_evacuation_route(&graph, start, end)));
    });
}

criterion_group!(benches, bench_build_graph, bench_classify, bench_route);
criterion_main!(benches);
