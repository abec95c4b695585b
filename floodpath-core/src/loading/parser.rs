//! `GeoJSON` road network parser
//!
//! Turns a `FeatureCollection` of line geometries into a routable graph:
//! one segment per consecutive vertex pair, with junction vertices
//! deduplicated within a configurable tolerance so crossing roads connect
//! wherever their geometries meet.

use geo::{Coord, Distance, Haversine, LineString, Point};
use geojson::{FeatureCollection, GeoJson, Value as GeoJsonValue};
use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use rstar::RTree;

use crate::{
    Error, RoadSegmentId,
    model::{Coordinate, IndexedPoint, RoadGraph, RoadNode, RoadSegment},
};

// Degree-space neighbors checked against the merge tolerance per vertex
const DEDUP_CANDIDATES: usize = 4;

/// Builds a road graph from a `GeoJSON` `FeatureCollection` string
///
/// Every `LineString` feature (and every member line of a
/// `MultiLineString`) contributes one segment per consecutive vertex
/// pair. Vertices within `junction_tolerance_m` meters of an existing
/// node reuse that node.
///
/// # Errors
///
/// Returns an error if the input is not a valid `FeatureCollection`,
/// contains geometry kinds other than line strings, has coordinates
/// outside valid geographic bounds, has lines with fewer than two
/// vertices, or yields no usable segments at all.
pub fn road_graph_from_geojson(
    geojson_str: &str,
    junction_tolerance_m: f64,
) -> Result<RoadGraph, Error> {
    let collection = parse_collection(geojson_str)?;

    let mut graph = UnGraph::<RoadNode, RoadSegment>::new_undirected();
    let mut index = RTree::<IndexedPoint>::new();
    let mut next_segment_id: RoadSegmentId = 0;

    for (feature_idx, feature) in collection.features.iter().enumerate() {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| Error::InvalidData(format!("feature {feature_idx} has no geometry")))?;

        match &geometry.value {
            GeoJsonValue::LineString(line) => {
                add_line(
                    &mut graph,
                    &mut index,
                    &mut next_segment_id,
                    line,
                    junction_tolerance_m,
                    feature_idx,
                )?;
            }
            GeoJsonValue::MultiLineString(lines) => {
                for line in lines {
                    add_line(
                        &mut graph,
                        &mut index,
                        &mut next_segment_id,
                        line,
                        junction_tolerance_m,
                        feature_idx,
                    )?;
                }
            }
            other => {
                return Err(Error::InvalidData(format!(
                    "feature {feature_idx}: unsupported geometry `{}`, expected LineString or MultiLineString",
                    geometry_type_name(other)
                )));
            }
        }
    }

    if graph.edge_count() == 0 {
        return Err(Error::InvalidData(
            "road network contains no usable line geometry".to_string(),
        ));
    }

    Ok(RoadGraph::from_parts(graph, index))
}

fn parse_collection(geojson_str: &str) -> Result<FeatureCollection, Error> {
    let geojson = geojson_str
        .parse::<GeoJson>()
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        _ => {
            return Err(Error::InvalidData(
                "expected a GeoJSON FeatureCollection".to_string(),
            ));
        }
    };

    if collection.features.is_empty() {
        return Err(Error::InvalidData(
            "road network FeatureCollection has no features".to_string(),
        ));
    }

    Ok(collection)
}

fn add_line(
    graph: &mut UnGraph<RoadNode, RoadSegment>,
    index: &mut RTree<IndexedPoint>,
    next_segment_id: &mut RoadSegmentId,
    positions: &[Vec<f64>],
    tolerance_m: f64,
    feature_idx: usize,
) -> Result<(), Error> {
    if positions.len() < 2 {
        return Err(Error::InvalidData(format!(
            "feature {feature_idx}: line geometry has fewer than two vertices"
        )));
    }

    let mut vertices = Vec::with_capacity(positions.len());
    for position in positions {
        vertices.push(position_to_point(position, feature_idx)?);
    }

    for (a, b) in vertices.into_iter().tuple_windows() {
        let source = intern_node(graph, index, a, tolerance_m);
        let target = intern_node(graph, index, b, tolerance_m);
        // Both endpoints collapsed into the same junction: nothing to traverse
        if source == target {
            continue;
        }

        let geometry = LineString::new(vec![
            graph[source].geometry.into(),
            graph[target].geometry.into(),
        ]);
        let length_m = geodesic_length_m(&geometry);
        graph.add_edge(
            source,
            target,
            RoadSegment {
                id: *next_segment_id,
                geometry,
                length_m,
                flooded: false,
                weight: length_m,
            },
        );
        *next_segment_id += 1;
    }

    Ok(())
}

fn position_to_point(position: &[f64], feature_idx: usize) -> Result<Point<f64>, Error> {
    if position.len() < 2 {
        return Err(Error::InvalidData(format!(
            "feature {feature_idx}: position has fewer than two coordinates"
        )));
    }
    // GeoJSON positions are [longitude, latitude]
    let (lon, lat) = (position[0], position[1]);
    let coord = Coordinate::new(lat, lon).map_err(|_| {
        Error::InvalidData(format!(
            "feature {feature_idx}: coordinate out of bounds: lon {lon}, lat {lat}"
        ))
    })?;
    Ok(coord.to_point())
}

/// Reuses an existing node within `tolerance_m` of `point`, or creates one
fn intern_node(
    graph: &mut UnGraph<RoadNode, RoadSegment>,
    index: &mut RTree<IndexedPoint>,
    point: Point<f64>,
    tolerance_m: f64,
) -> NodeIndex {
    let existing = index
        .nearest_neighbor_iter(&point)
        .take(DEDUP_CANDIDATES)
        .map(|cand| (cand.data, Haversine.distance(*cand.geom(), point)))
        .filter(|(_, dist)| *dist <= tolerance_m)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(node, _)| node);

    if let Some(node) = existing {
        return node;
    }

    let id = graph.node_count() as u64;
    let node = graph.add_node(RoadNode {
        id,
        geometry: point,
    });
    index.insert(IndexedPoint::new(point, node));
    node
}

/// Cumulative geodesic length along a vertex sequence, in meters
fn geodesic_length_m(line: &LineString<f64>) -> f64 {
    line.points()
        .tuple_windows()
        .map(|(a, b)| Haversine.distance(a, b))
        .sum()
}

fn geometry_type_name(value: &GeoJsonValue) -> &'static str {
    match value {
        GeoJsonValue::Point(_) => "Point",
        GeoJsonValue::MultiPoint(_) => "MultiPoint",
        GeoJsonValue::LineString(_) => "LineString",
        GeoJsonValue::MultiLineString(_) => "MultiLineString",
        GeoJsonValue::Polygon(_) => "Polygon",
        GeoJsonValue::MultiPolygon(_) => "MultiPolygon",
        GeoJsonValue::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;

    fn collection(features: Vec<serde_json::Value>) -> String {
        json!({ "type": "FeatureCollection", "features": features }).to_string()
    }

    fn line_feature(coords: Vec<[f64; 2]>) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "LineString", "coordinates": coords }
        })
    }

    #[test]
    fn one_segment_per_vertex_pair() {
        let input = collection(vec![line_feature(vec![
            [16.90, 52.40],
            [16.91, 52.40],
            [16.92, 52.40],
        ])]);
        let graph = road_graph_from_geojson(&input, 1.0).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.segment_count(), 2);

        let ids: Vec<u64> = graph.graph.node_weights().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn segment_lengths_are_geodesic() {
        let input = collection(vec![line_feature(vec![[16.90, 52.40], [16.91, 52.40]])]);
        let graph = road_graph_from_geojson(&input, 1.0).unwrap();
        let segment = graph.graph.edge_weights().next().unwrap();
        // 0.01 deg of longitude at 52.4N is roughly 678 m
        assert_relative_eq!(segment.length_m, 678.4, max_relative = 0.01);
        assert_relative_eq!(segment.weight, segment.length_m);
        assert!(!segment.flooded);
    }

    #[test]
    fn merges_junctions_within_tolerance() {
        // Second line starts a few millimeters away from where the first ends
        let input = collection(vec![
            line_feature(vec![[16.90, 52.40], [16.902, 52.40]]),
            line_feature(vec![[16.902000005, 52.40000001], [16.904, 52.40]]),
        ]);
        let graph = road_graph_from_geojson(&input, 1.0).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.segment_count(), 2);
    }

    #[test]
    fn zero_tolerance_keeps_near_duplicates_apart() {
        let input = collection(vec![
            line_feature(vec![[16.90, 52.40], [16.902, 52.40]]),
            line_feature(vec![[16.902000005, 52.40000001], [16.904, 52.40]]),
        ]);
        let graph = road_graph_from_geojson(&input, 0.0).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.segment_count(), 2);
    }

    #[test]
    fn accepts_multi_line_string() {
        let feature = json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "MultiLineString",
                "coordinates": [
                    [[16.90, 52.40], [16.91, 52.40]],
                    [[16.91, 52.40], [16.91, 52.41]],
                ]
            }
        });
        let graph = road_graph_from_geojson(&collection(vec![feature]), 1.0).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.segment_count(), 2);
    }

    #[test]
    fn rejects_non_line_geometry() {
        let feature = json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [16.90, 52.40] }
        });
        let err = road_graph_from_geojson(&collection(vec![feature]), 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("Point")));
    }

    #[test]
    fn rejects_out_of_bounds_coordinates() {
        let input = collection(vec![line_feature(vec![[16.90, 52.40], [181.0, 52.40]])]);
        let err = road_graph_from_geojson(&input, 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("out of bounds")));
    }

    #[test]
    fn rejects_degenerate_line() {
        let input = collection(vec![line_feature(vec![[16.90, 52.40]])]);
        let err = road_graph_from_geojson(&input, 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("fewer than two vertices")));
    }

    #[test]
    fn rejects_empty_collection() {
        let err = road_graph_from_geojson(&collection(vec![]), 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn rejects_unparsable_input() {
        let err = road_graph_from_geojson("not geojson at all", 1.0).unwrap_err();
        assert!(matches!(err, Error::GeoJsonError(_)));
    }

    #[test]
    fn rejects_feature_without_geometry() {
        let feature = json!({ "type": "Feature", "properties": {}, "geometry": null });
        let err = road_graph_from_geojson(&collection(vec![feature]), 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("no geometry")));
    }

    #[test]
    fn segment_endpoints_use_interned_node_positions() {
        let input = collection(vec![
            line_feature(vec![[16.90, 52.40], [16.902, 52.40]]),
            line_feature(vec![[16.902000005, 52.40000001], [16.904, 52.40]]),
        ]);
        let graph = road_graph_from_geojson(&input, 1.0).unwrap();
        // The second segment starts exactly at the merged junction geometry
        let shared: Vec<Coord<f64>> = graph
            .graph
            .edge_weights()
            .map(|segment| segment.geometry.0[0])
            .collect();
        let junction = graph
            .graph
            .node_weights()
            .find(|n| n.id == 1)
            .unwrap()
            .geometry;
        assert!(shared.contains(&junction.into()));
    }
}
