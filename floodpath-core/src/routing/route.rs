use geo::{Coord, LineString};
use log::debug;

use super::astar::{SearchResult, astar_route};
use crate::{
    Error, RoadNodeId,
    model::{Coordinate, RoadGraph},
};

/// A computed evacuation route
#[derive(Debug, Clone)]
pub struct RouteResult {
    /// Route geometry as lon-lat coordinates
    pub geometry: LineString<f64>,
    /// Physical distance along the route in meters, without flood penalties
    pub distance_m: f64,
    /// Number of flooded segments the route traverses
    pub flooded_segments: usize,
    /// Number of graph nodes along the route
    pub nodes_count: usize,
    /// Node the start coordinate snapped to
    pub start_node: RoadNodeId,
    /// Node the end coordinate snapped to
    pub end_node: RoadNodeId,
    /// Requested start, as given by the caller
    pub start: Coordinate,
    /// Requested end, as given by the caller
    pub end: Coordinate,
}

/// Finds the best evacuation route between two coordinates
///
/// Snaps both coordinates to their nearest graph nodes and runs an A*
/// search over flood-adjusted weights. Flooded segments are heavily
/// penalized but never excluded, so a route through water is still
/// returned when no dry alternative exists. The reported distance is
/// the real physical distance, not the penalized cost.
///
/// Coordinates are validated when constructed, see [`Coordinate::new`].
///
/// # Errors
///
/// Returns [`Error::EmptyNetwork`] if the graph has no nodes and
/// [`Error::NoRoute`] if the snapped nodes are not connected.
pub fn find_evacuation_route(
    graph: &RoadGraph,
    start: Coordinate,
    end: Coordinate,
) -> Result<RouteResult, Error> {
    if graph.node_count() == 0 {
        return Err(Error::EmptyNetwork);
    }

    let (start_node, start_offset) = graph
        .nearest_node(&start.to_point())
        .ok_or(Error::EmptyNetwork)?;
    let (end_node, end_offset) = graph
        .nearest_node(&end.to_point())
        .ok_or(Error::EmptyNetwork)?;

    debug!(
        "Snapped start to node {} ({start_offset:.1} m away) and end to node {} ({end_offset:.1} m away)",
        graph.graph[start_node].id, graph.graph[end_node].id
    );

    if start_node == end_node {
        // Both coordinates collapse onto one junction: a zero-length route
        let node = &graph.graph[start_node];
        return Ok(RouteResult {
            geometry: LineString::new(vec![node.geometry.into()]),
            distance_m: 0.0,
            flooded_segments: 0,
            nodes_count: 1,
            start_node: node.id,
            end_node: node.id,
            start,
            end,
        });
    }

    let search = astar_route(graph, start_node, end_node).ok_or(Error::NoRoute)?;
    let route = assemble_route(graph, &search, start, end);

    debug!(
        "Evacuation route: {:.1} m over {} segments, {} flooded (weighted cost {:.1})",
        route.distance_m,
        search.edges.len(),
        route.flooded_segments,
        search.total_cost
    );

    Ok(route)
}

/// Expands a node/edge path into full route geometry and totals
fn assemble_route(
    graph: &RoadGraph,
    search: &SearchResult,
    start: Coordinate,
    end: Coordinate,
) -> RouteResult {
    let mut coords: Vec<Coord<f64>> = Vec::new();
    let mut distance_m = 0.0;
    let mut flooded_segments = 0;

    for (idx, &edge) in search.edges.iter().enumerate() {
        let segment = &graph.graph[edge];
        distance_m += segment.length_m;
        if segment.flooded {
            flooded_segments += 1;
        }

        // Segment geometry is stored once per edge; orient it to the
        // direction of travel before stitching
        let from: Coord<f64> = graph.graph[search.nodes[idx]].geometry.into();
        let mut segment_coords = segment.geometry.0.clone();
        let reversed = match (segment_coords.first(), segment_coords.last()) {
            (Some(first), Some(last)) => sq_dist(*first, from) > sq_dist(*last, from),
            _ => false,
        };
        if reversed {
            segment_coords.reverse();
        }

        if coords.is_empty() {
            coords.extend(segment_coords);
        } else {
            // The first vertex repeats the previous segment's last vertex
            coords.extend(segment_coords.into_iter().skip(1));
        }
    }

    RouteResult {
        geometry: LineString::new(coords),
        distance_m,
        flooded_segments,
        nodes_count: search.nodes.len(),
        start_node: graph.graph[search.nodes[0]].id,
        end_node: graph.graph[search.nodes[search.nodes.len() - 1]].id,
        start,
        end,
    }
}

fn sq_dist(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
