//! Routable road graph with a spatial index over its nodes

use geo::{Distance, Haversine, Point};
use petgraph::graph::{NodeIndex, UnGraph};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{RoadNode, RoadSegment};
use crate::MAX_SNAP_CANDIDATES;

/// Spatially indexed reference to a graph node
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Road network graph
///
/// Undirected: every segment is traversable in both directions. Built once
/// by the loading layer and treated as read-only by the routing layer; only
/// the flood classifier rewrites segment weights, and never concurrently
/// with routing.
#[derive(Debug)]
pub struct RoadGraph {
    /// Underlying graph structure
    pub graph: UnGraph<RoadNode, RoadSegment>,
    /// R*-tree over node positions for nearest-node queries
    rtree: RTree<IndexedPoint>,
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            rtree: RTree::new(),
        }
    }
}

impl RoadGraph {
    /// Wraps a finished graph, bulk-loading the spatial index
    #[must_use]
    pub fn new(graph: UnGraph<RoadNode, RoadSegment>) -> Self {
        let rtree = RTree::bulk_load(
            graph
                .node_indices()
                .map(|idx| IndexedPoint::new(graph[idx].geometry, idx))
                .collect(),
        );
        Self { graph, rtree }
    }

    pub(crate) fn from_parts(graph: UnGraph<RoadNode, RoadSegment>, rtree: RTree<IndexedPoint>) -> Self {
        Self { graph, rtree }
    }

    /// Number of nodes in the graph
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of road segments in the graph
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Finds the graph node nearest to `point` by geodesic distance
    ///
    /// Returns the node index and its haversine distance in meters, or
    /// `None` when the graph has no nodes. The tree ranks candidates in
    /// degree space, so a small candidate set is re-ranked by haversine
    /// distance before picking the winner.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, f64)> {
        self.rtree
            .nearest_neighbor_iter(point)
            .take(MAX_SNAP_CANDIDATES)
            .map(|cand| (cand.data, Haversine.distance(*cand.geom(), *point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use geo::LineString;

    use super::*;

    fn grid_graph() -> RoadGraph {
        let mut graph = UnGraph::new_undirected();
        let coords = [(16.90, 52.40), (16.91, 52.40), (16.92, 52.40), (16.91, 52.41)];
        let nodes: Vec<NodeIndex> = coords
            .iter()
            .enumerate()
            .map(|(id, &(lon, lat))| {
                graph.add_node(RoadNode {
                    id: id as u64,
                    geometry: Point::new(lon, lat),
                })
            })
            .collect();
        for (id, (a, b)) in [(0, 1), (1, 2), (1, 3)].iter().enumerate() {
            let geometry = LineString::new(vec![
                graph[nodes[*a]].geometry.into(),
                graph[nodes[*b]].geometry.into(),
            ]);
            let length_m = Haversine.distance(graph[nodes[*a]].geometry, graph[nodes[*b]].geometry);
            graph.add_edge(
                nodes[*a],
                nodes[*b],
                RoadSegment {
                    id: id as u64,
                    geometry,
                    length_m,
                    flooded: false,
                    weight: length_m,
                },
            );
        }
        RoadGraph::new(graph)
    }

    #[test]
    fn counts_nodes_and_segments() {
        let graph = grid_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.segment_count(), 3);
    }

    #[test]
    fn snaps_to_geodesically_nearest_node() {
        let graph = grid_graph();
        // Slightly east of the middle junction
        let (node, dist) = graph.nearest_node(&Point::new(16.9101, 52.4001)).unwrap();
        assert_eq!(graph.graph[node].id, 1);
        assert!(dist < 20.0);
    }

    #[test]
    fn empty_graph_has_no_nearest_node() {
        let graph = RoadGraph::new(UnGraph::new_undirected());
        assert!(graph.nearest_node(&Point::new(16.9, 52.4)).is_none());
    }
}
