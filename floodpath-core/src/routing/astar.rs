use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use geo::{Distance, Haversine};
use hashbrown::HashMap;
use log::debug;
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::model::RoadGraph;

#[derive(Copy, Clone, PartialEq)]
struct State {
    estimate: f64,
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by estimated total cost (reversed from standard Rust
        // BinaryHeap), with the node index as a stable tie-break
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) struct SearchResult {
    /// Node sequence from start to goal
    pub(crate) nodes: Vec<NodeIndex>,
    /// Edge taken between each consecutive node pair
    pub(crate) edges: Vec<EdgeIndex>,
    /// Total flood-adjusted cost of the path
    pub(crate) total_cost: f64,
}

/// A* search over flood-adjusted segment weights
///
/// The heuristic is the haversine distance to the goal node. Segment
/// weights are never smaller than physical length, so the heuristic never
/// overestimates the remaining cost and the first settled path to the
/// goal is a minimum-cost path. Equal-estimate nodes are expanded in
/// increasing node-index order, and equal-cost parallel edges resolve to
/// the lowest edge index, so results are stable across runs.
///
/// Returns `None` when the goal is unreachable from the start.
pub(crate) fn astar_route(
    graph: &RoadGraph,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<SearchResult> {
    let goal_point = graph.graph[goal].geometry;

    // Estimate capacity based on graph size (adjust as needed)
    let estimated_nodes = graph.graph.node_count().min(1000);
    let mut best_cost: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> =
        HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(graph.graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    best_cost.insert(start, 0.0);
    heap.push(State {
        estimate: Haversine.distance(graph.graph[start].geometry, goal_point),
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node, .. }) = heap.pop() {
        if settled.contains(node.index()) {
            continue;
        }

        // Skip if we've found a better path
        if let Some(&best) = best_cost.get(&node)
            && cost > best
        {
            continue;
        }

        if node == goal {
            debug!(
                "Route search settled {} of {} nodes",
                settled.count_ones(..),
                graph.graph.node_count()
            );
            return Some(reconstruct(&predecessors, start, goal, cost));
        }

        settled.insert(node.index());

        // Examine neighbors
        for edge in graph.graph.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + edge.weight().traversal_weight();

            // Add or update distance if better using Entry API
            match best_cost.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, (node, edge.id()));
                    heap.push(State {
                        estimate: next_cost
                            + Haversine.distance(graph.graph[next].geometry, goal_point),
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, (node, edge.id()));
                        heap.push(State {
                            estimate: next_cost
                                + Haversine.distance(graph.graph[next].geometry, goal_point),
                            cost: next_cost,
                            node: next,
                        });
                    } else if next_cost == *entry.get()
                        && let Some(prev) = predecessors.get_mut(&next)
                        && prev.0 == node
                        && edge.id().index() < prev.1.index()
                    {
                        // Equal-weight parallel edge: keep the lowest edge index
                        prev.1 = edge.id();
                    }
                }
            }
        }
    }

    None
}

fn reconstruct(
    predecessors: &HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
    start: NodeIndex,
    goal: NodeIndex,
    total_cost: f64,
) -> SearchResult {
    let mut nodes = vec![goal];
    let mut edges = Vec::new();
    let mut current = goal;

    while current != start {
        let Some(&(prev, edge)) = predecessors.get(&current) else {
            break;
        };
        edges.push(edge);
        nodes.push(prev);
        current = prev;
    }

    nodes.reverse();
    edges.reverse();

    SearchResult {
        nodes,
        edges,
        total_cost,
    }
}
