//! Flood risk classification for road segments
//!
//! Samples a (simulated) SAR backscatter signal for every segment of a
//! road graph, flags water-covered segments and rewrites their routing
//! weights so the pathfinder avoids them whenever it can.

mod radar;

pub use radar::{BackscatterSource, SimulatedScene};

use chrono::{DateTime, Utc};
use log::info;
use petgraph::graph::EdgeIndex;
use rayon::prelude::*;
use serde::Serialize;

use crate::{FLOOD_PENALTY_FACTOR, FLOOD_THRESHOLD_DB, model::RoadGraph};

/// Outcome of one classification pass over a road graph
#[derive(Debug, Clone, Serialize)]
pub struct FloodSummary {
    pub total_segments: usize,
    pub flooded_segments: usize,
    pub threshold_db: f64,
    pub classified_at: DateTime<Utc>,
}

/// Classifies every segment of the graph as flooded or dry
///
/// A segment is flooded when its VH backscatter reading falls below
/// [`FLOOD_THRESHOLD_DB`]. Dry weight equals the physical length; flooded
/// weight is length times [`FLOOD_PENALTY_FACTOR`], which steers routes
/// around water without ever making a segment untraversable. Both the
/// flag and the weight of every segment are overwritten on every pass,
/// so repeated runs never leave stale state behind.
///
/// Must complete before routing reads the graph; the graph is not safe
/// for concurrent routing while this runs.
pub fn classify_flood_risk(graph: &mut RoadGraph, source: &impl BackscatterSource) -> FloodSummary {
    let readings: Vec<(EdgeIndex, f64)> = (0..graph.graph.edge_count())
        .into_par_iter()
        .map(|i| {
            let edge = EdgeIndex::new(i);
            (edge, source.backscatter_db(&graph.graph[edge]))
        })
        .collect();

    let mut flooded_segments = 0;
    for (edge, backscatter_db) in readings {
        let segment = &mut graph.graph[edge];
        segment.flooded = backscatter_db < FLOOD_THRESHOLD_DB;
        segment.weight = if segment.flooded {
            flooded_segments += 1;
            segment.length_m * FLOOD_PENALTY_FACTOR
        } else {
            segment.length_m
        };
    }

    let summary = FloodSummary {
        total_segments: graph.segment_count(),
        flooded_segments,
        threshold_db: FLOOD_THRESHOLD_DB,
        classified_at: Utc::now(),
    };

    info!(
        "Flood classification complete: {} of {} segments flooded (threshold {} dB)",
        summary.flooded_segments, summary.total_segments, summary.threshold_db
    );

    summary
}
