//! Road network components - nodes and segments

use geo::{LineString, Point};

use crate::{RoadNodeId, RoadSegmentId};

/// Road graph node (junction or line endpoint)
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Sequential id assigned at build time
    pub id: RoadNodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (one traversable road segment)
#[derive(Debug, Clone)]
pub struct RoadSegment {
    /// Sequential id assigned at build time
    pub id: RoadSegmentId,
    /// Segment geometry for route assembly
    pub geometry: LineString<f64>,
    /// Physical length in meters
    pub length_m: f64,
    /// Set by the flood classifier when backscatter indicates water
    pub flooded: bool,
    /// Flood-adjusted routing weight, always >= `length_m`
    pub weight: f64,
}

impl RoadSegment {
    pub fn traversal_weight(&self) -> f64 {
        self.weight
    }
}
