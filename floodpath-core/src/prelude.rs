pub use crate::{
    DEFAULT_JUNCTION_TOLERANCE_M, FLOOD_PENALTY_FACTOR, FLOOD_THRESHOLD_DB, MAX_SNAP_CANDIDATES,
};

// Re-export key components
pub use crate::flood::{BackscatterSource, FloodSummary, SimulatedScene, classify_flood_risk};
pub use crate::loading::{RoadNetworkConfig, create_road_graph, road_graph_from_geojson};
pub use crate::routing::{RouteResult, find_evacuation_route};

// Core types for the road network
pub use crate::Error;
pub use crate::model::{Coordinate, RoadGraph, RoadNode, RoadSegment};
pub use crate::{RoadNodeId, RoadSegmentId};
