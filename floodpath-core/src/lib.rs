//! Flood-aware evacuation routing for road networks
//!
//! Builds a routable graph from a `GeoJSON` road network, classifies every
//! segment against a (simulated) SAR backscatter signal and computes
//! evacuation routes that avoid flooded roads whenever a dry alternative
//! exists. Flooded segments are penalized, never removed, so a route
//! through water is still returned when nothing better is left.
//!
//! The usual flow is: [`loading::create_road_graph`] once at startup,
//! [`flood::classify_flood_risk`] before serving any queries, then
//! [`routing::find_evacuation_route`] per request against the now
//! read-only graph.

pub mod error;
pub mod flood;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{Coordinate, RoadGraph, RoadNode, RoadSegment};

/// Identifier of a node in the road graph
pub type RoadNodeId = u64;

/// Identifier of a road segment
pub type RoadSegmentId = u64;

/// Weight multiplier applied to segments classified as flooded
pub const FLOOD_PENALTY_FACTOR: f64 = 100.0;

/// VH backscatter threshold in decibels; readings below it indicate water
pub const FLOOD_THRESHOLD_DB: f64 = -21.0;

/// Default distance within which junction vertices are merged, meters
pub const DEFAULT_JUNCTION_TOLERANCE_M: f64 = 1.0;

/// Nearest-neighbor candidates re-ranked by geodesic distance when snapping
pub const MAX_SNAP_CANDIDATES: usize = 16;
