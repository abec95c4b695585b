//! Data model for the road network
//!
//! Contains types and structures for representing a routable road graph.

// Re-export of main modules
pub mod coordinate;
pub mod roads;

// Re-export of basic types for convenience
pub use coordinate::Coordinate;
pub use roads::components::{RoadNode, RoadSegment};
pub use roads::network::{IndexedPoint, RoadGraph};
