//! Road network model

pub mod components;
pub mod network;

pub use components::{RoadNode, RoadSegment};
pub use network::{IndexedPoint, RoadGraph};
