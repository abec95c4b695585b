//! This module is responsible for loading road network data (`GeoJSON`)
//! and building a routable graph from it.

mod builder;
mod config;
mod parser;

pub use builder::create_road_graph;
pub use config::RoadNetworkConfig;
pub use parser::road_graph_from_geojson;
