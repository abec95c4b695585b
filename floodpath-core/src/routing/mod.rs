//! Evacuation route search over the flood-weighted road graph

mod astar;
mod route;
mod to_geojson;

pub use route::{RouteResult, find_evacuation_route};
