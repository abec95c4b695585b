use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_JUNCTION_TOLERANCE_M;

/// Configuration for building a road network graph
#[derive(Debug, Clone, Deserialize)]
pub struct RoadNetworkConfig {
    /// Path to a `GeoJSON` `FeatureCollection` of road line geometries
    pub geojson_path: PathBuf,
    /// Vertices closer than this (meters) collapse into one junction node
    #[serde(default = "default_junction_tolerance")]
    pub junction_tolerance_m: f64,
}

fn default_junction_tolerance() -> f64 {
    DEFAULT_JUNCTION_TOLERANCE_M
}

impl RoadNetworkConfig {
    /// Configuration for `geojson_path` with the default junction tolerance
    #[must_use]
    pub fn new(geojson_path: impl Into<PathBuf>) -> Self {
        Self {
            geojson_path: geojson_path.into(),
            junction_tolerance_m: DEFAULT_JUNCTION_TOLERANCE_M,
        }
    }
}
