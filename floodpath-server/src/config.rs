//! Server configuration, read from a TOML file with CLI overrides on top

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use floodpath_core::prelude::*;

/// Runtime configuration for the evacuation routing server
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to
    pub listen: SocketAddr,
    /// Per-request timeout, seconds
    pub request_timeout_secs: u64,
    /// Upper bound on requests handled concurrently
    pub max_concurrent_requests: usize,
    /// Road network source
    pub network: RoadNetworkConfig,
    /// Simulated radar scene used for flood classification
    pub flood: SimulatedScene,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout_secs: 30,
            max_concurrent_requests: 256,
            network: RoadNetworkConfig::new("data/road_network.geojson"),
            flood: SimulatedScene::default(),
        }
    }
}

impl ServerConfig {
    /// Reads and parses a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::InvalidData(format!("config file {}: {e}", path.display())))
    }
}
