use log::info;

use super::config::RoadNetworkConfig;
use super::parser::road_graph_from_geojson;
use crate::{Error, model::RoadGraph};

/// Creates a road graph based on the provided configuration
///
/// # Errors
///
/// Returns an error if there are problems reading or parsing the
/// network file
pub fn create_road_graph(config: &RoadNetworkConfig) -> Result<RoadGraph, Error> {
    validate_config(config)?;

    info!(
        "Processing road network data (GeoJSON): {}",
        config.geojson_path.display()
    );

    let raw = std::fs::read_to_string(&config.geojson_path)?;
    let graph = road_graph_from_geojson(&raw, config.junction_tolerance_m)?;

    info!(
        "Road graph created successfully: {} nodes, {} segments",
        graph.node_count(),
        graph.segment_count()
    );

    // Parsing a large FeatureCollection allocates heavily and the freed
    // memory is not always released back to the system. This call will
    // release all free memory from the tail of the heap back to the system.
    //
    // # Safety
    //
    // This call is safe to use on linux with glibc implementation
    // which is checked by the cfg attribute in compile time.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::warn!("Memory trimming failed - continuing anyway");
        } else {
            log::debug!("Successfully trimmed unused heap memory");
        }
    }
    Ok(graph)
}

fn validate_config(config: &RoadNetworkConfig) -> Result<(), Error> {
    if !config.geojson_path.exists() {
        return Err(Error::InvalidData(format!(
            "road network file not found: {}",
            config.geojson_path.display()
        )));
    }

    if !config.junction_tolerance_m.is_finite() || config.junction_tolerance_m < 0.0 {
        return Err(Error::InvalidData(format!(
            "junction tolerance must be non-negative, got {}",
            config.junction_tolerance_m
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_invalid_data() {
        let config = RoadNetworkConfig::new("/nonexistent/road_network.geojson");
        let err = create_road_graph(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("not found")));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let mut config = RoadNetworkConfig::new("Cargo.toml");
        config.junction_tolerance_m = -1.0;
        let err = create_road_graph(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("tolerance")));
    }
}
