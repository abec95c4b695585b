use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::{Map, json};

use super::route::RouteResult;
use crate::Error;

impl RouteResult {
    /// Converts the route to a `GeoJSON` `FeatureCollection`
    ///
    /// The collection carries one `LineString` feature with the route's
    /// distance, node count and flooded-segment count as properties, plus
    /// a top-level `metadata` member echoing the requested endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the feature cannot be assembled
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let geometry = Geometry::new(GeoJsonValue::from(&self.geometry));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "distance_meters": round_cm(self.distance_m),
                "nodes_count": self.nodes_count,
                "flooded_segments": self.flooded_segments,
            }
        });

        let feature =
            Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))?;

        let mut foreign_members = Map::new();
        foreign_members.insert(
            "metadata".to_string(),
            json!({
                "start": { "lat": self.start.lat(), "lon": self.start.lon() },
                "end": { "lat": self.end.lat(), "lon": self.end.lon() },
                "distance_meters": round_cm(self.distance_m),
                "status": "success",
            }),
        );

        Ok(FeatureCollection {
            features: vec![feature],
            bbox: None,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

/// Rounds to centimeter precision for reporting
fn round_cm(meters: f64) -> f64 {
    (meters * 100.0).round() / 100.0
}
