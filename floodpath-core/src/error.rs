use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Coordinate out of bounds: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
    #[error("No route exists between the requested locations")]
    NoRoute,
    #[error("Road network is empty or not loaded")]
    EmptyNetwork,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
