use geo::Point;

use crate::Error;

/// Geographic coordinate in degrees, validated on construction
///
/// Keeps latitude and longitude apart by name so they cannot be swapped
/// silently: user input arrives as `lat, lon`, while all `GeoJSON`
/// geometry is `lon, lat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Creates a coordinate after checking geographic bounds
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCoordinate` if either component is
    /// non-finite or outside the valid range (|lat| <= 90, |lon| <= 180).
    pub fn new(lat: f64, lon: f64) -> Result<Self, Error> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(Error::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(self) -> f64 {
        self.lon
    }

    /// Point in lon-lat axis order, matching the `GeoJSON` convention
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_bounds() {
        assert!(Coordinate::new(52.4, 16.9).is_ok());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
        assert!(Coordinate::new(90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_bounds() {
        assert!(matches!(
            Coordinate::new(91.0, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            Coordinate::new(0.0, 181.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn point_uses_lon_lat_order() {
        let coord = Coordinate::new(52.4, 16.9).unwrap();
        let point = coord.to_point();
        assert_eq!(point.x(), 16.9);
        assert_eq!(point.y(), 52.4);
    }
}
