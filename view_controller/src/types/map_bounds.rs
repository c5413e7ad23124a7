use super::LatLon;

/// Represents a geographical bounding box, defined by minimum and maximum
/// latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl MapBounds {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Checks whether a given position is within the bounds.
    pub fn is_within_bounds(&self, pos: &LatLon) -> bool {
        pos.lat >= self.min_lat
            && pos.lat <= self.max_lat
            && pos.lon >= self.min_lon
            && pos.lon <= self.max_lon
    }

    /// Center of the box in degrees.
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Returns the position inside the bounds closest to `pos`.
    pub fn clamp(&self, pos: LatLon) -> LatLon {
        LatLon::new(
            pos.lat.clamp(self.min_lat, self.max_lat),
            pos.lon.clamp(self.min_lon, self.max_lon),
        )
    }

    /// The corners must be ordered and inside the valid coordinate range.
    pub fn is_valid(&self) -> bool {
        self.min_lat <= self.max_lat
            && self.min_lon <= self.max_lon
            && LatLon::new(self.min_lat, self.min_lon).is_valid()
            && LatLon::new(self.max_lat, self.max_lon).is_valid()
    }
}
