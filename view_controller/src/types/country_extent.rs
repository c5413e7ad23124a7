use super::{LatLon, MapBounds};
use crate::errors::ViewError;

/// The bounding box of a country together with the point the map centers on
/// when it is bounded to that country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryExtent {
    pub country_code: String,
    pub name: String,
    pub bounds: MapBounds,
    pub center: LatLon,
}

impl CountryExtent {
    /// Creates an extent centered on the middle of its bounding box.
    pub fn new(country_code: &str, name: &str, bounds: MapBounds) -> Self {
        Self {
            country_code: country_code.to_string(),
            name: name.to_string(),
            center: bounds.center(),
            bounds,
        }
    }

    pub fn with_center(mut self, center: LatLon) -> Self {
        self.center = center;
        self
    }
}

/// Trims and upper-cases `code`, accepting only two ASCII letters.
///
/// # Errors
/// - `ViewError::InvalidCode` - If the normalized code is not exactly two
///   alphabetic characters.
pub fn normalize_country_code(code: &str) -> Result<String, ViewError> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() == 2 && normalized.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(normalized)
    } else {
        Err(ViewError::InvalidCode(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_accepts_lowercase_and_whitespace() {
        assert_eq!(normalize_country_code("pl"), Ok("PL".to_string()));
        assert_eq!(normalize_country_code(" De "), Ok("DE".to_string()));
    }

    #[test]
    fn test_normalize_rejects_malformed_codes() {
        for code in ["", "P", "POL", "P1", "1L", "  ", "Ł1", "ÓŁ"] {
            assert_eq!(
                normalize_country_code(code),
                Err(ViewError::InvalidCode(code.to_string())),
                "Expected '{}' to be rejected",
                code
            );
        }
    }

    #[test]
    fn test_extent_defaults_to_box_center() {
        let extent = CountryExtent::new("IS", "Iceland", MapBounds::new(63.0, -24.0, 67.0, -14.0));
        assert_eq!(extent.center, LatLon::new(65.0, -19.0));
    }
}
