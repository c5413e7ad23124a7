use super::LatLon;

/// Zoom level used when the map is focused on a single city.
pub const CITY_ZOOM: u8 = 11;

/// A named place the menu offers as a shortcut for re-centering the map.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub position: LatLon,
}

impl City {
    pub fn new(name: &str, lat: f64, lon: f64) -> Self {
        Self {
            name: name.to_string(),
            position: LatLon::new(lat, lon),
        }
    }
}

/// Cities listed in the menu, in display order.
pub fn preset_cities() -> Vec<City> {
    vec![
        City::new("Gdynia", 54.5189, 18.5305),
        City::new("Warsaw", 52.2297, 21.0122),
        City::new("Kraków", 50.0647, 19.9450),
        City::new("Aachen", 50.7597, 6.0967),
        City::new("Stuttgart", 48.7784, 9.1742),
    ]
}
