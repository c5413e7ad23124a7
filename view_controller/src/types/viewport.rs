use super::LatLon;

/// The map's visible center and integer zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: LatLon,
    pub zoom: u8,
}

impl MapViewport {
    pub fn new(center: LatLon, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

/// Pixel size of the area the map is drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}
