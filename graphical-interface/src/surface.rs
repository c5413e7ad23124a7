use view_controller::{
    projection::{clamp_view, MAX_ZOOM, MIN_ZOOM},
    types::{LatLon, MapBounds, MapViewport, ScreenSize},
    MapSurface,
};
use walkers::{MapMemory, Position};

pub fn to_position(pos: LatLon) -> Position {
    Position::from_lat_lon(pos.lat, pos.lon)
}

pub fn to_lat_lon(pos: Position) -> LatLon {
    LatLon::new(pos.lat(), pos.lon())
}

/// [`MapSurface`] over the walkers map memory.
///
/// walkers has no panning limit of its own, so the limit is stored here and
/// enforced by [`clamp_to_bounds`] once per frame.
pub struct WalkersSurface<'a> {
    memory: &'a mut MapMemory,
    max_bounds: &'a mut Option<MapBounds>,
}

impl<'a> WalkersSurface<'a> {
    pub fn new(memory: &'a mut MapMemory, max_bounds: &'a mut Option<MapBounds>) -> Self {
        Self { memory, max_bounds }
    }
}

impl MapSurface for WalkersSurface<'_> {
    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.memory.center_at(to_position(center));
        let _ = self.memory.set_zoom(f64::from(zoom));
    }

    fn supports_max_bounds(&self) -> bool {
        true
    }

    fn set_max_bounds(&mut self, bounds: &MapBounds) {
        *self.max_bounds = Some(*bounds);
    }

    fn remove_max_bounds(&mut self) {
        *self.max_bounds = None;
    }
}

/// Moves the map back so that the `screen` sized area it shows stays inside
/// `bounds`. Returns whether the center had to move.
pub fn clamp_to_bounds(
    memory: &mut MapMemory,
    bounds: &MapBounds,
    home: LatLon,
    screen: ScreenSize,
) -> bool {
    let center = memory.detached().map(to_lat_lon).unwrap_or(home);
    match clamp_view(bounds, center, memory.zoom(), screen) {
        Some(clamped) => {
            memory.center_at(to_position(clamped));
            true
        }
        None => false,
    }
}

/// The viewport currently shown. `home` is where walkers centers the map
/// until the user drags it.
pub fn current_viewport(memory: &MapMemory, home: LatLon) -> MapViewport {
    let center = memory.detached().map(to_lat_lon).unwrap_or(home);
    let zoom = memory
        .zoom()
        .round()
        .clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM)) as u8;
    MapViewport::new(center, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_controller::projection::project_at;

    fn poland() -> MapBounds {
        MapBounds::new(49.00, 14.12, 54.84, 24.15)
    }

    fn home() -> LatLon {
        LatLon::new(52.11431, 19.423672)
    }

    fn screen() -> ScreenSize {
        ScreenSize::new(1024.0, 768.0)
    }

    fn memory_at(center: LatLon, zoom: f64) -> MapMemory {
        let mut memory = MapMemory::default();
        memory.set_zoom(zoom).unwrap();
        memory.center_at(to_position(center));
        memory
    }

    #[test]
    fn test_max_bounds_are_installed_and_removed() {
        let mut memory = MapMemory::default();
        let mut max_bounds = None;

        let mut surface = WalkersSurface::new(&mut memory, &mut max_bounds);
        assert!(surface.supports_max_bounds());
        surface.set_max_bounds(&poland());
        assert_eq!(max_bounds, Some(poland()));

        let mut surface = WalkersSurface::new(&mut memory, &mut max_bounds);
        surface.remove_max_bounds();
        assert_eq!(max_bounds, None);
    }

    #[test]
    fn test_set_view_moves_the_map() {
        let mut memory = MapMemory::default();
        let mut max_bounds = None;
        let warsaw = LatLon::new(52.2297, 21.0122);

        WalkersSurface::new(&mut memory, &mut max_bounds).set_view(warsaw, 11);

        let center = memory.detached().map(to_lat_lon).unwrap();
        assert!((center.lat - warsaw.lat).abs() < 1e-9);
        assert!((center.lon - warsaw.lon).abs() < 1e-9);
        assert_eq!(memory.zoom(), 11.0);
    }

    #[test]
    fn test_dragged_center_is_pulled_back() {
        let mut memory = memory_at(LatLon::new(52.0, 30.0), 10.0);

        assert!(clamp_to_bounds(&mut memory, &poland(), home(), screen()));
        let center = memory.detached().map(to_lat_lon).unwrap();
        assert!(poland().is_within_bounds(&center));
    }

    #[test]
    fn test_inner_center_is_left_alone() {
        let mut memory = memory_at(home(), 10.0);
        assert!(!clamp_to_bounds(&mut memory, &poland(), home(), screen()));

        let center = current_viewport(&memory, home()).center;
        assert!((center.lat - home().lat).abs() < 1e-9);
        assert!((center.lon - home().lon).abs() < 1e-9);
    }

    #[test]
    fn test_visible_map_stays_inside_extent() {
        let mut memory = memory_at(LatLon::new(52.0, 24.15), 10.0);

        assert!(clamp_to_bounds(&mut memory, &poland(), home(), screen()));

        let center = memory.detached().map(to_lat_lon).unwrap();
        let (cx, _) = project_at(center, 10.0);
        let (east, _) = project_at(LatLon::new(49.00, 24.15), 10.0);
        assert!(
            cx + 512.0 <= east + 1e-6,
            "Visible map extends {} px past the extent",
            cx + 512.0 - east
        );
        assert!(!clamp_to_bounds(&mut memory, &poland(), home(), screen()));
    }

    #[test]
    fn test_home_is_clamped_when_not_detached() {
        let mut memory = MapMemory::default();
        memory.set_zoom(10.0).unwrap();
        let outside = LatLon::new(48.0, 11.0);

        assert!(clamp_to_bounds(&mut memory, &poland(), outside, screen()));
        assert!(memory.detached().is_some());
    }

    #[test]
    fn test_current_viewport_defaults_to_home() {
        let mut memory = MapMemory::default();
        memory.set_zoom(6.0).unwrap();

        assert_eq!(
            current_viewport(&memory, home()),
            MapViewport::new(home(), 6)
        );
    }

    #[test]
    fn test_current_viewport_rounds_and_limits_zoom() {
        let mut memory = MapMemory::default();

        memory.set_zoom(7.6).unwrap();
        assert_eq!(current_viewport(&memory, home()).zoom, 8);

        memory.set_zoom(24.0).unwrap();
        assert_eq!(current_viewport(&memory, home()).zoom, MAX_ZOOM);
    }
}
