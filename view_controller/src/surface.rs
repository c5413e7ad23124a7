use crate::types::{LatLon, MapBounds};

/// The minimal set of capabilities the controller needs from a map widget.
///
/// Only `set_view` is required. Surfaces able to limit panning report it
/// through `supports_max_bounds` and implement the two bound methods.
pub trait MapSurface {
    fn set_view(&mut self, center: LatLon, zoom: u8);

    fn supports_max_bounds(&self) -> bool {
        false
    }

    fn set_max_bounds(&mut self, _bounds: &MapBounds) {}

    fn remove_max_bounds(&mut self) {}
}
