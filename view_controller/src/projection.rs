//! Spherical (web) Mercator math used to decide which zoom level fits an
//! extent, matching the tiling scheme of slippy maps.

use std::ops::RangeInclusive;

use crate::types::{LatLon, MapBounds, ScreenSize};

/// Side of a map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;
/// Lowest zoom level the controller will request.
pub const MIN_ZOOM: u8 = 0;
/// Highest zoom level the controller will request.
pub const MAX_ZOOM: u8 = 19;

const MAX_LATITUDE: f64 = 85.0511287798;
// Below this a pixel offset is float noise from projecting back and forth.
const PIXEL_EPSILON: f64 = 1e-6;

pub fn default_zoom_range() -> RangeInclusive<u8> {
    MIN_ZOOM..=MAX_ZOOM
}

/// Projects a position to global pixel coordinates at `zoom`, with the origin
/// at the north-west corner of the world and y growing southwards.
pub fn project(pos: LatLon, zoom: u8) -> (f64, f64) {
    project_at(pos, f64::from(zoom))
}

/// [`project`] for fractional zoom levels, as shown while the user zooms.
pub fn project_at(pos: LatLon, zoom: f64) -> (f64, f64) {
    let scale = world_size(zoom);
    let lat = pos.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = (pos.lon + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * scale;
    (x, y)
}

/// Inverse of [`project_at`].
pub fn unproject(x: f64, y: f64, zoom: f64) -> LatLon {
    let scale = world_size(zoom);
    let lon = x / scale * 360.0 - 180.0;
    let lat = (std::f64::consts::PI * (1.0 - 2.0 * y / scale))
        .sinh()
        .atan()
        .to_degrees();
    LatLon::new(lat, lon)
}

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2_f64.powf(zoom)
}

/// Whether the whole of `bounds` is visible on a `screen` sized map centered
/// on `center` at `zoom`.
pub fn fits(bounds: &MapBounds, center: LatLon, zoom: u8, screen: ScreenSize) -> bool {
    let (cx, cy) = project(center, zoom);
    let (west, north) = project(LatLon::new(bounds.max_lat, bounds.min_lon), zoom);
    let (east, south) = project(LatLon::new(bounds.min_lat, bounds.max_lon), zoom);

    let needed_width = 2.0 * (cx - west).max(east - cx);
    let needed_height = 2.0 * (cy - north).max(south - cy);

    needed_width <= f64::from(screen.width) && needed_height <= f64::from(screen.height)
}

/// Where to move the center of a `screen` sized map at `zoom` so that the
/// visible area stays inside `bounds`. Returns `None` when it already does.
///
/// The box is shrunk by half the visible span on each side and the center is
/// clamped into what remains. On an axis where the box is narrower than the
/// screen the center goes to the middle of the box instead.
pub fn clamp_view(
    bounds: &MapBounds,
    center: LatLon,
    zoom: f64,
    screen: ScreenSize,
) -> Option<LatLon> {
    let (cx, cy) = project_at(center, zoom);
    let (west, north) = project_at(LatLon::new(bounds.max_lat, bounds.min_lon), zoom);
    let (east, south) = project_at(LatLon::new(bounds.min_lat, bounds.max_lon), zoom);

    let x = clamp_axis(cx, west, east, f64::from(screen.width) / 2.0);
    let y = clamp_axis(cy, north, south, f64::from(screen.height) / 2.0);

    if (x - cx).abs() <= PIXEL_EPSILON && (y - cy).abs() <= PIXEL_EPSILON {
        return None;
    }
    Some(unproject(x, y, zoom))
}

fn clamp_axis(center: f64, low: f64, high: f64, half_span: f64) -> f64 {
    if high - low <= 2.0 * half_span {
        (low + high) / 2.0
    } else {
        center.clamp(low + half_span, high - half_span)
    }
}

/// The most zoomed-in level of `zoom_range` at which `bounds` still fits
/// around `center`.
///
/// The visible span halves with every zoom step, so the scan stops at the
/// first level that no longer fits. When not even the lowest level fits, the
/// lowest level is returned.
pub fn fit_zoom(
    bounds: &MapBounds,
    center: LatLon,
    screen: ScreenSize,
    zoom_range: &RangeInclusive<u8>,
) -> u8 {
    let mut best = *zoom_range.start();
    for zoom in zoom_range.clone() {
        if fits(bounds, center, zoom, screen) {
            best = zoom;
        } else {
            break;
        }
    }
    best
}
