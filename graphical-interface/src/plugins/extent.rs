use egui::{Color32, Rect, Response, Stroke};
use walkers::{Plugin, Projector};

use view_controller::types::{CountryExtent, LatLon};

use crate::surface::to_position;

const OUTLINE_COLOR: Color32 = Color32::from_rgb(220, 60, 60);

/// Draws the bounding box of the country the map is limited to.
pub struct ExtentOutline<'a> {
    extent: &'a CountryExtent,
}

impl<'a> ExtentOutline<'a> {
    pub fn new(extent: &'a CountryExtent) -> Self {
        Self { extent }
    }
}

impl Plugin for ExtentOutline<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        let bounds = &self.extent.bounds;
        let north_west = projector.project(to_position(LatLon::new(bounds.max_lat, bounds.min_lon)));
        let south_east = projector.project(to_position(LatLon::new(bounds.min_lat, bounds.max_lon)));

        let rect = Rect::from_two_pos(north_west.to_pos2(), south_east.to_pos2());
        ui.painter()
            .rect_stroke(rect, 0.0, Stroke::new(2.0, OUTLINE_COLOR));

        let center = projector.project(to_position(self.extent.center));
        ui.painter()
            .circle_filled(center.to_pos2(), 4.0, OUTLINE_COLOR);
    }
}
