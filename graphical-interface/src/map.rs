use egui::Context;
use egui_extras::install_image_loaders;
use logger::{Color, Logger};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Tiles};

use view_controller::{
    types::{LatLon, MapBounds, MapViewport, ScreenSize},
    BoundedViewController, ExtentTable, ViewState, ViewStateStore,
};

use crate::{
    config::AppConfig,
    plugins::ExtentOutline,
    surface::{clamp_to_bounds, current_viewport, to_position, WalkersSurface},
    widgets::WidgetMenu,
    windows,
};

const MENU_WIDTH: f32 = 180.0;

/// The root of the application: the map surface with the menu beside it.
///
/// `MapView` owns the view state store and hands it to both the menu (for
/// editing) and the bounded-view controller (through its subscription).
pub struct MapView {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    max_bounds: Option<MapBounds>,
    home: LatLon,
    store: ViewStateStore,
    controller: BoundedViewController,
    menu: WidgetMenu,
    logger: Logger,
}

impl MapView {
    /// Creates the map view, starting from the country and bounded flag of
    /// `config`.
    pub fn new(egui_ctx: Context, config: &AppConfig, table: ExtentTable, logger: Logger) -> Self {
        install_image_loaders(&egui_ctx);

        let mut map_memory = MapMemory::default();
        if map_memory.set_zoom(f64::from(config.zoom)).is_err() {
            let _ = logger.warn(&format!("Zoom {} rejected by the map", config.zoom), true);
        }

        let store = ViewStateStore::with_state(ViewState {
            is_bounded: config.bounded,
            country_code: config.country.clone(),
        });

        let mut controller =
            BoundedViewController::new(table, MapViewport::new(config.center, config.zoom))
                .with_logger(logger.clone());
        controller.attach(&store);

        let _ = logger.info(
            &format!(
                "Map view ready at ({:.5}, {:.5}), zoom {}, country {}{}",
                config.center.lat,
                config.center.lon,
                config.zoom,
                config.country,
                if config.bounded { ", bounded" } else { "" }
            ),
            Color::Green,
            true,
        );

        Self {
            tiles: Box::new(HttpTiles::with_options(
                walkers::sources::OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            )),
            map_memory,
            max_bounds: None,
            home: config.center,
            menu: WidgetMenu::new(&store),
            store,
            controller,
            logger,
        }
    }
}

impl eframe::App for MapView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let chosen_city = egui::SidePanel::right("menu")
            .exact_width(MENU_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                self.menu
                    .show(ui, &mut self.store, self.controller.state())
            })
            .inner;

        if let Some(city) = chosen_city {
            let mut surface = WalkersSurface::new(&mut self.map_memory, &mut self.max_bounds);
            self.controller.focus(&city, &mut surface);
        }

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let size = ui.available_size();
                let screen = ScreenSize::new(size.x, size.y);
                self.controller.set_screen_size(screen);
                self.controller
                    .observe_viewport(current_viewport(&self.map_memory, self.home));

                {
                    let mut surface =
                        WalkersSurface::new(&mut self.map_memory, &mut self.max_bounds);
                    self.controller.apply_pending(&mut surface);
                }

                if let Some(bounds) = &self.max_bounds {
                    if clamp_to_bounds(&mut self.map_memory, bounds, self.home, screen) {
                        let _ = self.logger.debug("Map pulled back inside the extent");
                    }
                }

                let tiles = self.tiles.as_mut();
                let mut map = Map::new(Some(tiles), &mut self.map_memory, to_position(self.home));
                if let Some(extent) = self.controller.state().extent() {
                    map = map.with_plugin(ExtentOutline::new(extent));
                }
                ui.add(map);

                windows::zoom(ui, &mut self.map_memory);
            });
    }
}
