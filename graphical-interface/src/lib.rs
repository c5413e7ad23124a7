pub mod config;
mod map;
mod plugins;
pub mod surface;
mod widgets;
mod windows;

use config::AppConfig;
use logger::Logger;
use map::MapView;
use view_controller::ExtentTable;

const WINDOW_TITLE: &str = "Bounded Map";

/// Opens the map window and blocks until it is closed.
pub fn run(config: AppConfig, table: ExtentTable, logger: Logger) -> Result<(), eframe::Error> {
    eframe::run_native(
        WINDOW_TITLE,
        Default::default(),
        Box::new(move |cc| {
            Ok(Box::new(MapView::new(
                cc.egui_ctx.clone(),
                &config,
                table,
                logger,
            )))
        }),
    )
}
