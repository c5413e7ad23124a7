use std::env;

use graphical_interface::config::AppConfig;
use logger::{Color, Logger};

/// Starts the map viewer.
///
/// # Usage
///
/// ```sh
/// cargo run -- [--country CC] [--bounded] [--extents PATH] [--log-dir DIR] [--zoom N]
/// ```
///
/// `MAP_LOG_DIR` and `MAP_EXTENTS` set the log directory and the extent table
/// when the matching argument is not given.
///
/// # Errors
///
/// The program returns an error if:
/// - An argument is unknown or holds an invalid value.
/// - The log directory cannot be created.
/// - The extent table cannot be read or contains an invalid row.
/// - The window cannot be opened.
fn main() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = AppConfig::parse(&args, |key| env::var(key).ok())?;

    let logger = Logger::new(&config.log_dir, &config.session)
        .map_err(|e| format!("Cannot start logging: {}", e))?;

    let table = config.load_extents().map_err(|e| {
        let _ = logger.error(&e.to_string(), true);
        e.to_string()
    })?;
    let _ = logger.info(
        &format!("Loaded {} country extents", table.len()),
        Color::Green,
        true,
    );

    graphical_interface::run(config, table, logger).map_err(|e| e.to_string())
}
