use std::path::PathBuf;

use chrono::Local;
use view_controller::{
    projection::MAX_ZOOM,
    types::{normalize_country_code, LatLon},
    ExtentTable, ViewError,
};

pub const USAGE: &str =
    "Usage: bounded-map [--country CC] [--bounded] [--extents PATH] [--log-dir DIR] [--zoom N]";

/// Overrides the directory log files are written to.
pub const LOG_DIR_VAR: &str = "MAP_LOG_DIR";
/// Overrides the country extent table with a CSV file.
pub const EXTENTS_VAR: &str = "MAP_EXTENTS";

// Geometric center of Poland.
const INITIAL_LAT: f64 = 52.11431;
const INITIAL_LON: f64 = 19.423672;
const INITIAL_ZOOM: u8 = 6;

/// Startup settings of the map viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub country: String,
    pub bounded: bool,
    pub extents_path: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub zoom: u8,
    pub center: LatLon,
    pub session: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            country: "PL".to_string(),
            bounded: false,
            extents_path: None,
            log_dir: PathBuf::from("logs"),
            zoom: INITIAL_ZOOM,
            center: LatLon::new(INITIAL_LAT, INITIAL_LON),
            session: Local::now().format("%Y%m%d_%H%M%S").to_string(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the defaults, then the environment (read
    /// through `lookup`), then the command line arguments (without the program
    /// name). Later sources win.
    ///
    /// # Errors
    /// A message including the usage line when an argument is unknown, misses
    /// its value or holds an invalid value.
    pub fn parse<F>(args: &[String], lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|dir| !dir.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(EXTENTS_VAR).filter(|path| !path.trim().is_empty()) {
            config.extents_path = Some(PathBuf::from(path));
        }

        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bounded" => config.bounded = true,
                "--country" => {
                    let value = next_value(&mut args, arg)?;
                    config.country =
                        normalize_country_code(value).map_err(|e| format!("{}\n{}", e, USAGE))?;
                }
                "--extents" => {
                    config.extents_path = Some(PathBuf::from(next_value(&mut args, arg)?));
                }
                "--log-dir" => {
                    config.log_dir = PathBuf::from(next_value(&mut args, arg)?);
                }
                "--zoom" => {
                    let value = next_value(&mut args, arg)?;
                    config.zoom = value
                        .parse::<u8>()
                        .ok()
                        .filter(|zoom| *zoom <= MAX_ZOOM)
                        .ok_or_else(|| {
                            format!("Invalid zoom '{}', expected 0-{}\n{}", value, MAX_ZOOM, USAGE)
                        })?;
                }
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("Unknown argument '{}'\n{}", other, USAGE)),
            }
        }

        Ok(config)
    }

    /// Loads the configured extent table, or the bundled one.
    pub fn load_extents(&self) -> Result<ExtentTable, ViewError> {
        match &self.extents_path {
            Some(path) => ExtentTable::from_path(path),
            None => ExtentTable::bundled(),
        }
    }
}

fn next_value<'a, I>(args: &mut I, flag: &str) -> Result<&'a String, String>
where
    I: Iterator<Item = &'a String>,
{
    args.next()
        .ok_or_else(|| format!("Missing value for {}\n{}", flag, USAGE))
}
