use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ViewError;
use crate::types::{normalize_country_code, CountryExtent, LatLon, MapBounds};

const BUNDLED_EXTENTS: &str = include_str!("../assets/country_extents.csv");

#[derive(Debug, Deserialize)]
struct ExtentRecord {
    code: String,
    name: String,
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
    center_lat: Option<f64>,
    center_lon: Option<f64>,
}

impl ExtentRecord {
    fn into_extent(self) -> Result<CountryExtent, ViewError> {
        let code = normalize_country_code(&self.code)?;
        let bounds = MapBounds::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon);
        if !bounds.is_valid() {
            return Err(ViewError::ExtentTable(format!(
                "Invalid bounding box for {}",
                code
            )));
        }

        let extent = CountryExtent::new(&code, self.name.trim(), bounds);
        match (self.center_lat, self.center_lon) {
            (Some(lat), Some(lon)) => {
                let center = LatLon::new(lat, lon);
                if !bounds.is_within_bounds(&center) {
                    return Err(ViewError::ExtentTable(format!(
                        "Center of {} lies outside its bounding box",
                        code
                    )));
                }
                Ok(extent.with_center(center))
            }
            (None, None) => Ok(extent),
            _ => Err(ViewError::ExtentTable(format!(
                "Incomplete center for {}",
                code
            ))),
        }
    }
}

/// Read-only lookup of country extents keyed by upper-case alpha-2 code.
///
/// The table is loaded once when the application starts, either from the
/// CSV bundled in the binary or from a file with the same columns:
/// `code,name,min_lat,min_lon,max_lat,max_lon,center_lat,center_lon`.
/// The two center columns may be left empty.
#[derive(Debug, Clone)]
pub struct ExtentTable {
    extents: HashMap<String, CountryExtent>,
}

impl ExtentTable {
    /// Builds a table from already constructed extents.
    ///
    /// # Errors
    /// - `ViewError::InvalidCode` - If an extent carries a malformed code.
    /// - `ViewError::ExtentTable` - If two extents share a code.
    pub fn new(extents: Vec<CountryExtent>) -> Result<Self, ViewError> {
        let mut table = HashMap::new();
        for mut extent in extents {
            let code = normalize_country_code(&extent.country_code)?;
            extent.country_code = code.clone();
            if table.insert(code.clone(), extent).is_some() {
                return Err(ViewError::ExtentTable(format!(
                    "Duplicated country code {}",
                    code
                )));
            }
        }
        Ok(Self { extents: table })
    }

    /// The table compiled into the binary.
    pub fn bundled() -> Result<Self, ViewError> {
        Self::from_reader(BUNDLED_EXTENTS.as_bytes())
    }

    /// Loads a table from a CSV file on disk.
    pub fn from_path(path: &Path) -> Result<Self, ViewError> {
        let file = File::open(path).map_err(|e| {
            ViewError::ExtentTable(format!("Cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    /// Parses CSV rows (with a header line) into a table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ViewError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut extents = Vec::new();
        for record in csv_reader.deserialize::<ExtentRecord>() {
            extents.push(record?.into_extent()?);
        }
        Self::new(extents)
    }

    /// Pure lookup of the extent for `code`. The code is normalized first, so
    /// `"pl"` and `"PL"` resolve to the same entry; anything that is not a
    /// two letter code resolves to nothing.
    pub fn resolve_extent(&self, code: &str) -> Option<&CountryExtent> {
        normalize_country_code(code)
            .ok()
            .and_then(|code| self.extents.get(&code))
    }

    /// Same lookup as [`ExtentTable::resolve_extent`], reporting why it failed.
    pub fn try_resolve(&self, code: &str) -> Result<&CountryExtent, ViewError> {
        let normalized = normalize_country_code(code)?;
        self.extents
            .get(&normalized)
            .ok_or(ViewError::UnknownExtent(normalized))
    }

    /// Known codes in alphabetical order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.extents.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }
}
