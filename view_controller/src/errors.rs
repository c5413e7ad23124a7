use std::fmt::{self, Display};

/// Enum representing the errors that can occur while editing the view state
/// or resolving country extents.
///
/// The possible errors are:
///
/// - `InvalidCode`: the country code is not exactly two alphabetic characters.
///   Recovered by rejecting the edit and keeping the previous state.
/// - `UnknownExtent`: the code is well formed but the extent table has no entry
///   for it. Recovered by falling back to the unbounded map.
/// - `ExtentTable`: the extent table could not be read or contains a bad row.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    InvalidCode(String),
    UnknownExtent(String),
    ExtentTable(String),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::InvalidCode(code) => write!(
                f,
                "[InvalidCode]: '{}' is not a two letter country code",
                code
            ),
            ViewError::UnknownExtent(code) => {
                write!(f, "[UnknownExtent]: No extent is known for '{}'", code)
            }
            ViewError::ExtentTable(msg) => write!(f, "[ExtentTable]: {}", msg),
        }
    }
}

impl std::error::Error for ViewError {}

impl From<csv::Error> for ViewError {
    fn from(err: csv::Error) -> Self {
        ViewError::ExtentTable(err.to_string())
    }
}
