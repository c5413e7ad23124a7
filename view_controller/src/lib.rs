//! View state and bounded-map logic for the map viewer.
//!
//! The menu edits a [`ViewStateStore`]; a [`BoundedViewController`] subscribed
//! to it turns the state into viewport requests on any [`MapSurface`],
//! limiting the map to a country's extent while bounded mode is on.

pub mod controller;
pub mod errors;
pub mod extent_table;
pub mod projection;
pub mod state;
pub mod surface;
pub mod types;

pub use controller::{compute_target_viewport, BoundedViewController, ControllerState};
pub use errors::ViewError;
pub use extent_table::ExtentTable;
pub use state::{Subscription, ViewState, ViewStateStore};
pub use surface::MapSurface;
