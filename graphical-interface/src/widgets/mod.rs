mod menu;
pub use menu::{status_text, WidgetMenu};
