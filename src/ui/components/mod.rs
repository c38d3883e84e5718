//! UI Components
//!
//! Reusable GTK4 widgets for the mouse configuration window.
//!
//! # Components
//!
//! - `mouse_map.rs` - Panel placing widgets at named anchors
//! - `resolution_row.rs` - Expandable resolution editor row
//! - `button_map_button.rs` - Button mapping button and its modal dialog
//! - `led_button_group.rs` - LED mode selectors
//! - `status_banner.rs` - Diagnostic / result banner

mod button_map_button;
mod led_button_group;
mod mouse_map;
mod resolution_row;
mod status_banner;

pub use button_map_button::{ButtonMapButton, ButtonMapDialog};
pub use led_button_group::LedButtonGroup;
pub use mouse_map::MouseMap;
pub use resolution_row::ResolutionRow;
pub use status_banner::StatusBanner;
