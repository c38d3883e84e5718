//! UI builder modules
//!
//! Contains modular builders for constructing the main application UI:
//! - Header bar creation
//! - Page construction
//! - Event handler wiring

pub mod handlers;
pub mod header;
pub mod pages;

pub use handlers::wire_up_handlers;
pub use header::build_header_bar;
pub use pages::{build_empty_state, build_pages};
