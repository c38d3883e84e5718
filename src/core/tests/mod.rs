//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Observable property and binding tests
//! - Device entity tests (capabilities, LED modes, active profile)
//! - Device selection tests
//! - Mouse-map anchor parsing tests
//! - Resolution row, button-map and LED group model tests

#[cfg(test)]
mod selection_tests;
#[cfg(test)]
mod types_tests;
