//! UI module tests
//!
//! The Controller holds every behaviour the window shows, so these run
//! without a display server.

#[cfg(test)]
mod controller_tests;
