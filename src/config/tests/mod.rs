//! Settings tests
//!
//! Loading, parsing and atomic writing of the settings file.
