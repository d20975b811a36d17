//! Wavescope CLI library.
//!
//! Command implementations and logging setup for the `wavescope` binary:
//! header inspection, plot-data export and test-tone generation.

pub mod commands;
pub mod logging;
