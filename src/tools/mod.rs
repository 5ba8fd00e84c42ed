//! The tools module provides helpers around the codec.
//!
//! The tools are:
//! - cli: Command line options for the demo driver.
//! - freq_count: Frequency table tabulation with overflow rollback.
//!
pub mod cli;
pub mod freq_count;
