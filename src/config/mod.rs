//! Configuration
//!
//! Checker settings, per-group test data configuration, and shared error types.

pub mod settings;
pub mod testdata;
pub mod types;
