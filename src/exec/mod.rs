//! Execution control
//!
//! Validator subprocess invocation behind the [`executor::InputValidator`] seam.

pub mod executor;
