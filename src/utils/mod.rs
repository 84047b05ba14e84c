//! Utilities
//!
//! Cross-cutting helpers for output collection and process resource limits.

pub mod output;
pub mod rlimits;
