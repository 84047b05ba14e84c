//! Safety & Cleanup
//!
//! Run-scoped artifact isolation for validator builds.

pub mod workspace;
