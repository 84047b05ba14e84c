//! Problem discovery
//!
//! Locates problem directories and reads their test data layout into
//! immutable values that the checker passes around explicitly.

pub mod discovery;
pub mod layout;
pub mod ordering;
pub mod types;
