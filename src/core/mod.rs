//! Per-problem check pipeline.
//!
//! Core owns the order of operations for one problem: locate and build the
//! validator, load the test data layout, fill the verdict matrix and run the
//! inclusion analysis. Rendering lives in `report`.

pub mod checker;
pub mod types;

pub use checker::ProblemChecker;
pub use types::{ProblemOutcome, ProblemReport};
