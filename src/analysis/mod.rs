//! Analysis over a completed verdict matrix
//!
//! Pure functions: inclusion feasibility and the display/summary view.

pub mod inclusion;
pub mod summary;

pub use inclusion::{analyze, InclusionReport, MissedInclusion};
pub use summary::{CellMark, DisplayMatrix, MatrixSummary};
