//! Verdict classification
//!
//! Derives one verdict per (test case, group) cell and assembles the matrix.

pub mod matrix;
pub mod verdict;

pub use matrix::{MatrixBuilder, VerdictMatrix};
pub use verdict::{CellDiagnostic, CellOutcome, Verdict, VerdictClassifier};
