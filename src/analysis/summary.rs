//! Display marks and miss/bad accounting.
//!
//! Sample inputs are a deliberately loose category, so a `MISS` that involves
//! sample (in the `sample` column, or in the row of a sample case under any
//! other group) is shown as `SKIP` and left out of the miss count.

use crate::problem::types::ProblemData;
use crate::verdict::{Verdict, VerdictMatrix};
use serde::Serialize;
use std::collections::HashSet;

pub const SKIP_LABEL: &str = "SKIP";

/// What the table shows for one cell
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum CellMark {
    Verdict(Verdict),
    Skipped,
}

impl CellMark {
    pub fn label(self) -> &'static str {
        match self {
            CellMark::Verdict(verdict) => verdict.label(),
            CellMark::Skipped => SKIP_LABEL,
        }
    }
}

/// Matrix with the sample downgrade applied
#[derive(Clone, Debug, Serialize)]
pub struct DisplayMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub marks: Vec<Vec<CellMark>>,
}

impl DisplayMatrix {
    pub fn new(matrix: &VerdictMatrix, problem: &ProblemData) -> Self {
        let sample_rows: HashSet<&str> = problem
            .cases
            .iter()
            .filter(|case| case.is_sample())
            .map(|case| case.name.as_str())
            .collect();
        let sample_columns: Vec<bool> = matrix
            .columns()
            .iter()
            .map(|name| problem.group(name).is_some_and(|g| g.is_sample()))
            .collect();

        let marks = matrix
            .rows()
            .iter()
            .enumerate()
            .map(|(row, name)| {
                let sample_row = sample_rows.contains(name.as_str());
                matrix
                    .row_verdicts(row)
                    .zip(&sample_columns)
                    .map(|(verdict, &sample_column)| {
                        if verdict == Verdict::Miss && (sample_column || sample_row) {
                            CellMark::Skipped
                        } else {
                            CellMark::Verdict(verdict)
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: matrix.rows().to_vec(),
            columns: matrix.columns().to_vec(),
            marks,
        }
    }

    pub fn count(&self, mark: CellMark) -> usize {
        self.marks.iter().flatten().filter(|&&m| m == mark).count()
    }
}

/// Headline numbers for one problem
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct MatrixSummary {
    pub checks: usize,
    pub misses: usize,
    pub bads: usize,
    pub unknowns: usize,
    pub skipped: usize,
}

impl MatrixSummary {
    pub fn from_display(display: &DisplayMatrix) -> Self {
        Self {
            checks: display.rows.len() * display.columns.len(),
            misses: display.count(CellMark::Verdict(Verdict::Miss)),
            bads: display.count(CellMark::Verdict(Verdict::Bad)),
            unknowns: display.count(CellMark::Verdict(Verdict::Unknown)),
            skipped: display.count(CellMark::Skipped),
        }
    }

    /// Misses as a percentage of all checks
    pub fn miss_percentage(&self) -> f64 {
        if self.checks == 0 {
            0.0
        } else {
            self.misses as f64 / self.checks as f64 * 100.0
        }
    }
}
