use crate::analysis::{DisplayMatrix, InclusionReport, MatrixSummary};
use crate::problem::types::ProblemData;
use crate::verdict::VerdictMatrix;
use serde::Serialize;

/// Everything produced for a problem whose matrix was computed
#[derive(Clone, Debug, Serialize)]
pub struct ProblemReport {
    pub name: String,
    #[serde(skip)]
    pub problem: ProblemData,
    pub matrix: VerdictMatrix,
    pub display: DisplayMatrix,
    pub summary: MatrixSummary,
    pub inclusions: InclusionReport,
}

impl ProblemReport {
    pub fn has_bad(&self) -> bool {
        self.summary.bads > 0
    }
}

/// How checking one problem ended
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProblemOutcome {
    /// No supported validator source exists
    Skipped { name: String, searched: Vec<String> },
    /// The validator did not compile
    BuildFailed { name: String, stderr: String },
    /// Layout or workspace error, the problem could not be checked
    Failed { name: String, error: String },
    Checked(Box<ProblemReport>),
}

impl ProblemOutcome {
    pub fn name(&self) -> &str {
        match self {
            ProblemOutcome::Skipped { name, .. }
            | ProblemOutcome::BuildFailed { name, .. }
            | ProblemOutcome::Failed { name, .. } => name,
            ProblemOutcome::Checked(report) => &report.name,
        }
    }

    pub fn report(&self) -> Option<&ProblemReport> {
        match self {
            ProblemOutcome::Checked(report) => Some(report),
            _ => None,
        }
    }

    pub fn has_bad(&self) -> bool {
        self.report().is_some_and(ProblemReport::has_bad)
    }
}
