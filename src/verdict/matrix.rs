//! Verdict matrix construction.
//!
//! Rows are processed one at a time. Within a row every group is classified
//! concurrently by a bounded set of scoped workers fed from a channel, and
//! the row is joined before the next one starts, so at most
//! `min(groups, max_parallel)` validator processes are alive at once.

use crate::exec::executor::InputValidator;
use crate::problem::types::{Group, ProblemData, TestCase};
use crate::verdict::verdict::{CellDiagnostic, CellOutcome, Verdict, VerdictClassifier};
use serde::Serialize;
use std::thread;

/// Complete (test case × group) verdict table
#[derive(Clone, Debug, Serialize)]
pub struct VerdictMatrix {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<CellOutcome>>,
}

impl VerdictMatrix {
    /// Assemble a matrix; every row must have one cell per column
    pub fn new(rows: Vec<String>, columns: Vec<String>, cells: Vec<Vec<CellOutcome>>) -> Self {
        debug_assert_eq!(rows.len(), cells.len());
        debug_assert!(cells.iter().all(|row| row.len() == columns.len()));
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn verdict(&self, row: usize, column: usize) -> Verdict {
        self.cells[row][column].verdict
    }

    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Verdicts of one row in column order
    pub fn row_verdicts(&self, row: usize) -> impl Iterator<Item = Verdict> + '_ {
        self.cells[row].iter().map(|cell| cell.verdict)
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.verdict == verdict)
            .count()
    }

    pub fn total_checks(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    /// Every attached diagnostic as (test case, group, detail), in table order
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, &str, &CellDiagnostic)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.diagnostic
                    .as_ref()
                    .map(|d| (self.rows[r].as_str(), self.columns[c].as_str(), d))
            })
        })
    }
}

/// Builds a [`VerdictMatrix`] by running the validator for every cell
pub struct MatrixBuilder<'a> {
    validator: &'a dyn InputValidator,
    max_parallel: Option<usize>,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(validator: &'a dyn InputValidator) -> Self {
        Self {
            validator,
            max_parallel: None,
        }
    }

    /// Lower the per-row concurrency below the group count
    pub fn with_max_parallel(mut self, max_parallel: Option<usize>) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    fn workers_for(&self, groups: usize) -> usize {
        self.max_parallel.unwrap_or(groups).clamp(1, groups.max(1))
    }

    pub fn build(&self, problem: &ProblemData) -> VerdictMatrix {
        let cells = problem
            .cases
            .iter()
            .map(|case| self.build_row(case, &problem.groups))
            .collect();

        VerdictMatrix::new(
            problem.cases.iter().map(|c| c.name.clone()).collect(),
            problem.groups.iter().map(|g| g.name.clone()).collect(),
            cells,
        )
    }

    /// Fan out one case over all groups, then join in column order
    pub fn build_row(&self, case: &TestCase, groups: &[Group]) -> Vec<CellOutcome> {
        if groups.is_empty() {
            return Vec::new();
        }

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<usize>();
        for index in 0..groups.len() {
            let _ = job_tx.send(index);
        }
        drop(job_tx);

        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, CellOutcome)>();
        let workers = self.workers_for(groups.len());
        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for index in job_rx.iter() {
                        let outcome =
                            VerdictClassifier::classify(self.validator, case, &groups[index]);
                        if result_tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut slots: Vec<Option<CellOutcome>> = vec![None; groups.len()];
        for (index, outcome) in result_rx.iter() {
            slots[index] = Some(outcome);
        }

        let row: Vec<CellOutcome> = slots
            .into_iter()
            .zip(groups)
            .map(|(slot, group)| {
                slot.unwrap_or_else(|| {
                    CellOutcome::unknown(format!("no result recorded for group {}", group.name))
                })
            })
            .collect();
        log::debug!(
            "{}: {}",
            case.name,
            row.iter()
                .map(|cell| cell.verdict.label())
                .collect::<Vec<_>>()
                .join(" ")
        );
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Result;
    use crate::exec::executor::ValidatorOutcome;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Accepts an input whose file name appears in the flags; tracks concurrency
    struct ListValidator {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ListValidator {
        fn new() -> Self {
            Self {
                active: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    impl InputValidator for ListValidator {
        fn validate(&self, input: &Path, flags: &[String]) -> Result<ValidatorOutcome> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            // Later columns finish first to shake out ordering bugs
            let delay = 5 * (4 - flags.len().min(4)) as u64;
            thread::sleep(Duration::from_millis(delay));
            self.active.fetch_sub(1, Ordering::SeqCst);

            let name = input.to_string_lossy();
            let code = if flags.iter().any(|f| *f == name) { 42 } else { 0 };
            Ok(ValidatorOutcome::exited(code))
        }
    }

    fn case(name: &str, groups: &[&str]) -> TestCase {
        TestCase {
            name: name.to_string(),
            input: PathBuf::from(name),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn problem() -> ProblemData {
        ProblemData::new(
            PathBuf::from("p"),
            vec![case("1.in", &["g1"]), case("2.in", &["g2"]), case("a.in", &["g3"])],
            vec![
                Group::new("g1", "1.in"),
                Group::new("g2", "1.in 2.in"),
                Group::new("g3", "x y z"),
            ],
        )
    }

    #[test]
    fn test_matrix_is_total_and_ordered() {
        let validator = ListValidator::new();
        let matrix = MatrixBuilder::new(&validator).build(&problem());

        assert_eq!(matrix.rows(), &["1.in", "2.in", "a.in"]);
        assert_eq!(matrix.columns(), &["g1", "g2", "g3"]);
        assert_eq!(matrix.total_checks(), 9);

        use Verdict::*;
        assert_eq!(matrix.row_verdicts(0).collect::<Vec<_>>(), vec![OkYes, Miss, OkNo]);
        assert_eq!(matrix.row_verdicts(1).collect::<Vec<_>>(), vec![OkNo, OkYes, OkNo]);
        assert_eq!(matrix.row_verdicts(2).collect::<Vec<_>>(), vec![OkNo, OkNo, Bad]);
        assert_eq!(matrix.count(Bad), 1);
    }

    #[test]
    fn test_diagnostics_follow_table_order() {
        let validator = ListValidator::new();
        let matrix = MatrixBuilder::new(&validator).build(&problem());
        let diagnostics: Vec<_> = matrix.diagnostics().map(|(case, group, _)| (case, group)).collect();
        assert_eq!(diagnostics, vec![("a.in", "g3")]);
    }

    #[test]
    fn test_parallelism_is_bounded() {
        let validator = ListValidator::new();
        let builder = MatrixBuilder::new(&validator).with_max_parallel(Some(2));
        builder.build(&problem());
        assert!(validator.peak.load(Ordering::SeqCst) <= 2);

        let validator = ListValidator::new();
        MatrixBuilder::new(&validator).build(&problem());
        assert!(validator.peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let validator = ListValidator::new();
        let first = MatrixBuilder::new(&validator).build(&problem());
        let second = MatrixBuilder::new(&validator)
            .with_max_parallel(Some(1))
            .build(&problem());
        for row in 0..first.rows().len() {
            assert_eq!(
                first.row_verdicts(row).collect::<Vec<_>>(),
                second.row_verdicts(row).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_no_groups_yields_empty_rows() {
        let validator = ListValidator::new();
        let problem = ProblemData::new(PathBuf::from("p"), vec![case("1.in", &[])], vec![]);
        let matrix = MatrixBuilder::new(&validator).build(&problem);
        assert_eq!(matrix.total_checks(), 0);
        assert_eq!(matrix.rows(), &["1.in"]);
    }
}
