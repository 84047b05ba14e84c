//! One problem, end to end.
//!
//! The validator is located and built first. A problem without a supported
//! validator source is skipped, and a failed build ends the problem without
//! touching its test data.

use crate::analysis::{analyze, DisplayMatrix, MatrixSummary};
use crate::config::settings::CheckerConfig;
use crate::config::types::{CheckError, Result};
use crate::core::types::{ProblemOutcome, ProblemReport};
use crate::exec::executor::{InputValidator, ValidatorRunner};
use crate::judge::build::prepare_validator;
use crate::judge::registry::{locate_validator, searched_paths};
use crate::observability::audit::events;
use crate::problem::discovery::problem_display_name;
use crate::problem::layout::load_problem_data;
use crate::safety::workspace::Workspace;
use crate::utils::output::OutputLimits;
use crate::verdict::{CellDiagnostic, MatrixBuilder};
use std::path::Path;

pub struct ProblemChecker {
    config: CheckerConfig,
}

impl ProblemChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Check the problem rooted at `problem_dir`
    pub fn check(&self, problem_dir: &Path) -> ProblemOutcome {
        let name = problem_display_name(problem_dir);
        events::problem_start(&name);

        let located = match locate_validator(problem_dir, &self.config.compiler) {
            Ok(Some(located)) => located,
            Ok(None) => {
                let searched = searched_paths(&self.config.compiler);
                events::problem_skipped(&name, "no input validator found");
                return ProblemOutcome::Skipped { name, searched };
            }
            Err(e) => return self.failed(name, e),
        };

        // The compiled binary lives here until the matrix is complete
        let workspace = match Workspace::new(&self.config.workspace_dir) {
            Ok(workspace) => workspace,
            Err(e) => return self.failed(name, e),
        };
        log::debug!("{}: building validator in workspace {}", name, workspace.run_id());

        let command = match prepare_validator(located.adapter.as_ref(), &located.source, &workspace)
        {
            Ok(command) => command,
            Err(CheckError::Build(stderr)) => {
                events::build_failed(&name, &stderr);
                return ProblemOutcome::BuildFailed { name, stderr };
            }
            Err(e) => return self.failed(name, e),
        };

        let runner = ValidatorRunner::new(
            command,
            self.config.validator_timeout(),
            OutputLimits::from(&self.config.capture),
        );

        match self.check_with_validator(problem_dir, &name, &runner) {
            Ok(report) => ProblemOutcome::Checked(Box::new(report)),
            Err(e) => self.failed(name, e),
        }
    }

    /// Fill and analyze the matrix using an already prepared validator
    pub fn check_with_validator(
        &self,
        problem_dir: &Path,
        name: &str,
        validator: &dyn InputValidator,
    ) -> Result<ProblemReport> {
        let problem = load_problem_data(problem_dir)?;
        log::info!(
            "{}: {} test cases, {} groups",
            name,
            problem.cases.len(),
            problem.groups.len()
        );

        let matrix = MatrixBuilder::new(validator)
            .with_max_parallel(self.config.max_parallel)
            .build(&problem);

        for (case, group, diagnostic) in matrix.diagnostics() {
            if let CellDiagnostic::Invocation { reason } = diagnostic {
                events::invocation_anomaly(name, case, group, reason);
            }
        }

        let display = DisplayMatrix::new(&matrix, &problem);
        let summary = MatrixSummary::from_display(&display);
        let inclusions = analyze(&matrix, &problem);
        events::problem_finished(name, summary.misses, summary.bads, summary.unknowns);

        Ok(ProblemReport {
            name: name.to_string(),
            problem,
            matrix,
            display,
            summary,
            inclusions,
        })
    }

    fn failed(&self, name: String, error: CheckError) -> ProblemOutcome {
        let error = error.to_string();
        events::problem_failed(&name, &error);
        ProblemOutcome::Failed { name, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::CompilerConfig;
    use crate::exec::executor::ValidatorOutcome;
    use crate::judge::registry::VALIDATOR_DIR;
    use crate::verdict::Verdict;
    use std::fs;
    use std::path::PathBuf;

    /// Accepts when the first input line is at most the `--max` flag
    struct MaxValidator;

    impl InputValidator for MaxValidator {
        fn validate(&self, input: &Path, flags: &[String]) -> Result<ValidatorOutcome> {
            let value: u64 = fs::read_to_string(input)?.trim().parse().unwrap_or(u64::MAX);
            let max: u64 = flags
                .iter()
                .position(|f| f == "--max")
                .and_then(|i| flags.get(i + 1))
                .and_then(|v| v.parse().ok())
                .unwrap_or(u64::MAX);
            Ok(ValidatorOutcome::exited(if value <= max { 42 } else { 43 }))
        }
    }

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn two_group_problem(root: &Path) {
        let secret = root.join("data/secret");
        write(secret.join("g1/testdata.yaml"), "input_validator_flags: --max 5\n");
        write(secret.join("g2/testdata.yaml"), "input_validator_flags: --max 10\n");
        write(secret.join("g1/1.in"), "3\n");
        write(secret.join("g2/2.in"), "7\n");
    }

    fn config_in(dir: &Path) -> CheckerConfig {
        CheckerConfig {
            workspace_dir: dir.join("workspaces"),
            ..CheckerConfig::default()
        }
    }

    #[test]
    fn test_check_with_validator_reports_inclusion() {
        let dir = tempfile::tempdir().unwrap();
        let problem = dir.path().join("contest/tiny");
        two_group_problem(&problem);

        let checker = ProblemChecker::new(config_in(dir.path()));
        let report = checker
            .check_with_validator(&problem, "contest/tiny", &MaxValidator)
            .unwrap();

        assert_eq!(report.matrix.verdict(0, 0), Verdict::OkYes);
        assert_eq!(report.matrix.verdict(0, 1), Verdict::Miss);
        assert_eq!(report.matrix.verdict(1, 0), Verdict::OkNo);
        assert_eq!(report.matrix.verdict(1, 1), Verdict::OkYes);
        assert_eq!(report.inclusions.targets_for("g1"), &["g2"]);
        assert!(report.inclusions.targets_for("g2").is_empty());
        assert_eq!(report.summary.misses, 1);
        assert!(!report.has_bad());
    }

    #[test]
    fn test_missing_validator_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let problem = dir.path().join("p");
        two_group_problem(&problem);

        let outcome = ProblemChecker::new(config_in(dir.path())).check(&problem);
        match outcome {
            ProblemOutcome::Skipped { searched, .. } => {
                assert!(searched.iter().any(|p| p.ends_with("validator.cpp")));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[test]
    fn test_build_failure_stops_the_problem() {
        let dir = tempfile::tempdir().unwrap();
        let problem = dir.path().join("p");
        two_group_problem(&problem);
        write(problem.join(VALIDATOR_DIR).join("validator.cpp"), "int main() {}\n");

        let mut config = config_in(dir.path());
        config.compiler = CompilerConfig {
            compiler: "/bin/sh".to_string(),
            compiler_args: vec!["-c".to_string(), "echo broken >&2; exit 1".to_string()],
        };
        match ProblemChecker::new(config).check(&problem) {
            ProblemOutcome::BuildFailed { stderr, .. } => assert!(stderr.contains("broken")),
            other => panic!("expected build failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let checker = ProblemChecker::new(config_in(dir.path()));
        assert!(checker
            .check_with_validator(dir.path(), "p", &MaxValidator)
            .is_err());
    }
}
