use crate::config::settings::CheckerConfig;
use crate::core::{ProblemChecker, ProblemOutcome};
use crate::problem::discovery::discover_problems;
use crate::report::{OutputStyle, ReportPrinter};
use crate::utils::rlimits::raise_validator_limits;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CliMode {
    /// Every problem found under a directory
    Tree,
    /// Exactly one problem directory
    Single,
}

impl CliMode {
    fn primary_binary(self) -> &'static str {
        match self {
            Self::Tree => "check-inclusion",
            Self::Single => "standalone-inclusion",
        }
    }
}

/// Options shared by both binaries
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct CommonArgs {
    /// Optimize output formatting for Markdown (otherwise console)
    #[arg(long)]
    pub target_markdown: bool,
    /// Per-invocation validator timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
    /// Maximum concurrent validator processes per test case
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,
    /// JSON checker configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Exit 0 even when BAD verdicts were found
    #[arg(long)]
    pub no_fail_on_bad: bool,
}

impl CommonArgs {
    /// File configuration (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<CheckerConfig> {
        let mut config = match &self.config {
            Some(path) => CheckerConfig::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CheckerConfig::default(),
        };
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        if self.jobs.is_some() {
            config.max_parallel = self.jobs;
        }
        if self.no_fail_on_bad {
            config.fail_on_bad = false;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Report test cases that could also be included in additional groups"
)]
struct TreeCli {
    #[command(flatten)]
    common: CommonArgs,
    /// Directory to process
    #[arg(default_value = ".")]
    directory: PathBuf,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check one problem for test cases that could be included in additional groups"
)]
struct SingleCli {
    #[command(flatten)]
    common: CommonArgs,
    /// Problem directory
    problem: PathBuf,
}

/// Parsed invocation, independent of which binary produced it
#[derive(Debug)]
struct Invocation {
    common: CommonArgs,
    problems: Vec<PathBuf>,
}

fn parse_invocation(mode: CliMode) -> Result<Invocation> {
    match mode {
        CliMode::Tree => {
            let cli = TreeCli::parse();
            let problems = discover_problems(&cli.directory)?;
            Ok(Invocation {
                common: cli.common,
                problems,
            })
        }
        CliMode::Single => {
            let cli = SingleCli::parse();
            Ok(Invocation {
                common: cli.common,
                problems: vec![cli.problem],
            })
        }
    }
}

/// Check every problem in order, printing as each finishes
///
/// Returns true when any checked problem has a BAD verdict.
pub fn check_problems<W: Write>(
    checker: &ProblemChecker,
    problems: &[PathBuf],
    printer: &mut ReportPrinter<W>,
) -> Result<bool> {
    printer.announce(problems.len())?;
    let mut any_bad = false;
    for (index, problem) in problems.iter().enumerate() {
        let name = crate::problem::discovery::problem_display_name(problem);
        printer.problem_heading(index + 1, problems.len(), &name)?;
        let outcome = checker.check(problem);
        if let ProblemOutcome::Failed { error, .. } = &outcome {
            log::warn!("{}: {}", name, error);
        }
        any_bad |= outcome.has_bad();
        printer.outcome(&outcome)?;
    }
    Ok(any_bad)
}

pub fn run(mode: CliMode) -> Result<()> {
    env_logger::init();

    let invocation = parse_invocation(mode)?;
    let config = invocation.common.resolve_config()?;
    log::debug!("{} config: {:?}", mode.primary_binary(), config);

    // Validators commonly recurse deeply on large inputs
    raise_validator_limits();

    let style = OutputStyle::from_markdown_flag(invocation.common.target_markdown);
    let fail_on_bad = config.fail_on_bad;
    let checker = ProblemChecker::new(config);

    let stdout = std::io::stdout();
    let mut printer = ReportPrinter::new(stdout.lock(), style);
    let any_bad = check_problems(&checker, &invocation.problems, &mut printer)?;
    printer.into_inner().flush()?;

    if any_bad && fail_on_bad {
        log::info!("BAD verdicts found, exiting with status 1");
        std::process::exit(1);
    }
    Ok(())
}
