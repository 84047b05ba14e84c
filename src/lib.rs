//! subtask-inclusion: finds test cases that could also belong to other groups
//!
//! Every test input of a problem is run through the problem's input validator
//! once per test group, with that group's validator flags. Comparing what the
//! validator accepts against where each case is declared shows which groups
//! could absorb the cases of another group.
//!
//! # Architecture
//!
//! ## Problem Layout ([`problem`])
//! - [`problem::discovery`]: Finding problem roots by their `problem.yaml`
//! - [`problem::layout`]: Groups, test cases and flags under `data/`
//! - [`problem::ordering`]: Numeric-aware test case order
//!
//! ## Validator Build ([`judge`])
//! - [`judge::registry`]: Locating the validator source and its adapter
//! - [`judge::build`]: Compiling into a run-scoped workspace
//!
//! ## Execution ([`exec`])
//! - [`exec::executor`]: One validator invocation with timeout and capture
//!
//! ## Verdicts & Analysis ([`verdict`], [`analysis`])
//! - [`verdict::verdict`]: Per-cell classification
//! - [`verdict::matrix`]: Row-by-row bounded fan-out over groups
//! - [`analysis::inclusion`]: Inclusion feasibility
//! - [`analysis::summary`]: Sample downgrade and headline counts
//!
//! ## Pipeline & Output ([`core`], [`report`])
//! - [`core::checker`]: One problem end to end
//! - [`report::printer`]: Console or Markdown report
//!
//! ## Support
//! - [`config`]: Checker settings, `testdata.yaml`, error types
//! - [`safety::workspace`]: Run-scoped build directories
//! - [`observability::audit`]: Structured check events
//! - [`utils`]: Bounded output collection, resource limits

// Problem layout
pub mod problem;

// Execution Control
pub mod exec;

// Per-problem pipeline
pub mod core;

// Validator adapters (language-specific build/run)
pub mod judge;

// Verdict classification
pub mod verdict;

// Inclusion analysis
pub mod analysis;

// Report rendering
pub mod report;

// Workspaces
pub mod safety;

// Observability
pub mod observability;

// Configuration
pub mod config;

// Utilities
pub mod utils;

// CLI entrypoint wiring shared by both binaries.
pub mod cli;

pub use config::types::{CheckError, Result};
