//! Writes the per-problem report: headline counts, diagnostics, missed
//! inclusions, then the verdict table.

use crate::analysis::MissedInclusion;
use crate::core::types::{ProblemOutcome, ProblemReport};
use crate::exec::executor::ValidatorOutcome;
use crate::report::style::OutputStyle;
use crate::report::table::render_table;
use crate::verdict::CellDiagnostic;
use std::io::{self, Write};

pub struct ReportPrinter<W: Write> {
    out: W,
    style: OutputStyle,
}

impl<W: Write> ReportPrinter<W> {
    pub fn new(out: W, style: OutputStyle) -> Self {
        Self { out, style }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn md_newline(&mut self) -> io::Result<()> {
        if self.style.is_markdown() {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// `parent/name` with the problem's own name highlighted on a console
    fn problem_name(&self, name: &str) -> String {
        match name.rsplit_once('/') {
            Some((parent, own)) => format!("{}/{}", parent, self.style.green(own, true)),
            None => self.style.green(name, true),
        }
    }

    pub fn announce(&mut self, count: usize) -> io::Result<()> {
        let plural = if count == 1 { "" } else { "s" };
        writeln!(self.out, "Will check {count} problem{plural}.")
    }

    pub fn problem_heading(&mut self, index: usize, total: usize, name: &str) -> io::Result<()> {
        let name = self.problem_name(name);
        writeln!(self.out, "{}Problem {index}/{total}: {name}", self.style.h2())
    }

    pub fn outcome(&mut self, outcome: &ProblemOutcome) -> io::Result<()> {
        let style = self.style;
        match outcome {
            ProblemOutcome::Skipped { name, searched } => {
                self.md_newline()?;
                let warning = format!(
                    "Skipping {}: no input validator found. Looked at {}",
                    self.problem_name(name),
                    searched.join(", ")
                );
                writeln!(self.out, "{}{}\n", style.h2(), style.orange(&warning, false))
            }
            ProblemOutcome::BuildFailed { stderr, .. } => {
                writeln!(
                    self.out,
                    "{}{}",
                    style.h2(),
                    style.red("Validator Compilation Failed:", false)
                )?;
                writeln!(self.out, "{}", style.red(stderr, true))
            }
            ProblemOutcome::Failed { error, .. } => {
                writeln!(
                    self.out,
                    "{}{}",
                    style.h2(),
                    style.red("Problem could not be checked:", false)
                )?;
                writeln!(self.out, "{}", style.red(error, true))
            }
            ProblemOutcome::Checked(report) => self.report(report),
        }
    }

    fn report(&mut self, report: &ProblemReport) -> io::Result<()> {
        let style = self.style;
        let problem = &report.problem;

        for (case, group, diagnostic) in report.matrix.diagnostics() {
            if let CellDiagnostic::Invocation { reason } = diagnostic {
                let file = problem
                    .cases
                    .iter()
                    .find(|c| c.name == case)
                    .map(|c| c.input.display().to_string())
                    .unwrap_or_else(|| case.to_string());
                writeln!(
                    self.out,
                    "{} {file} for group {group}: {reason}",
                    style.red("Exception while validating", false)
                )?;
            }
        }

        let summary = &report.summary;
        if summary.misses > 0 {
            writeln!(
                self.out,
                "{}{}: {}, {:.2}% of all checks.\n",
                style.h3(),
                style.orange("Misses", false),
                summary.misses,
                summary.miss_percentage()
            )?;
        }

        if summary.bads > 0 {
            writeln!(self.out, "{}{}: {}", style.h3(), style.red("Bads", false), summary.bads)?;
            for (case, group, diagnostic) in report.matrix.diagnostics() {
                if let CellDiagnostic::Rejection { flags, outcome } = diagnostic {
                    self.rejection(case, group, flags, outcome)?;
                }
            }
            self.md_newline()?;
        }

        if summary.unknowns > 0 {
            writeln!(
                self.out,
                "{}{}: {}\n",
                style.h3(),
                style.gray("Unknowns"),
                summary.unknowns
            )?;
        }

        for missed in &report.inclusions.missed {
            self.missed_inclusion(missed)?;
        }

        writeln!(self.out)?;
        if style.is_markdown() {
            writeln!(self.out, "<details>\n")?;
        }
        writeln!(self.out, "{}", render_table(&report.display, problem, style))?;
        self.md_newline()?;
        if style.is_markdown() {
            writeln!(self.out, "</details>\n")?;
        }
        writeln!(self.out)
    }

    fn rejection(
        &mut self,
        case: &str,
        group: &str,
        flags: &str,
        outcome: &ValidatorOutcome,
    ) -> io::Result<()> {
        let status = match (outcome.exit_code, outcome.signal) {
            (Some(code), _) => format!("exit code {code}"),
            (None, Some(signal)) => format!("killed by signal {signal}"),
            (None, None) => "no exit status".to_string(),
        };
        writeln!(
            self.out,
            " - {} rejected by its own group {} (flags: `{}`), {}",
            case,
            self.style.red(group, true),
            flags,
            status
        )?;
        for (label, text) in [("stdout", &outcome.stdout), ("stderr", &outcome.stderr)] {
            let text = text.trim_end();
            if !text.is_empty() {
                writeln!(self.out, "   {label}: {text}")?;
            }
        }
        Ok(())
    }

    fn missed_inclusion(&mut self, missed: &MissedInclusion) -> io::Result<()> {
        let style = self.style;
        let warning = if missed.sample_source {
            style.orange("Missed sample inclusion", false)
        } else {
            style.red("Missed inclusion", false)
        };
        let source = style.orange(&missed.source, true);
        match missed.targets.as_slice() {
            [target] => writeln!(
                self.out,
                "{warning}: {source} can be included in {}",
                style.orange(target, true)
            )?,
            targets => {
                writeln!(self.out, "{warning}: {source} can be included in")?;
                for target in targets {
                    writeln!(self.out, " - {}", style.orange(target, true))?;
                }
            }
        }
        self.md_newline()
    }
}
