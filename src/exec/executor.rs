//! Validator process execution with bounded capture and an optional timeout

use crate::config::types::{CheckError, OutputIntegrity, Result};
use crate::utils::output::{OutputCollector, OutputLimits, PendingOutput};
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Exit code an input validator uses to accept its input
pub const ACCEPT_EXIT_CODE: i32 = 42;

const POLL_INTERVAL: Duration = Duration::from_millis(5);
const TERM_GRACE: Duration = Duration::from_millis(100);

/// Program plus fixed leading arguments; group flags are appended per call
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ValidatorCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ValidatorCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// What one validator run produced
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ValidatorOutcome {
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub output_integrity: OutputIntegrity,
    pub timed_out: bool,
    pub wall_time_ms: u64,
}

impl ValidatorOutcome {
    /// Outcome of a run that exited normally with `code`
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            signal: None,
            stdout: String::new(),
            stderr: String::new(),
            output_integrity: OutputIntegrity::Complete,
            timed_out: false,
            wall_time_ms: 0,
        }
    }

    pub fn accepted(&self) -> bool {
        !self.timed_out && self.exit_code == Some(ACCEPT_EXIT_CODE)
    }
}

/// Seam between verdict classification and process execution
pub trait InputValidator: Send + Sync {
    /// Run the validator over `input` with `flags`
    ///
    /// `Err` means the run itself failed (spawn or I/O), not that the input
    /// was rejected.
    fn validate(&self, input: &Path, flags: &[String]) -> Result<ValidatorOutcome>;
}

/// Runs a validator executable as a child process
pub struct ValidatorRunner {
    command: ValidatorCommand,
    timeout: Option<Duration>,
    collector: OutputCollector,
}

impl ValidatorRunner {
    pub fn new(command: ValidatorCommand, timeout: Option<Duration>, limits: OutputLimits) -> Self {
        Self {
            command,
            timeout,
            collector: OutputCollector::new(limits),
        }
    }

    fn spawn(&self, input: &Path, flags: &[String]) -> Result<Child> {
        let stdin = File::open(input).map_err(|e| {
            CheckError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open {}: {}", input.display(), e),
            ))
        })?;

        use std::os::unix::process::CommandExt;
        // Own process group so a timeout also reaches helpers the validator forked
        Command::new(&self.command.program)
            .process_group(0)
            .args(&self.command.args)
            .args(flags)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                CheckError::Process(format!(
                    "Failed to start {}: {}",
                    self.command.program.display(),
                    e
                ))
            })
    }

    /// Poll until exit or `deadline`; on timeout the group is terminated and
    /// the child reaped
    fn wait_with_timeout(
        &self,
        child: &mut Child,
        deadline: Option<Instant>,
    ) -> Result<(ExitStatus, bool)> {
        let pgid = Pid::from_raw(child.id() as i32);
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok((status, false));
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                terminate_group(pgid);
                let status = child.wait()?;
                return Ok((status, true));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Wait for both collectors until `deadline`
///
/// A validator may exit while a helper it forked still holds the pipes.
/// Past the deadline the rest of the group is terminated; returns true when
/// that happened.
fn drain_before_deadline(pending: &PendingOutput, pgid: Pid, deadline: Option<Instant>) -> bool {
    let Some(deadline) = deadline else {
        return false;
    };
    while !pending.is_finished() {
        if Instant::now() >= deadline {
            log::debug!("Output pipes of group {} still open at the deadline", pgid);
            terminate_group(pgid);
            return true;
        }
        thread::sleep(POLL_INTERVAL);
    }
    false
}

/// SIGTERM to a process group, short grace period, then SIGKILL
fn terminate_group(pgid: Pid) {
    if let Err(e) = killpg(pgid, Signal::SIGTERM) {
        log::debug!("SIGTERM to group {} failed: {}", pgid, e);
    }
    thread::sleep(TERM_GRACE);
    if let Err(e) = killpg(pgid, Signal::SIGKILL) {
        // ESRCH once the whole group is gone
        log::debug!("SIGKILL to group {} failed: {}", pgid, e);
    }
}

impl InputValidator for ValidatorRunner {
    fn validate(&self, input: &Path, flags: &[String]) -> Result<ValidatorOutcome> {
        let start = Instant::now();
        let deadline = self.timeout.map(|limit| start + limit);
        let mut child = self.spawn(input, flags)?;
        let pgid = Pid::from_raw(child.id() as i32);
        let pending = self.collector.spawn(child.stdout.take(), child.stderr.take());

        let waited = self.wait_with_timeout(&mut child, deadline);
        let lingering = drain_before_deadline(&pending, pgid, deadline);
        let output = pending.join();
        let (status, exited_late) = waited?;
        let timed_out = exited_late || lingering;

        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        if timed_out {
            log::warn!(
                "Validator timed out on {} after {:?}",
                input.display(),
                self.timeout.unwrap_or_default()
            );
        }

        Ok(ValidatorOutcome {
            exit_code: status.code(),
            signal,
            stdout: output.stdout.text(),
            stderr: output.stderr.text(),
            output_integrity: output.combined_integrity(),
            timed_out,
            wall_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
