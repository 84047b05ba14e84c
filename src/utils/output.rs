/// Bounded output collection for validator processes
///
/// Streams are drained to EOF on background threads so a chatty validator
/// never blocks on a full pipe; bytes past the limit are discarded.
use crate::config::settings::CaptureConfig;
use crate::config::types::OutputIntegrity;
use std::io::{BufReader, Read};
use std::process::{ChildStderr, ChildStdout};
use std::thread::{self, JoinHandle};

/// Output limits configuration
#[derive(Debug, Clone)]
pub struct OutputLimits {
    /// Per-stream stdout limit (bytes)
    pub stdout_limit: usize,
    /// Per-stream stderr limit (bytes)
    pub stderr_limit: usize,
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self::from(&CaptureConfig::default())
    }
}

impl From<&CaptureConfig> for OutputLimits {
    fn from(config: &CaptureConfig) -> Self {
        OutputLimits {
            stdout_limit: config.stdout_limit_bytes,
            stderr_limit: config.stderr_limit_bytes,
        }
    }
}

/// One collected stream
#[derive(Debug, Clone, Default)]
pub struct CapturedStream {
    pub data: Vec<u8>,
    pub integrity: Option<OutputIntegrity>,
}

impl CapturedStream {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }
}

/// Output collection result
#[derive(Debug, Clone)]
pub struct OutputResult {
    pub stdout: CapturedStream,
    pub stderr: CapturedStream,
}

impl OutputResult {
    pub fn combined_integrity(&self) -> OutputIntegrity {
        let states = [self.stdout.integrity, self.stderr.integrity];
        if states.contains(&Some(OutputIntegrity::ReadError)) {
            OutputIntegrity::ReadError
        } else if states.contains(&Some(OutputIntegrity::TruncatedByLimit)) {
            OutputIntegrity::TruncatedByLimit
        } else {
            OutputIntegrity::Complete
        }
    }
}

/// Collectors running for a live child
pub struct PendingOutput {
    stdout: Option<JoinHandle<CapturedStream>>,
    stderr: Option<JoinHandle<CapturedStream>>,
}

impl PendingOutput {
    /// Both streams reached EOF (or were never captured)
    pub fn is_finished(&self) -> bool {
        let done = |handle: &Option<JoinHandle<CapturedStream>>| {
            handle.as_ref().map_or(true, JoinHandle::is_finished)
        };
        done(&self.stdout) && done(&self.stderr)
    }

    /// Wait for both collectors; call after the child has exited or been killed
    pub fn join(self) -> OutputResult {
        OutputResult {
            stdout: join_stream(self.stdout),
            stderr: join_stream(self.stderr),
        }
    }
}

fn join_stream(handle: Option<JoinHandle<CapturedStream>>) -> CapturedStream {
    match handle {
        Some(handle) => handle.join().unwrap_or_else(|_| CapturedStream {
            data: Vec::new(),
            integrity: Some(OutputIntegrity::ReadError),
        }),
        None => CapturedStream::default(),
    }
}

/// Output collector with bounded collection
pub struct OutputCollector {
    limits: OutputLimits,
}

impl OutputCollector {
    pub fn new(limits: OutputLimits) -> Self {
        OutputCollector { limits }
    }

    /// Start collecting both streams of a child process
    pub fn spawn(&self, stdout: Option<ChildStdout>, stderr: Option<ChildStderr>) -> PendingOutput {
        let stdout_limit = self.limits.stdout_limit;
        let stderr_limit = self.limits.stderr_limit;
        PendingOutput {
            stdout: stdout.map(|s| thread::spawn(move || collect_stream(s, stdout_limit))),
            stderr: stderr.map(|s| thread::spawn(move || collect_stream(s, stderr_limit))),
        }
    }
}

/// Collect from a single stream with limit
fn collect_stream<R: Read>(stream: R, limit: usize) -> CapturedStream {
    let mut reader = BufReader::new(stream);
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut integrity = OutputIntegrity::Complete;

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let room = limit.saturating_sub(buffer.len());
                if n > room {
                    buffer.extend_from_slice(&chunk[..room]);
                    integrity = OutputIntegrity::TruncatedByLimit;
                } else {
                    buffer.extend_from_slice(&chunk[..n]);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => {
                integrity = OutputIntegrity::ReadError;
                break;
            }
        }
    }

    CapturedStream {
        data: buffer,
        integrity: Some(integrity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_limits_default() {
        let limits = OutputLimits::default();
        assert_eq!(limits.stdout_limit, 64 * 1024);
        assert_eq!(limits.stderr_limit, 64 * 1024);
    }

    #[test]
    fn test_collect_stream_within_limit() {
        let captured = collect_stream(&b"line one\nline two\n"[..], 1024);
        assert_eq!(captured.text(), "line one\nline two\n");
        assert_eq!(captured.integrity, Some(OutputIntegrity::Complete));
    }

    #[test]
    fn test_collect_stream_truncates_but_drains() {
        let input = vec![b'x'; 10_000];
        let captured = collect_stream(&input[..], 100);
        assert_eq!(captured.data.len(), 100);
        assert_eq!(captured.integrity, Some(OutputIntegrity::TruncatedByLimit));
    }

    #[test]
    fn test_no_streams() {
        let collector = OutputCollector::new(OutputLimits::default());
        let result = collector.spawn(None, None).join();
        assert!(result.stdout.data.is_empty());
        assert!(result.stderr.data.is_empty());
        assert_eq!(result.combined_integrity(), OutputIntegrity::Complete);
    }
}
