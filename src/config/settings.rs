//! Checker configuration, loaded from an optional JSON file

use crate::config::types::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wall-clock budget for one validator invocation
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Compiler settings for C++ validators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompilerConfig {
    pub compiler: String,
    pub compiler_args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            compiler: "g++".to_string(),
            compiler_args: vec!["-O2".to_string(), "-std=c++20".to_string()],
        }
    }
}

/// Bounds on captured validator output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    pub stdout_limit_bytes: usize,
    pub stderr_limit_bytes: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            stdout_limit_bytes: 64 * 1024,
            stderr_limit_bytes: 64 * 1024,
        }
    }
}

/// Full checker configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckerConfig {
    pub compiler: CompilerConfig,
    pub capture: CaptureConfig,
    /// Per-invocation timeout in seconds; 0 disables the timeout
    pub timeout_seconds: u64,
    /// Upper bound on concurrent validator processes per row
    pub max_parallel: Option<usize>,
    /// Where run-scoped build workspaces are created
    pub workspace_dir: PathBuf,
    /// Exit non-zero when any BAD verdict is found
    pub fail_on_bad: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            compiler: CompilerConfig::default(),
            capture: CaptureConfig::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_parallel: None,
            workspace_dir: std::env::temp_dir().join("subtask-inclusion"),
            fail_on_bad: true,
        }
    }
}

impl CheckerConfig {
    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CheckError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: CheckerConfig = serde_json::from_str(&content)
            .map_err(|e| CheckError::Config(format!("Failed to parse config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.compiler.compiler.trim().is_empty() {
            return Err(CheckError::Config("compiler must not be empty".to_string()));
        }
        if self.max_parallel == Some(0) {
            return Err(CheckError::Config(
                "max_parallel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validator_timeout(&self) -> Option<Duration> {
        if self.timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_seconds))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.compiler.compiler, "g++");
        assert_eq!(config.compiler.compiler_args, vec!["-O2", "-std=c++20"]);
        assert_eq!(config.validator_timeout(), Some(Duration::from_secs(60)));
        assert!(config.fail_on_bad);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = CheckerConfig {
            timeout_seconds: 0,
            ..CheckerConfig::default()
        };
        assert_eq!(config.validator_timeout(), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CheckerConfig =
            serde_json::from_str(r#"{"timeout_seconds": 5, "compiler": {"compiler": "clang++"}}"#)
                .unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.compiler.compiler, "clang++");
        assert_eq!(config.compiler.compiler_args, vec!["-O2", "-std=c++20"]);
        assert_eq!(config.capture, CaptureConfig::default());
    }

    #[test]
    fn test_rejects_zero_parallelism() {
        let config = CheckerConfig {
            max_parallel: Some(0),
            ..CheckerConfig::default()
        };
        assert!(matches!(config.validate(), Err(CheckError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = CheckerConfig::load_from_file("/nonexistent/checker.json").unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }
}
