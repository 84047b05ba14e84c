/// Core error and shared enum types for the checker
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Custom error types for subtask-inclusion
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Validator build failed: {0}")]
    Build(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<nix::errno::Errno> for CheckError {
    fn from(err: nix::errno::Errno) -> Self {
        CheckError::Process(err.to_string())
    }
}

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// How completely a captured stream was collected
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputIntegrity {
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "truncated_by_limit")]
    TruncatedByLimit,
    #[serde(rename = "read_error")]
    ReadError,
}

impl std::fmt::Display for OutputIntegrity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputIntegrity::Complete => write!(f, "complete"),
            OutputIntegrity::TruncatedByLimit => write!(f, "truncated_by_limit"),
            OutputIntegrity::ReadError => write!(f, "read_error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheckError::Build("validator.cpp:3: error".to_string());
        assert_eq!(err.to_string(), "Validator build failed: validator.cpp:3: error");

        let err: CheckError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("IO error:"));
    }

    #[test]
    fn test_output_integrity_display() {
        assert_eq!(format!("{}", OutputIntegrity::Complete), "complete");
        assert_eq!(format!("{}", OutputIntegrity::TruncatedByLimit), "truncated_by_limit");
        assert_eq!(format!("{}", OutputIntegrity::ReadError), "read_error");
    }
}
