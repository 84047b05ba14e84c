//! Per-group `testdata.yaml` parsing.

use crate::config::types::{CheckError, Result};
use serde_yaml::Value;
use std::path::Path;

pub const TESTDATA_FILE: &str = "testdata.yaml";
pub const FLAGS_KEY: &str = "input_validator_flags";

/// Settings a group directory carries in its `testdata.yaml`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestdataConfig {
    pub input_validator_flags: Option<String>,
}

impl TestdataConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;
        let mapping = match document {
            // An empty file parses as null
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(CheckError::Config(format!(
                    "{} must be a mapping, found {}",
                    TESTDATA_FILE,
                    kind_of(&other)
                )))
            }
        };

        let flags = match mapping.get(FLAGS_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(flags)) => Some(flags.clone()),
            Some(other) => {
                return Err(CheckError::Config(format!(
                    "{} must be a string, found {}",
                    FLAGS_KEY,
                    kind_of(other)
                )))
            }
        };

        Ok(Self {
            input_validator_flags: flags,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| CheckError::Config(format!("{}: {}", path.display(), e)))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
