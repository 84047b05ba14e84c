use crate::config::settings::CompilerConfig;
use crate::config::types::{CheckError, Result};
use crate::judge::adapter::ValidatorAdapter;
use crate::judge::languages::{cpp::CppValidator, python::PythonValidator};
use std::path::{Path, PathBuf};

/// Validator directory relative to a problem root
pub const VALIDATOR_DIR: &str = "input_validators/validator";

/// Lookup order when a problem ships more than one validator source
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["cpp", "python"];

pub fn adapter_for(language: &str, compiler: &CompilerConfig) -> Result<Box<dyn ValidatorAdapter>> {
    match language {
        "cpp" | "c++" | "cxx" | "cc" => Ok(Box::new(CppValidator::new(compiler.clone()))),
        "python" | "py" => Ok(Box::new(PythonValidator)),
        _ => Err(CheckError::Config(format!(
            "unsupported validator language: {language}"
        ))),
    }
}

/// A validator source found in a problem
pub struct LocatedValidator {
    pub adapter: Box<dyn ValidatorAdapter>,
    pub source: PathBuf,
}

/// First supported validator source under `<problem>/input_validators/validator`
pub fn locate_validator(problem: &Path, compiler: &CompilerConfig) -> Result<Option<LocatedValidator>> {
    for language in SUPPORTED_LANGUAGES {
        let adapter = adapter_for(language, compiler)?;
        let source = problem.join(VALIDATOR_DIR).join(adapter.source_name());
        if source.is_file() {
            log::debug!("Using {} validator {}", adapter.language(), source.display());
            return Ok(Some(LocatedValidator { adapter, source }));
        }
    }
    Ok(None)
}

/// Relative paths that were searched, for the skip message
pub fn searched_paths(compiler: &CompilerConfig) -> Vec<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .filter_map(|language| adapter_for(language, compiler).ok())
        .map(|adapter| format!("{}/{}", VALIDATOR_DIR, adapter.source_name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_adapter_aliases() {
        let compiler = CompilerConfig::default();
        assert_eq!(adapter_for("c++", &compiler).unwrap().language(), "cpp");
        assert_eq!(adapter_for("py", &compiler).unwrap().language(), "python");
        assert!(adapter_for("java", &compiler).is_err());
    }

    #[test]
    fn test_locate_prefers_cpp() {
        let dir = tempfile::tempdir().unwrap();
        let validator_dir = dir.path().join(VALIDATOR_DIR);
        fs::create_dir_all(&validator_dir).unwrap();
        fs::write(validator_dir.join("validator.py"), "").unwrap();
        fs::write(validator_dir.join("validator.cpp"), "").unwrap();

        let located = locate_validator(dir.path(), &CompilerConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(located.adapter.language(), "cpp");
        assert!(located.source.ends_with("validator.cpp"));
    }

    #[test]
    fn test_locate_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(locate_validator(dir.path(), &CompilerConfig::default())
            .unwrap()
            .is_none());
        assert_eq!(
            searched_paths(&CompilerConfig::default()),
            vec![
                "input_validators/validator/validator.cpp",
                "input_validators/validator/validator.py"
            ]
        );
    }
}
