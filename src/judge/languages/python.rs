use crate::exec::executor::ValidatorCommand;
use crate::judge::adapter::ValidatorAdapter;
use crate::safety::workspace::Workspace;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct PythonValidator;

impl ValidatorAdapter for PythonValidator {
    fn language(&self) -> &'static str {
        "python"
    }

    fn source_name(&self) -> &'static str {
        "validator.py"
    }

    fn compile_command(&self, _source: &Path, _workspace: &Workspace) -> Option<Vec<String>> {
        None
    }

    fn run_command(&self, source: &Path, _workspace: &Workspace) -> ValidatorCommand {
        ValidatorCommand::new("python3").with_args([source.to_string_lossy().to_string()])
    }
}
