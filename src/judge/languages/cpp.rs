use crate::config::settings::CompilerConfig;
use crate::exec::executor::ValidatorCommand;
use crate::judge::adapter::ValidatorAdapter;
use crate::safety::workspace::Workspace;
use std::path::Path;

const BINARY_NAME: &str = "validator.out";

#[derive(Debug, Clone, Default)]
pub struct CppValidator {
    compiler: CompilerConfig,
}

impl CppValidator {
    pub fn new(compiler: CompilerConfig) -> Self {
        Self { compiler }
    }
}

impl ValidatorAdapter for CppValidator {
    fn language(&self) -> &'static str {
        "cpp"
    }

    fn source_name(&self) -> &'static str {
        "validator.cpp"
    }

    fn compile_command(&self, source: &Path, workspace: &Workspace) -> Option<Vec<String>> {
        let mut command = vec![self.compiler.compiler.clone()];
        command.extend(self.compiler.compiler_args.iter().cloned());
        command.push(source.to_string_lossy().to_string());
        command.push("-o".to_string());
        command.push(
            workspace
                .artifact_path(BINARY_NAME)
                .to_string_lossy()
                .to_string(),
        );
        Some(command)
    }

    fn run_command(&self, _source: &Path, workspace: &Workspace) -> ValidatorCommand {
        ValidatorCommand::new(workspace.artifact_path(BINARY_NAME))
    }
}
