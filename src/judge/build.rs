use crate::config::types::{CheckError, Result};
use crate::exec::executor::ValidatorCommand;
use crate::judge::adapter::ValidatorAdapter;
use crate::safety::workspace::Workspace;
use std::path::Path;
use std::process::Command;

/// Build the validator if its language needs it and return how to run it
pub fn prepare_validator(
    adapter: &dyn ValidatorAdapter,
    source: &Path,
    workspace: &Workspace,
) -> Result<ValidatorCommand> {
    if let Some(command) = adapter.compile_command(source, workspace) {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| CheckError::Build("empty compile command".to_string()))?;

        log::info!("Compiling {} validator: {}", adapter.language(), command.join(" "));
        let output = Command::new(program).args(args).output().map_err(|e| {
            CheckError::Build(format!("failed to run {}: {}", program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(CheckError::Build(stderr));
        }
    }
    Ok(adapter.run_command(source, workspace))
}
