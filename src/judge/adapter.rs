use crate::exec::executor::ValidatorCommand;
use crate::safety::workspace::Workspace;
use std::path::Path;

/// Language adapter contract for building and running an input validator.
pub trait ValidatorAdapter: Send + Sync {
    fn language(&self) -> &'static str;

    /// File name looked up in the problem's validator directory
    fn source_name(&self) -> &'static str;

    /// Build command, or `None` when the source runs as-is
    fn compile_command(&self, source: &Path, workspace: &Workspace) -> Option<Vec<String>>;

    fn run_command(&self, source: &Path, workspace: &Workspace) -> ValidatorCommand;
}
