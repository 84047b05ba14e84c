/// Run-scoped workspace for compiled validator artifacts
///
/// Each problem builds into its own UUID-named directory, so concurrent
/// checker runs never overwrite each other's validator binary.
use crate::config::types::{CheckError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Workspace holding one validator build
pub struct Workspace {
    /// Unique run ID
    run_id: String,
    /// Run-specific workspace directory
    run_dir: PathBuf,
}

impl Workspace {
    /// Create new workspace under `base_dir`
    pub fn new(base_dir: &Path) -> Result<Self> {
        let run_id = Uuid::new_v4().to_string();
        let run_dir = base_dir.join(&run_id);

        fs::create_dir_all(&run_dir).map_err(|e| {
            CheckError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create workspace directory {}: {}", run_dir.display(), e),
            ))
        })?;

        Ok(Self { run_id, run_dir })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Path for a build artifact inside the workspace
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.run_dir.join(name)
    }

    /// Cleanup workspace (idempotent)
    pub fn cleanup(&self) -> Result<()> {
        if self.run_dir.exists() {
            fs::remove_dir_all(&self.run_dir).map_err(|e| {
                CheckError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to remove workspace {}: {}", self.run_dir.display(), e),
                ))
            })?;
        }
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::warn!("{}", e);
        }
    }
}
