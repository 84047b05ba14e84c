//! Finds problem directories below a root.

use crate::config::types::{CheckError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const PROBLEM_MARKER: &str = "problem.yaml";
pub const EXCLUDED_SEGMENT: &str = "testdata_tools";

/// Every directory under `root` holding a `problem.yaml`, sorted by path
///
/// A file argument is treated as its parent directory. Paths containing
/// `testdata_tools` are skipped.
pub fn discover_problems(root: &Path) -> Result<Vec<PathBuf>> {
    let root = if root.is_file() {
        root.parent().unwrap_or(Path::new("."))
    } else {
        root
    };
    if !root.exists() {
        return Err(CheckError::Discovery(format!(
            "{} does not exist",
            root.display()
        )));
    }

    let mut problems = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry during discovery: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != PROBLEM_MARKER {
            continue;
        }
        let Some(problem) = entry.path().parent() else {
            continue;
        };
        if problem.to_string_lossy().contains(EXCLUDED_SEGMENT) {
            log::debug!("Excluding {}", problem.display());
            continue;
        }
        problems.push(problem.to_path_buf());
    }

    problems.sort();
    problems.dedup();
    Ok(problems)
}

/// `parent/name` label for a problem directory
pub fn problem_display_name(problem: &Path) -> String {
    let name = problem
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| problem.display().to_string());
    match problem
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy())
    {
        Some(parent) if !parent.is_empty() => format!("{}/{}", parent, name),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "name: x\n").unwrap();
    }

    #[test]
    fn test_discovers_nested_problems() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("contest/b/problem.yaml"));
        touch(&dir.path().join("contest/a/problem.yaml"));
        touch(&dir.path().join("contest/testdata_tools/fake/problem.yaml"));
        fs::create_dir_all(dir.path().join("contest/notaproblem/data")).unwrap();

        let problems = discover_problems(dir.path()).unwrap();
        assert_eq!(
            problems,
            vec![dir.path().join("contest/a"), dir.path().join("contest/b")]
        );
    }

    #[test]
    fn test_file_argument_uses_parent() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("p/problem.yaml");
        touch(&marker);

        let problems = discover_problems(&marker).unwrap();
        assert_eq!(problems, vec![dir.path().join("p")]);
    }

    #[test]
    fn test_missing_root() {
        assert!(discover_problems(Path::new("/nonexistent/problems")).is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(problem_display_name(Path::new("/x/contest/hello")), "contest/hello");
        assert_eq!(problem_display_name(Path::new("hello")), "hello");
    }
}
