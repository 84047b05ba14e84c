//! Reads a problem's `data` tree into an immutable [`ProblemData`].

use crate::config::testdata::{TestdataConfig, TESTDATA_FILE};
use crate::config::types::{CheckError, Result};
use crate::problem::types::{Group, ProblemData, TestCase, STRUCTURAL_DIRS};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DATA_DIR: &str = "data";
pub const INPUT_EXTENSION: &str = ".in";

fn is_structural(name: &str) -> bool {
    STRUCTURAL_DIRS.contains(&name)
}

/// Group names along `relative`, skipping `data`/`secret`
fn groups_along(relative: &Path) -> BTreeSet<String> {
    relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .filter(|name| !is_structural(name))
        .map(str::to_string)
        .collect()
}

struct LayoutBuilder {
    data_root: PathBuf,
    flags: BTreeMap<String, Option<String>>,
    cases: BTreeMap<String, TestCase>,
}

impl LayoutBuilder {
    fn visit_dir(&mut self, dir: &Path) -> Result<()> {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            return Ok(());
        };
        if dir == self.data_root || is_structural(name) {
            return Ok(());
        }

        let testdata = dir.join(TESTDATA_FILE);
        let flags = if testdata.is_file() {
            TestdataConfig::load(&testdata)?.input_validator_flags
        } else {
            None
        };

        let existing = self.flags.entry(name.to_string()).or_insert(None);
        let Some(new) = flags else {
            return Ok(());
        };
        if existing.is_none() {
            *existing = Some(new);
        } else if existing.as_deref() != Some(new.as_str()) {
            log::warn!(
                "Group '{}' appears with conflicting flags ('{}' vs '{}'), keeping the first",
                name,
                existing.as_deref().unwrap_or_default(),
                new
            );
        }
        Ok(())
    }

    fn visit_file(&mut self, file: &Path) {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            return;
        };
        if !name.ends_with(INPUT_EXTENSION) {
            return;
        }

        let parent = file.parent().unwrap_or(&self.data_root);
        let relative = parent.strip_prefix(&self.data_root).unwrap_or(parent);
        let groups = groups_along(relative);
        if groups.is_empty() {
            log::warn!(
                "Ignoring {}: not inside any group directory",
                file.display()
            );
            return;
        }

        let case = self
            .cases
            .entry(name.to_string())
            .or_insert_with(|| TestCase {
                name: name.to_string(),
                input: file.to_path_buf(),
                groups: BTreeSet::new(),
            });
        if case.input != file {
            log::debug!(
                "{} also found at {}, validating {}",
                name,
                file.display(),
                case.input.display()
            );
        }
        case.groups.extend(groups);
    }

    fn finish(self, root: PathBuf) -> ProblemData {
        let groups = self
            .flags
            .into_iter()
            .map(|(name, flags)| Group::new(name, flags.unwrap_or_default()))
            .collect();
        ProblemData::new(root, self.cases.into_values().collect(), groups)
    }
}

/// Discover groups, their flags, and every test case under `<root>/data`
pub fn load_problem_data(root: &Path) -> Result<ProblemData> {
    let data_root = root.join(DATA_DIR);
    if !data_root.is_dir() {
        return Err(CheckError::Discovery(format!(
            "{} has no {} directory",
            root.display(),
            DATA_DIR
        )));
    }

    let mut builder = LayoutBuilder {
        data_root: data_root.clone(),
        flags: BTreeMap::new(),
        cases: BTreeMap::new(),
    };

    for entry in WalkDir::new(&data_root)
        .follow_links(true)
        .sort_by_file_name()
    {
        // Symlink loops and unreadable entries lose only themselves
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", data_root.display(), e);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            builder.visit_dir(entry.path())?;
        } else {
            builder.visit_file(entry.path());
        }
    }

    let problem = builder.finish(root.to_path_buf());
    log::debug!(
        "Loaded {}: {} groups, {} test cases",
        root.display(),
        problem.groups.len(),
        problem.cases.len()
    );
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_groups_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        write(&data.join("sample/1.in"), "1\n");
        write(&data.join("secret/group1/2.in"), "2\n");
        write(&data.join("secret/group1/testdata.yaml"), "input_validator_flags: --small\n");
        write(&data.join("secret/group2/3.in"), "3\n");
        write(&data.join("secret/group2/3.ans"), "3\n");

        let problem = load_problem_data(dir.path()).unwrap();
        let names: Vec<_> = problem.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["sample", "group1", "group2"]);
        assert_eq!(problem.group("group1").unwrap().flags, "--small");
        assert_eq!(problem.group("group2").unwrap().flags, "");

        let cases: Vec<_> = problem.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cases, vec!["1.in", "2.in", "3.in"]);
    }

    #[test]
    fn test_same_name_in_several_groups_merges_membership() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        write(&data.join("secret/a/5.in"), "5\n");
        write(&data.join("secret/b/5.in"), "5\n");

        let problem = load_problem_data(dir.path()).unwrap();
        assert_eq!(problem.cases.len(), 1);
        let case = &problem.cases[0];
        assert!(case.is_member_of("a") && case.is_member_of("b"));
        assert!(case.input.ends_with("secret/a/5.in"));
    }

    #[test]
    fn test_nested_group_directories_all_count() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("data/secret/outer/inner/7.in"), "7\n");

        let problem = load_problem_data(dir.path()).unwrap();
        let case = &problem.cases[0];
        assert_eq!(
            case.groups.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["inner", "outer"]
        );
    }

    #[test]
    fn test_symlink_loop_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        write(&data.join("secret/g1/1.in"), "1\n");
        std::os::unix::fs::symlink(data.join("secret"), data.join("secret/g1/loop")).unwrap();

        let problem = load_problem_data(dir.path()).unwrap();
        let cases: Vec<_> = problem.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cases, vec!["1.in"]);
        assert!(problem.cases[0].is_member_of("g1"));
    }

    #[test]
    fn test_inputs_outside_groups_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("data/secret/loose.in"), "0\n");
        write(&dir.path().join("data/secret/g/1.in"), "1\n");

        let problem = load_problem_data(dir.path()).unwrap();
        assert_eq!(problem.cases.len(), 1);
        assert_eq!(problem.cases[0].name, "1.in");
    }

    #[test]
    fn test_missing_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_problem_data(dir.path()).unwrap_err();
        assert!(matches!(err, CheckError::Discovery(_)));
    }

    #[test]
    fn test_bad_testdata_yaml_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("data/secret/g/1.in"), "1\n");
        write(&dir.path().join("data/secret/g/testdata.yaml"), "input_validator_flags: [1, 2]\n");
        assert!(matches!(
            load_problem_data(dir.path()),
            Err(CheckError::Config(_))
        ));
    }
}
