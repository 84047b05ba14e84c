use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Name of the group that is always ordered first
pub const SAMPLE_GROUP: &str = "sample";

/// Directory names that structure the tree but are not groups
pub const STRUCTURAL_DIRS: [&str; 2] = ["data", "secret"];

/// One input file, keyed by its file name
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub input: PathBuf,
    /// Groups whose directory tree contains this file
    pub groups: BTreeSet<String>,
}

impl TestCase {
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    pub fn is_sample(&self) -> bool {
        self.is_member_of(SAMPLE_GROUP)
    }

    /// Group used to label the case in the table: sample first, else smallest name
    pub fn primary_group(&self) -> Option<&str> {
        if self.is_sample() {
            return Some(SAMPLE_GROUP);
        }
        self.groups.iter().next().map(String::as_str)
    }
}

/// A test data group and the validator flags it is checked with
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub flags: String,
}

impl Group {
    pub fn new(name: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: flags.into(),
        }
    }

    pub fn is_sample(&self) -> bool {
        self.name == SAMPLE_GROUP
    }

    /// Validator arguments: the flag string split on whitespace
    pub fn flag_args(&self) -> Vec<String> {
        self.flags.split_whitespace().map(str::to_string).collect()
    }
}

/// Immutable result of walking one problem's `data` tree
#[derive(Clone, Debug, Serialize)]
pub struct ProblemData {
    pub root: PathBuf,
    /// Sorted by [`crate::problem::ordering::testcase_order`]
    pub cases: Vec<TestCase>,
    /// Sorted with sample first, then by name
    pub groups: Vec<Group>,
}

impl ProblemData {
    /// Build from unsorted parts, applying the canonical row and column order
    pub fn new(root: PathBuf, mut cases: Vec<TestCase>, mut groups: Vec<Group>) -> Self {
        cases.sort_by(|a, b| crate::problem::ordering::testcase_order(&a.name, &b.name));
        groups.sort_by(|a, b| crate::problem::ordering::group_order(&a.name, &b.name));
        Self { root, cases, groups }
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn has_sample(&self) -> bool {
        self.groups.iter().any(Group::is_sample)
    }

    /// Row indices of the cases declaring membership in `group`
    pub fn members_of<'a>(&'a self, group: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.cases
            .iter()
            .enumerate()
            .filter(move |(_, case)| case.is_member_of(group))
            .map(|(index, _)| index)
    }
}
