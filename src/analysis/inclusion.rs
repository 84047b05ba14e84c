//! Inclusion feasibility over a completed verdict matrix
//!
//! Group g1 can be included in g2 when no case of g1 is `BAD` or `OK:N`
//! under g2's flags. It is reported only when at least one of those cases is
//! a `MISS` there, i.e. the inclusion would change something. Raw verdicts
//! are used, so `sample` participates as a source even though its misses
//! are hidden from the display.
use crate::problem::types::ProblemData;
use crate::verdict::{Verdict, VerdictMatrix};
use serde::Serialize;
use std::collections::HashMap;

/// Result of scanning one (source, target) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairFeasibility {
    /// Some source case is `BAD` or `OK:N` under the target
    Infeasible,
    /// Safe, but every source case is already accounted for
    Redundant,
    /// Safe and at least one source case is a `MISS`
    Missed,
}

/// Scan `rows` under `column`, stopping at the first blocking verdict
pub fn pair_feasibility(
    matrix: &VerdictMatrix,
    rows: &[usize],
    column: usize,
) -> PairFeasibility {
    let mut any_miss = false;
    for &row in rows {
        let verdict = matrix.verdict(row, column);
        if verdict.blocks_inclusion() {
            return PairFeasibility::Infeasible;
        }
        if verdict == Verdict::Miss {
            any_miss = true;
        }
    }
    if any_miss {
        PairFeasibility::Missed
    } else {
        PairFeasibility::Redundant
    }
}

/// Groups `source` could be included in
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MissedInclusion {
    pub source: String,
    /// Ascending by name
    pub targets: Vec<String>,
    /// Source is `sample`, which is reported as a softer warning
    pub sample_source: bool,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct InclusionReport {
    /// One entry per source group with at least one target, in column order
    pub missed: Vec<MissedInclusion>,
}

impl InclusionReport {
    pub fn is_empty(&self) -> bool {
        self.missed.is_empty()
    }

    pub fn targets_for(&self, source: &str) -> &[String] {
        self.missed
            .iter()
            .find(|m| m.source == source)
            .map(|m| m.targets.as_slice())
            .unwrap_or(&[])
    }
}

/// Compute the missed inclusions for every source group
pub fn analyze(matrix: &VerdictMatrix, problem: &ProblemData) -> InclusionReport {
    let row_of: HashMap<&str, usize> = matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect();

    let mut missed = Vec::new();
    for source in &problem.groups {
        let rows: Vec<usize> = problem
            .members_of(&source.name)
            .filter_map(|case| row_of.get(problem.cases[case].name.as_str()).copied())
            .collect();

        let mut targets: Vec<String> = problem
            .groups
            .iter()
            .filter(|target| !target.is_sample())
            .filter_map(|target| {
                let column = matrix.column_index(&target.name)?;
                (pair_feasibility(matrix, &rows, column) == PairFeasibility::Missed)
                    .then(|| target.name.clone())
            })
            .collect();
        targets.sort();

        if !targets.is_empty() {
            log::debug!("{} can be included in {:?}", source.name, targets);
            missed.push(MissedInclusion {
                source: source.name.clone(),
                targets,
                sample_source: source.is_sample(),
            });
        }
    }

    InclusionReport { missed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::types::{Group, TestCase};
    use crate::verdict::CellOutcome;
    use std::path::PathBuf;
    use Verdict::*;

    fn case(name: &str, groups: &[&str]) -> TestCase {
        TestCase {
            name: name.to_string(),
            input: PathBuf::from(name),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn matrix_for(problem: &ProblemData, rows: &[&[Verdict]]) -> VerdictMatrix {
        VerdictMatrix::new(
            problem.cases.iter().map(|c| c.name.clone()).collect(),
            problem.groups.iter().map(|g| g.name.clone()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|&verdict| CellOutcome {
                            verdict,
                            diagnostic: None,
                        })
                        .collect()
                })
                .collect(),
        )
    }

    fn two_groups() -> ProblemData {
        ProblemData::new(
            PathBuf::from("p"),
            vec![case("1.in", &["g1"]), case("2.in", &["g2"])],
            vec![Group::new("g1", "--max 5"), Group::new("g2", "--max 10")],
        )
    }

    #[test]
    fn test_permissive_target_is_reported() {
        let problem = two_groups();
        let matrix = matrix_for(&problem, &[&[OkYes, Miss], &[OkNo, OkYes]]);
        let report = analyze(&matrix, &problem);
        assert_eq!(report.targets_for("g1"), &["g2"]);
        assert!(report.targets_for("g2").is_empty());
    }

    #[test]
    fn test_single_blocking_verdict_falsifies() {
        let problem = ProblemData::new(
            PathBuf::from("p"),
            vec![case("1.in", &["g1"]), case("2.in", &["g1"]), case("3.in", &["g2"])],
            vec![Group::new("g1", ""), Group::new("g2", "")],
        );
        for blocker in [OkNo, Bad] {
            let matrix = matrix_for(&problem, &[&[OkYes, Miss], &[OkYes, blocker], &[OkNo, OkYes]]);
            assert!(analyze(&matrix, &problem).is_empty());
        }
    }

    #[test]
    fn test_short_circuit_stops_at_blocker() {
        let problem = two_groups();
        let matrix = matrix_for(&problem, &[&[OkYes, OkNo], &[OkNo, OkYes]]);
        assert_eq!(pair_feasibility(&matrix, &[0], 1), PairFeasibility::Infeasible);
        assert_eq!(pair_feasibility(&matrix, &[], 1), PairFeasibility::Redundant);
    }

    #[test]
    fn test_no_miss_means_no_report() {
        let problem = ProblemData::new(
            PathBuf::from("p"),
            vec![case("1.in", &["g1", "g2"]), case("2.in", &["g2"])],
            vec![Group::new("g1", ""), Group::new("g2", "")],
        );
        let matrix = matrix_for(&problem, &[&[OkYes, OkYes], &[OkNo, OkYes]]);
        assert!(analyze(&matrix, &problem).is_empty());
    }

    #[test]
    fn test_sample_is_source_but_never_target() {
        let problem = ProblemData::new(
            PathBuf::from("p"),
            vec![case("1.in", &["sample"]), case("2.in", &["b"]), case("3.in", &["a"])],
            vec![Group::new("sample", ""), Group::new("b", ""), Group::new("a", "")],
        );
        // columns: sample, a, b
        let matrix = matrix_for(
            &problem,
            &[&[OkYes, Miss, Miss], &[Miss, OkNo, OkYes], &[Miss, OkYes, OkNo]],
        );
        let report = analyze(&matrix, &problem);
        assert_eq!(report.missed.len(), 1);
        assert_eq!(report.missed[0].source, "sample");
        assert!(report.missed[0].sample_source);
        assert_eq!(report.missed[0].targets, vec!["a", "b"]);
        assert!(report.targets_for("a").is_empty());
    }

    #[test]
    fn test_unknown_neither_blocks_nor_counts() {
        let problem = two_groups();
        let matrix = matrix_for(&problem, &[&[OkYes, Unknown], &[OkNo, OkYes]]);
        assert_eq!(pair_feasibility(&matrix, &[0], 1), PairFeasibility::Redundant);
    }
}
