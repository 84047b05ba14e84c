/// Verdict classification for one (test case, group) cell
///
/// The verdict is a total function of two booleans: whether the validator
/// accepted the input under the group's flags, and whether the case is a
/// declared member of the group.
use crate::exec::executor::{InputValidator, ValidatorOutcome};
use crate::problem::types::{Group, TestCase};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Accepted, declared member
    #[serde(rename = "OK:Y")]
    OkYes,
    /// Rejected, declared non-member
    #[serde(rename = "OK:N")]
    OkNo,
    /// Accepted, declared non-member
    #[serde(rename = "MISS")]
    Miss,
    /// Rejected, declared member
    #[serde(rename = "BAD")]
    Bad,
    /// The validator run itself failed
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::OkYes => "OK:Y",
            Verdict::OkNo => "OK:N",
            Verdict::Miss => "MISS",
            Verdict::Bad => "BAD",
            Verdict::Unknown => "UNKNOWN",
        }
    }

    /// Verdicts that forbid moving a case into the group
    pub fn blocks_inclusion(self) -> bool {
        matches!(self, Verdict::Bad | Verdict::OkNo)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Side-channel detail attached to a cell
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub enum CellDiagnostic {
    /// Why a cell is `Unknown`
    Invocation { reason: String },
    /// The validator run that rejected a declared member
    Rejection { flags: String, outcome: ValidatorOutcome },
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CellOutcome {
    pub verdict: Verdict,
    pub diagnostic: Option<CellDiagnostic>,
}

impl CellOutcome {
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Unknown,
            diagnostic: Some(CellDiagnostic::Invocation {
                reason: reason.into(),
            }),
        }
    }
}

/// Verdict classifier - pure reconciliation plus one validator invocation
pub struct VerdictClassifier;

impl VerdictClassifier {
    /// Truth table over (validator accepts, declared member)
    pub fn reconcile(accepted: bool, member: bool) -> Verdict {
        match (accepted, member) {
            (true, true) => Verdict::OkYes,
            (false, false) => Verdict::OkNo,
            (true, false) => Verdict::Miss,
            (false, true) => Verdict::Bad,
        }
    }

    /// Run the validator for `case` under `group` and classify the outcome
    ///
    /// Invocation failures and timeouts become `Unknown` with a diagnostic;
    /// they never propagate as errors.
    pub fn classify(validator: &dyn InputValidator, case: &TestCase, group: &Group) -> CellOutcome {
        let outcome = match validator.validate(&case.input, &group.flag_args()) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!(
                    "Validator invocation failed for {} in group {}: {}",
                    case.name,
                    group.name,
                    e
                );
                return CellOutcome::unknown(e.to_string());
            }
        };

        if outcome.timed_out {
            return CellOutcome::unknown(format!(
                "validator timed out after {} ms",
                outcome.wall_time_ms
            ));
        }

        let verdict = Self::reconcile(outcome.accepted(), case.is_member_of(&group.name));
        let diagnostic = (verdict == Verdict::Bad).then(|| CellDiagnostic::Rejection {
            flags: group.flags.clone(),
            outcome,
        });
        CellOutcome {
            verdict,
            diagnostic,
        }
    }
}
