/// Structured check events
///
/// Each event is serialized to one JSON line and emitted through `log`
/// under the `subtask_inclusion::events` target, so `RUST_LOG` controls it
/// like any other log output. Events of one run share a run ID.
use serde::Serialize;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub const EVENT_TARGET: &str = "subtask_inclusion::events";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckEventType {
    ProblemStart,
    ProblemSkipped,
    BuildFailed,
    ProblemFailed,
    InvocationAnomaly,
    ProblemFinished,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckEvent {
    pub run_id: String,
    pub timestamp_ms: u128,
    pub event_type: CheckEventType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Run ID shared by every event of this process
pub fn run_id() -> &'static str {
    static RUN_ID: OnceLock<String> = OnceLock::new();
    RUN_ID.get_or_init(|| Uuid::new_v4().to_string())
}

impl CheckEvent {
    pub fn new(event_type: CheckEventType, message: impl Into<String>) -> Self {
        Self {
            run_id: run_id().to_string(),
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            event_type,
            message: message.into(),
            problem: None,
            test_case: None,
            group: None,
        }
    }

    pub fn with_problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = Some(problem.into());
        self
    }

    pub fn with_cell(mut self, test_case: impl Into<String>, group: impl Into<String>) -> Self {
        self.test_case = Some(test_case.into());
        self.group = Some(group.into());
        self
    }

    fn level(&self) -> log::Level {
        match self.event_type {
            CheckEventType::ProblemStart | CheckEventType::ProblemFinished => log::Level::Info,
            CheckEventType::ProblemSkipped | CheckEventType::InvocationAnomaly => log::Level::Warn,
            CheckEventType::BuildFailed | CheckEventType::ProblemFailed => log::Level::Error,
        }
    }
}

pub fn emit(event: CheckEvent) {
    match serde_json::to_string(&event) {
        Ok(json) => log::log!(target: EVENT_TARGET, event.level(), "{}", json),
        Err(e) => log::warn!("Failed to serialize check event: {}", e),
    }
}

pub mod events {
    use super::*;

    pub fn problem_start(problem: &str) {
        emit(CheckEvent::new(CheckEventType::ProblemStart, "checking problem").with_problem(problem));
    }

    pub fn problem_skipped(problem: &str, reason: &str) {
        emit(CheckEvent::new(CheckEventType::ProblemSkipped, reason).with_problem(problem));
    }

    pub fn build_failed(problem: &str, stderr: &str) {
        emit(CheckEvent::new(CheckEventType::BuildFailed, stderr).with_problem(problem));
    }

    pub fn problem_failed(problem: &str, error: &str) {
        emit(CheckEvent::new(CheckEventType::ProblemFailed, error).with_problem(problem));
    }

    pub fn invocation_anomaly(problem: &str, test_case: &str, group: &str, reason: &str) {
        emit(
            CheckEvent::new(CheckEventType::InvocationAnomaly, reason)
                .with_problem(problem)
                .with_cell(test_case, group),
        );
    }

    pub fn problem_finished(problem: &str, misses: usize, bads: usize, unknowns: usize) {
        emit(
            CheckEvent::new(
                CheckEventType::ProblemFinished,
                format!("misses={} bads={} unknowns={}", misses, bads, unknowns),
            )
            .with_problem(problem),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = CheckEvent::new(CheckEventType::InvocationAnomaly, "validator timed out")
            .with_problem("contest/hello")
            .with_cell("3.in", "group2");
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "invocation_anomaly");
        assert_eq!(json["problem"], "contest/hello");
        assert_eq!(json["test_case"], "3.in");
        assert_eq!(json["group"], "group2");
        assert_eq!(json["run_id"], run_id());
    }

    #[test]
    fn test_optional_fields_omitted() {
        let event = CheckEvent::new(CheckEventType::ProblemStart, "checking problem");
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("test_case"));
        assert!(!json.contains("\"problem\""));
    }

    #[test]
    fn test_run_id_is_stable() {
        assert_eq!(run_id(), run_id());
        assert_eq!(event_level(CheckEventType::BuildFailed), log::Level::Error);
    }

    fn event_level(event_type: CheckEventType) -> log::Level {
        CheckEvent::new(event_type, "").level()
    }
}
