use serde::Serialize;

use carbon_domain::shared::DomainError;

/// What a single strategy made of a request
#[derive(Debug)]
pub enum StrategyOutcome<T> {
    Success(T),
    /// The strategy does not apply (e.g. no token); not an error
    Skip(String),
    Failure(DomainError),
}

impl<T> From<Result<T, DomainError>> for StrategyOutcome<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(value) => StrategyOutcome::Success(value),
            Err(error) => StrategyOutcome::Failure(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum AttemptStatus {
    Succeeded,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptRecord {
    pub strategy: &'static str,
    #[serde(flatten)]
    pub status: AttemptStatus,
}

impl AttemptRecord {
    pub fn new(strategy: &'static str, status: AttemptStatus) -> Self {
        Self { strategy, status }
    }
}

/// Result of running a pipeline: the first success, if any, plus the trail of
/// attempts that led to it
#[derive(Debug)]
pub struct PipelineRun<T> {
    resolved: Option<(&'static str, T)>,
    attempts: Vec<AttemptRecord>,
}

impl<T> PipelineRun<T> {
    pub(super) fn resolved(strategy: &'static str, value: T, attempts: Vec<AttemptRecord>) -> Self {
        Self {
            resolved: Some((strategy, value)),
            attempts,
        }
    }

    pub(super) fn exhausted(attempts: Vec<AttemptRecord>) -> Self {
        Self {
            resolved: None,
            attempts,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Name of the strategy that produced the value
    pub fn resolved_by(&self) -> Option<&'static str> {
        self.resolved.as_ref().map(|(name, _)| *name)
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn into_parts(self) -> (Option<(&'static str, T)>, Vec<AttemptRecord>) {
        (self.resolved, self.attempts)
    }
}
