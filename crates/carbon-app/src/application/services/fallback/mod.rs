//! Ordered primary → fallback execution
//!
//! A pipeline tries its strategies in order and stops at the first success.
//! Every attempt is recorded so callers can report where a value came from.

mod types;


pub use types::{AttemptRecord, AttemptStatus, PipelineRun, StrategyOutcome};

use async_trait::async_trait;
use tracing::{debug, info, warn};

/// One way of producing a `T` from a request `R`
#[async_trait]
pub trait Strategy<R, T>: Send + Sync
where
    R: Sync,
    T: Send,
{
    /// Short stable name used in logs and attempt records
    fn name(&self) -> &'static str;

    async fn attempt(&self, request: &R) -> StrategyOutcome<T>;
}

pub struct FallbackPipeline<R, T>
where
    R: Sync,
    T: Send,
{
    name: &'static str,
    strategies: Vec<Box<dyn Strategy<R, T>>>,
}

impl<R, T> FallbackPipeline<R, T>
where
    R: Sync,
    T: Send,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            strategies: Vec::new(),
        }
    }

    /// Append a strategy; strategies run in the order they were added
    pub fn then(mut self, strategy: impl Strategy<R, T> + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub async fn run(&self, request: &R) -> PipelineRun<T> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let name = strategy.name();
            match strategy.attempt(request).await {
                StrategyOutcome::Success(value) => {
                    debug!(pipeline = self.name, strategy = name, "strategy succeeded");
                    attempts.push(AttemptRecord::new(name, AttemptStatus::Succeeded));
                    return PipelineRun::resolved(name, value, attempts);
                }
                StrategyOutcome::Skip(reason) => {
                    debug!(pipeline = self.name, strategy = name, %reason, "strategy skipped");
                    attempts.push(AttemptRecord::new(name, AttemptStatus::Skipped(reason)));
                }
                StrategyOutcome::Failure(error) => {
                    warn!(
                        pipeline = self.name,
                        strategy = name,
                        code = error.code().code(),
                        "strategy failed, trying next: {}",
                        error
                    );
                    attempts.push(AttemptRecord::new(
                        name,
                        AttemptStatus::Failed(error.format_with_code()),
                    ));
                }
            }
        }

        info!(
            pipeline = self.name,
            attempts = attempts.len(),
            "all strategies exhausted"
        );
        PipelineRun::exhausted(attempts)
    }
}
