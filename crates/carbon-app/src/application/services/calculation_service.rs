use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::fallback::{FallbackPipeline, Strategy, StrategyOutcome};
use crate::application::dtos::{CalculationOutcome, DataSource};
use carbon_domain::calculation::{CalculationLog, RemoteCalculationApi, StoredCalculation};
use carbon_domain::footprint::{calculate_emissions, CalculationInput, CalculationResult};
use carbon_domain::session::AuthSession;
use carbon_domain::shared::DomainError;

struct CalculateRequest {
    input: CalculationInput,
    session: Option<AuthSession>,
}

/// Value produced by a calculate strategy
struct Computed {
    result: CalculationResult,
    stored: Option<StoredCalculation>,
}

/// `POST /calculate`; the server stores the calculation itself
struct RemoteCalculate {
    api: Option<Arc<dyn RemoteCalculationApi>>,
}

#[async_trait]
impl Strategy<CalculateRequest, Computed> for RemoteCalculate {
    fn name(&self) -> &'static str {
        DataSource::REMOTE
    }

    async fn attempt(&self, request: &CalculateRequest) -> StrategyOutcome<Computed> {
        let Some(api) = &self.api else {
            return StrategyOutcome::Skip("no network API configured".to_string());
        };

        let token = request.session.as_ref().and_then(|s| s.bearer_token());
        match api.calculate(&request.input, token).await {
            Ok(result) if result.is_valid() => StrategyOutcome::Success(Computed {
                result,
                stored: None,
            }),
            Ok(result) => StrategyOutcome::Failure(DomainError::Deserialization(format!(
                "Remote total is not a finite number: {}",
                result.total
            ))),
            Err(e) => StrategyOutcome::Failure(e),
        }
    }
}

/// Emission model on this device, recording the result for a known user
struct LocalCalculate {
    log: Arc<dyn CalculationLog>,
}

impl LocalCalculate {
    async fn persist(
        &self,
        request: &CalculateRequest,
        result: &CalculationResult,
    ) -> Option<StoredCalculation> {
        let Some(user_id) = request.session.as_ref().and_then(|s| s.identity()) else {
            debug!("No authenticated user; local calculation not recorded");
            return None;
        };

        let record =
            match StoredCalculation::new(user_id.clone(), request.input.clone(), *result) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Local calculation not recorded: {}", e);
                    return None;
                }
            };

        match self.log.append(&record).await {
            Ok(()) => {
                info!(
                    user_id = %user_id,
                    record_id = %record.id(),
                    "Recorded local calculation"
                );
                Some(record)
            }
            Err(e) => {
                warn!("Failed to record local calculation: {}", e.format_with_code());
                None
            }
        }
    }
}

#[async_trait]
impl Strategy<CalculateRequest, Computed> for LocalCalculate {
    fn name(&self) -> &'static str {
        DataSource::LOCAL
    }

    async fn attempt(&self, request: &CalculateRequest) -> StrategyOutcome<Computed> {
        let result = calculate_emissions(&request.input);
        let stored = self.persist(request, &result).await;
        StrategyOutcome::Success(Computed { result, stored })
    }
}

/// Calculate emissions, preferring the network API and falling back to the
/// local model. Never fails.
pub struct CalculationService {
    pipeline: FallbackPipeline<CalculateRequest, Computed>,
}

impl CalculationService {
    pub fn new(
        remote: Option<Arc<dyn RemoteCalculationApi>>,
        log: Arc<dyn CalculationLog>,
    ) -> Self {
        let pipeline = FallbackPipeline::new("calculate")
            .then(RemoteCalculate { api: remote })
            .then(LocalCalculate { log });

        Self { pipeline }
    }

    pub async fn calculate(
        &self,
        input: CalculationInput,
        session: Option<&AuthSession>,
    ) -> CalculationOutcome {
        log_item_issues(&input);

        let request = CalculateRequest {
            input,
            session: session.cloned(),
        };
        let (resolved, attempts) = self.pipeline.run(&request).await.into_parts();

        match resolved {
            Some((strategy, computed)) => CalculationOutcome {
                result: computed.result,
                source: DataSource::from_strategy(strategy).unwrap_or(DataSource::Local),
                stored: computed.stored,
                attempts,
            },
            None => {
                warn!("Calculation strategies exhausted; using local model without recording");
                CalculationOutcome {
                    result: calculate_emissions(&request.input),
                    source: DataSource::Local,
                    stored: None,
                    attempts,
                }
            }
        }
    }
}

fn log_item_issues(input: &CalculationInput) {
    for (index, item) in input.line_items().iter().enumerate() {
        for issue in item.issues() {
            debug!(
                category = item.category().as_str(),
                index,
                "Line item excluded or defaulted: {}",
                issue
            );
        }
    }
}
