use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::fallback::{FallbackPipeline, Strategy, StrategyOutcome};
use crate::application::dtos::{DataSource, HistoryView};
use carbon_domain::calculation::{CalculationLog, RemoteCalculationApi, StoredCalculation};
use carbon_domain::session::AuthSession;

struct RemoteHistory {
    api: Option<Arc<dyn RemoteCalculationApi>>,
}

#[async_trait]
impl Strategy<Option<AuthSession>, Vec<StoredCalculation>> for RemoteHistory {
    fn name(&self) -> &'static str {
        DataSource::REMOTE
    }

    async fn attempt(
        &self,
        session: &Option<AuthSession>,
    ) -> StrategyOutcome<Vec<StoredCalculation>> {
        let Some(api) = &self.api else {
            return StrategyOutcome::Skip("no network API configured".to_string());
        };
        let Some(session) = session else {
            return StrategyOutcome::Skip("no authenticated user".to_string());
        };
        let (Some(user_id), Some(token)) = (session.identity(), session.bearer_token()) else {
            return StrategyOutcome::Skip("no bearer token".to_string());
        };

        api.list_calculations(token)
            .await
            .map(|mut records| {
                let received = records.len();
                records.retain(|r| r.belongs_to(user_id) && r.result_data().is_valid());
                if records.len() < received {
                    debug!(
                        user_id = %user_id,
                        dropped = received - records.len(),
                        "Dropped remote records for other users or without a total"
                    );
                }
                StoredCalculation::sort_newest_first(&mut records);
                records
            })
            .into()
    }
}

struct LocalHistory {
    log: Arc<dyn CalculationLog>,
}

#[async_trait]
impl Strategy<Option<AuthSession>, Vec<StoredCalculation>> for LocalHistory {
    fn name(&self) -> &'static str {
        DataSource::LOCAL
    }

    async fn attempt(
        &self,
        session: &Option<AuthSession>,
    ) -> StrategyOutcome<Vec<StoredCalculation>> {
        let Some(user_id) = session.as_ref().and_then(|s| s.identity()) else {
            return StrategyOutcome::Skip("no authenticated user".to_string());
        };

        match self.log.read_all().await {
            Ok(records) => {
                let mut mine: Vec<StoredCalculation> = records
                    .into_iter()
                    .filter(|r| r.belongs_to(user_id) && r.result_data().is_valid())
                    .collect();
                StoredCalculation::sort_newest_first(&mut mine);
                debug!(user_id = %user_id, count = mine.len(), "Loaded local history");
                StrategyOutcome::Success(mine)
            }
            Err(e) => StrategyOutcome::Failure(e),
        }
    }
}

/// The current user's calculation history, newest first. Never fails: with no
/// identity or no readable source the history is empty.
pub struct HistoryService {
    pipeline: FallbackPipeline<Option<AuthSession>, Vec<StoredCalculation>>,
}

impl HistoryService {
    pub fn new(
        remote: Option<Arc<dyn RemoteCalculationApi>>,
        log: Arc<dyn CalculationLog>,
    ) -> Self {
        let pipeline = FallbackPipeline::new("list_calculations")
            .then(RemoteHistory { api: remote })
            .then(LocalHistory { log });

        Self { pipeline }
    }

    pub async fn list_calculations(&self, session: Option<&AuthSession>) -> HistoryView {
        let (resolved, attempts) = self.pipeline.run(&session.cloned()).await.into_parts();

        match resolved {
            Some((strategy, calculations)) => HistoryView {
                calculations,
                source: DataSource::from_strategy(strategy),
                attempts,
            },
            None => HistoryView::empty(attempts),
        }
    }
}
