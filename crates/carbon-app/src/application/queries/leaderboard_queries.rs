use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dtos::{DataSource, LeaderboardView};
use crate::application::services::{FallbackPipeline, Strategy, StrategyOutcome};
use carbon_domain::calculation::{CalculationLog, RemoteCalculationApi};
use carbon_domain::leaderboard::{entries_from_history, rank_entries, LeaderboardEntry};
use carbon_domain::session::AuthSession;

struct RemoteLeaderboard {
    api: Option<Arc<dyn RemoteCalculationApi>>,
}

#[async_trait]
impl Strategy<Option<AuthSession>, Vec<LeaderboardEntry>> for RemoteLeaderboard {
    fn name(&self) -> &'static str {
        DataSource::REMOTE
    }

    async fn attempt(
        &self,
        _session: &Option<AuthSession>,
    ) -> StrategyOutcome<Vec<LeaderboardEntry>> {
        match &self.api {
            Some(api) => api.leaderboard().await.into(),
            None => StrategyOutcome::Skip("no network API configured".to_string()),
        }
    }
}

/// Latest total per user recorded on this device
struct LocalLeaderboard {
    log: Arc<dyn CalculationLog>,
}

#[async_trait]
impl Strategy<Option<AuthSession>, Vec<LeaderboardEntry>> for LocalLeaderboard {
    fn name(&self) -> &'static str {
        DataSource::LOCAL
    }

    async fn attempt(
        &self,
        session: &Option<AuthSession>,
    ) -> StrategyOutcome<Vec<LeaderboardEntry>> {
        let records = match self.log.read_all().await {
            Ok(records) => records,
            Err(e) => return StrategyOutcome::Failure(e),
        };

        let mut names = HashMap::new();
        if let Some(session) = session {
            if let Some(user_id) = session.identity() {
                names.insert(user_id.clone(), session.display_name().to_string());
            }
        }

        StrategyOutcome::Success(entries_from_history(&records, &names))
    }
}

pub struct LeaderboardQueryService {
    pipeline: FallbackPipeline<Option<AuthSession>, Vec<LeaderboardEntry>>,
}

impl LeaderboardQueryService {
    pub fn new(
        remote: Option<Arc<dyn RemoteCalculationApi>>,
        log: Arc<dyn CalculationLog>,
    ) -> Self {
        let pipeline = FallbackPipeline::new("leaderboard")
            .then(RemoteLeaderboard { api: remote })
            .then(LocalLeaderboard { log });

        Self { pipeline }
    }

    /// Ranked ascending by total emissions. Never fails; empty when no source
    /// is available.
    pub async fn get_leaderboard(&self, session: Option<&AuthSession>) -> LeaderboardView {
        let (resolved, attempts) = self.pipeline.run(&session.cloned()).await.into_parts();

        match resolved {
            Some((strategy, entries)) => LeaderboardView {
                entries: rank_entries(entries),
                source: DataSource::from_strategy(strategy),
                attempts,
            },
            None => LeaderboardView {
                entries: Vec::new(),
                source: None,
                attempts,
            },
        }
    }
}
