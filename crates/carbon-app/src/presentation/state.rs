use std::sync::Arc;

use crate::application::queries::{DashboardQueryService, LeaderboardQueryService};
use crate::application::services::{
    CalculationService, ConfigService, HistoryService, SessionService,
};
use carbon_domain::calculation::{CalculationLog, RemoteCalculationApi};
use carbon_domain::storage::SlotStore;
use carbon_infrastructure::config::TrackerConfig;
use carbon_infrastructure::persistence::Database;

pub struct Runtime {
    pub config: TrackerConfig,
    /// `None` for ephemeral runs backed by memory only
    pub db: Option<Arc<Database>>,
}

pub struct Ports {
    pub remote: Option<Arc<dyn RemoteCalculationApi>>,
    pub slots: Arc<dyn SlotStore>,
    pub calculation_log: Arc<dyn CalculationLog>,
}

pub struct Services {
    pub calculation: Arc<CalculationService>,
    pub history: Arc<HistoryService>,
    pub session: Arc<SessionService>,
    pub config: Arc<ConfigService>,
}

pub struct Queries {
    pub leaderboard: Arc<LeaderboardQueryService>,
    pub dashboard: Arc<DashboardQueryService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub ports: Ports,
    pub services: Services,
    pub queries: Queries,
}
