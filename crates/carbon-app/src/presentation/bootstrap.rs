use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::queries::{DashboardQueryService, LeaderboardQueryService};
use crate::application::services::{
    CalculationService, ConfigService, HistoryService, SessionService,
};
use crate::presentation::state::{AppState, Ports, Queries, Runtime, Services};
use carbon_domain::calculation::{CalculationLog, RemoteCalculationApi};
use carbon_domain::session::SessionContext;
use carbon_domain::storage::SlotStore;
use carbon_infrastructure::config::TrackerConfig;
use carbon_infrastructure::http::ApiClient;
use carbon_infrastructure::persistence::{
    Database, InMemorySlotStore, JsonCalculationLog, SqliteSlotStore,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapOptions {
    /// Never contact the network API
    pub offline: bool,
    /// Keep all state in memory for this run only
    pub ephemeral: bool,
}

pub async fn build_app_state(
    config: TrackerConfig,
    config_service: Arc<ConfigService>,
    options: BootstrapOptions,
) -> Result<AppState> {
    let startup_started_at = Instant::now();

    // Local slot storage
    let started_at = Instant::now();
    let (db, slots): (Option<Arc<Database>>, Arc<dyn SlotStore>) = if options.ephemeral {
        info!("✓ Using in-memory storage (ephemeral run)");
        (None, Arc::new(InMemorySlotStore::new()))
    } else {
        let db_path = config.database_path();
        let db = Database::new(&db_path)
            .await
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
        db.run_migrations()
            .await
            .context("Failed to run database migrations")?;
        info!(
            "✓ Database ready at {} ({}ms)",
            db_path.display(),
            started_at.elapsed().as_millis()
        );

        let slots = SqliteSlotStore::new(db.pool().clone(), config.timeouts.db_query);
        (Some(Arc::new(db)), Arc::new(slots))
    };

    let calculation_log: Arc<dyn CalculationLog> =
        Arc::new(JsonCalculationLog::new(slots.clone(), config.storage_slot.clone()));

    // Network API
    let remote: Option<Arc<dyn RemoteCalculationApi>> = match &config.api_base_url {
        Some(url) if !options.offline => {
            let client = ApiClient::from_url(url.clone(), &config.timeouts)?;
            info!("✓ Network API at {}", url);
            Some(Arc::new(client))
        }
        Some(_) => {
            info!("✓ Offline mode requested; network API disabled");
            None
        }
        None => {
            info!("✓ No network API configured; running offline");
            None
        }
    };

    // Session
    let session = Arc::new(SessionService::new(
        Arc::new(SessionContext::new()),
        slots.clone(),
    ));
    session.restore().await;

    let history = Arc::new(HistoryService::new(remote.clone(), calculation_log.clone()));

    let services = Services {
        calculation: Arc::new(CalculationService::new(
            remote.clone(),
            calculation_log.clone(),
        )),
        history: history.clone(),
        session,
        config: config_service,
    };

    let queries = Queries {
        leaderboard: Arc::new(LeaderboardQueryService::new(
            remote.clone(),
            calculation_log.clone(),
        )),
        dashboard: Arc::new(DashboardQueryService::new(history)),
    };

    info!(
        "✓ App state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime { config, db },
        ports: Ports {
            remote,
            slots,
            calculation_log,
        },
        services,
        queries,
    })
}
