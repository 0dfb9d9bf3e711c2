use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::*;
use crate::application::dtos::DataSource;
use crate::application::queries::LeaderboardQueryService;
use carbon_domain::calculation::{CalculationLog, RemoteCalculationApi, StoredCalculation};
use carbon_domain::footprint::{
    calculate_emissions, CalculationInput, CalculationResult, TransportItem, TransportType,
    VehicleType, WasteItem,
};
use carbon_domain::leaderboard::LeaderboardEntry;
use carbon_domain::session::{AuthSession, SessionContext};
use carbon_domain::shared::{CalculationId, DomainError, UserId};
use carbon_domain::storage::SlotStore;
use carbon_infrastructure::persistence::InMemorySlotStore;

// Hand-written fakes

struct MemoryLog {
    records: RwLock<Vec<StoredCalculation>>,
}

impl MemoryLog {
    fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    fn with_records(records: Vec<StoredCalculation>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl CalculationLog for MemoryLog {
    async fn append(&self, record: &StoredCalculation) -> Result<(), DomainError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<StoredCalculation>, DomainError> {
        Ok(self.records.read().await.clone())
    }
}

/// Remote API whose responses are fixed up front; `None` means unreachable
#[derive(Default)]
struct FakeRemote {
    calculate: Option<CalculationResult>,
    history: Option<Vec<StoredCalculation>>,
    leaderboard: Option<Vec<LeaderboardEntry>>,
    calls: AtomicUsize,
    last_token: RwLock<Option<String>>,
}

impl FakeRemote {
    fn down() -> Self {
        Self::default()
    }

    fn unreachable() -> DomainError {
        DomainError::Network("connection refused".to_string())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteCalculationApi for FakeRemote {
    async fn calculate(
        &self,
        _input: &CalculationInput,
        token: Option<&str>,
    ) -> Result<CalculationResult, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.write().await = token.map(str::to_string);
        self.calculate.ok_or_else(Self::unreachable)
    }

    async fn list_calculations(&self, token: &str) -> Result<Vec<StoredCalculation>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.write().await = Some(token.to_string());
        self.history.clone().ok_or_else(Self::unreachable)
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.leaderboard.clone().ok_or_else(Self::unreachable)
    }
}

mockall::mock! {
    pub Log {}

    #[async_trait]
    impl CalculationLog for Log {
        async fn append(&self, record: &StoredCalculation) -> Result<(), DomainError>;
        async fn read_all(&self) -> Result<Vec<StoredCalculation>, DomainError>;
    }
}

mockall::mock! {
    pub Slots {}

    #[async_trait]
    impl SlotStore for Slots {
        async fn get(&self, slot: &str) -> Result<Option<String>, DomainError>;
        async fn set(&self, slot: &str, value: &str) -> Result<(), DomainError>;
        async fn remove(&self, slot: &str) -> Result<(), DomainError>;
    }
}

// Fixtures

fn session(user: &str, token: Option<&str>) -> AuthSession {
    AuthSession::new(
        UserId::from_string(user),
        format!("{} name", user),
        token.map(str::to_string),
    )
    .unwrap()
}

fn car_trip() -> CalculationInput {
    CalculationInput::new()
        .with(TransportItem::new(TransportType::Car, "100").with_vehicle(VehicleType::Medium))
}

fn record(user: &str, days_ago: i64, bags: &str) -> StoredCalculation {
    let input = CalculationInput::new().with(WasteItem::new(bags));
    let result = calculate_emissions(&input);
    StoredCalculation::restore(
        CalculationId::from_string(&format!("{}-{}", user, days_ago)),
        UserId::from_string(user),
        Utc::now() - Duration::days(days_ago),
        input,
        result,
    )
}

fn remote(api: FakeRemote) -> (Arc<FakeRemote>, Option<Arc<dyn RemoteCalculationApi>>) {
    let api = Arc::new(api);
    let port: Arc<dyn RemoteCalculationApi> = api.clone();
    (api, Some(port))
}

// Calculation

#[tokio::test]
async fn test_remote_result_is_returned_unchanged() {
    let remote_result = CalculationResult {
        total: 99.9,
        ..CalculationResult::zero()
    };
    let (api, port) = remote(FakeRemote {
        calculate: Some(remote_result),
        ..FakeRemote::default()
    });
    let log = Arc::new(MemoryLog::new());
    let service = CalculationService::new(port, log.clone());

    let user = session("u1", Some("tok"));
    let outcome = service.calculate(car_trip(), Some(&user)).await;

    assert_eq!(outcome.source, DataSource::Remote);
    assert_eq!(outcome.result, remote_result);
    assert!(outcome.stored.is_none());
    assert_eq!(log.len().await, 0);
    assert_eq!(api.last_token.read().await.as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_unreachable_remote_falls_back_and_records_once() {
    let (api, port) = remote(FakeRemote::down());
    let log = Arc::new(MemoryLog::new());
    let service = CalculationService::new(port, log.clone());

    let user = session("u1", None);
    let outcome = service.calculate(car_trip(), Some(&user)).await;

    assert_eq!(api.calls(), 1);
    assert_eq!(outcome.source, DataSource::Local);
    assert_eq!(outcome.result.total, 20.0);
    assert_eq!(outcome.result.breakdown.transport.percentage, 100);

    let records = log.read_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].input_data(), &car_trip());
    assert_eq!(records[0].result_data(), &outcome.result);
    assert!(records[0].belongs_to(&UserId::from_string("u1")));
    assert!(records[0].id().is_local());
    assert_eq!(outcome.stored.as_ref(), Some(&records[0]));

    assert_eq!(outcome.attempts.len(), 2);
    assert!(matches!(outcome.attempts[0].status, AttemptStatus::Failed(_)));
    assert_eq!(outcome.attempts[1].status, AttemptStatus::Succeeded);
}

#[tokio::test]
async fn test_anonymous_fallback_is_not_recorded() {
    let (_, port) = remote(FakeRemote::down());
    let log = Arc::new(MemoryLog::new());
    let service = CalculationService::new(port, log.clone());

    let outcome = service.calculate(car_trip(), None).await;

    assert_eq!(outcome.source, DataSource::Local);
    assert_eq!(outcome.result.total, 20.0);
    assert!(outcome.stored.is_none());
    assert_eq!(log.len().await, 0);
}

#[tokio::test]
async fn test_offline_skips_remote() {
    let log = Arc::new(MemoryLog::new());
    let service = CalculationService::new(None, log.clone());

    let user = session("u1", Some("tok"));
    let outcome = service.calculate(car_trip(), Some(&user)).await;

    assert_eq!(outcome.source, DataSource::Local);
    assert!(matches!(outcome.attempts[0].status, AttemptStatus::Skipped(_)));
    assert_eq!(log.len().await, 1);
}

#[tokio::test]
async fn test_record_failure_does_not_fail_calculation() {
    let mut log = MockLog::new();
    log.expect_append()
        .times(1)
        .returning(|_| Err(DomainError::Repository("disk full".to_string())));
    let service = CalculationService::new(None, Arc::new(log));

    let user = session("u1", None);
    let outcome = service.calculate(car_trip(), Some(&user)).await;

    assert_eq!(outcome.source, DataSource::Local);
    assert_eq!(outcome.result.total, 20.0);
    assert!(outcome.stored.is_none());
}

#[tokio::test]
async fn test_identical_inputs_give_identical_results() {
    let service = CalculationService::new(None, Arc::new(MemoryLog::new()));

    let first = service.calculate(car_trip(), None).await;
    let second = service.calculate(car_trip(), None).await;

    assert_eq!(first.result, second.result);
}

// History

#[tokio::test]
async fn test_history_without_token_reads_local_for_current_user_only() {
    let (api, port) = remote(FakeRemote::down());
    let log = Arc::new(MemoryLog::with_records(vec![
        record("u1", 3, "1"),
        record("u2", 1, "5"),
        record("u1", 0, "2"),
        record("u1", 1, "3"),
    ]));
    let service = HistoryService::new(port, log);

    let user = session("u1", None);
    let view = service.list_calculations(Some(&user)).await;

    assert_eq!(api.calls(), 0);
    assert_eq!(view.source, Some(DataSource::Local));
    let ids: Vec<&str> = view.calculations.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, vec!["u1-0", "u1-1", "u1-3"]);
}

#[tokio::test]
async fn test_history_prefers_remote_with_token() {
    let (api, port) = remote(FakeRemote {
        history: Some(vec![record("u1", 2, "1"), record("u1", 0, "4")]),
        ..FakeRemote::default()
    });
    let service = HistoryService::new(port, Arc::new(MemoryLog::new()));

    let user = session("u1", Some("tok"));
    let view = service.list_calculations(Some(&user)).await;

    assert_eq!(view.source, Some(DataSource::Remote));
    assert_eq!(view.calculations.len(), 2);
    assert_eq!(view.calculations[0].id().as_str(), "u1-0");
    assert_eq!(api.last_token.read().await.as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_remote_history_keeps_only_current_user() {
    let (_, port) = remote(FakeRemote {
        history: Some(vec![
            record("u1", 1, "1"),
            record("u2", 0, "2"),
            record("u1", 0, "3"),
        ]),
        ..FakeRemote::default()
    });
    let service = HistoryService::new(port, Arc::new(MemoryLog::new()));

    let user = session("u1", Some("tok"));
    let view = service.list_calculations(Some(&user)).await;

    assert_eq!(view.source, Some(DataSource::Remote));
    let users: Vec<&str> = view
        .calculations
        .iter()
        .map(|c| c.user_id().as_str())
        .collect();
    assert_eq!(users, vec!["u1", "u1"]);
}

#[tokio::test]
async fn test_history_remote_failure_falls_back_to_local() {
    let (_, port) = remote(FakeRemote::down());
    let log = Arc::new(MemoryLog::with_records(vec![record("u1", 0, "1")]));
    let service = HistoryService::new(port, log);

    let user = session("u1", Some("tok"));
    let view = service.list_calculations(Some(&user)).await;

    assert_eq!(view.source, Some(DataSource::Local));
    assert_eq!(view.calculations.len(), 1);
}

#[tokio::test]
async fn test_history_without_identity_is_empty() {
    let log = Arc::new(MemoryLog::with_records(vec![record("u1", 0, "1")]));
    let service = HistoryService::new(None, log);

    let view = service.list_calculations(None).await;

    assert!(view.calculations.is_empty());
    assert_eq!(view.source, None);
}

#[tokio::test]
async fn test_history_log_failure_is_empty_not_error() {
    let mut log = MockLog::new();
    log.expect_read_all()
        .returning(|| Err(DomainError::Repository("locked".to_string())));
    let service = HistoryService::new(None, Arc::new(log));

    let user = session("u1", None);
    let view = service.list_calculations(Some(&user)).await;

    assert!(view.calculations.is_empty());
    assert_eq!(view.attempts.len(), 2);
}

// Leaderboard

#[tokio::test]
async fn test_leaderboard_local_fallback_uses_latest_totals() {
    let log = Arc::new(MemoryLog::with_records(vec![
        record("u1", 2, "9"),
        record("u2", 1, "3"),
        record("u1", 0, "1"),
    ]));
    let service = LeaderboardQueryService::new(None, log);

    let user = session("u1", None);
    let view = service.get_leaderboard(Some(&user)).await;

    assert_eq!(view.source, Some(DataSource::Local));
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].rank, 1);
    assert_eq!(view.entries[0].entry.display_name, "u1 name");
    assert_eq!(view.entries[0].entry.total_emissions, 10.0);
    assert_eq!(view.entries[1].entry.display_name, "u2");
    assert_eq!(view.entries[1].entry.total_emissions, 30.0);
}

#[tokio::test]
async fn test_leaderboard_remote_entries_are_ranked_ascending() {
    let entry = |id: &str, total: f64| LeaderboardEntry {
        user_id: UserId::from_string(id),
        total_emissions: total,
        display_name: id.to_uppercase(),
    };
    let (_, port) = remote(FakeRemote {
        leaderboard: Some(vec![entry("a", 50.0), entry("b", 12.5), entry("c", 30.0)]),
        ..FakeRemote::default()
    });
    let service = LeaderboardQueryService::new(port, Arc::new(MemoryLog::new()));

    let view = service.get_leaderboard(None).await;

    assert_eq!(view.source, Some(DataSource::Remote));
    let order: Vec<&str> = view
        .entries
        .iter()
        .map(|e| e.entry.user_id.as_str())
        .collect();
    assert_eq!(order, vec!["b", "c", "a"]);
}

// Session

#[tokio::test]
async fn test_session_survives_restart() {
    let store: Arc<dyn SlotStore> = Arc::new(InMemorySlotStore::new());

    let first = SessionService::new(Arc::new(SessionContext::new()), store.clone());
    first.login(session("u1", Some("tok"))).await.unwrap();

    let second = SessionService::new(Arc::new(SessionContext::new()), store.clone());
    let restored = second.restore().await.unwrap();
    assert_eq!(restored.bearer_token(), Some("tok"));
    assert!(second.context().is_authenticated().await);

    second.logout().await.unwrap();
    assert!(store.get(SESSION_SLOT).await.unwrap().is_none());
    assert!(second.current().await.is_none());
}

#[tokio::test]
async fn test_unreadable_session_is_ignored() {
    let mut slots = MockSlots::new();
    slots
        .expect_get()
        .returning(|_| Ok(Some("{broken".to_string())));
    let service = SessionService::new(Arc::new(SessionContext::new()), Arc::new(slots));

    assert!(service.restore().await.is_none());
    assert!(!service.context().is_authenticated().await);
}

#[tokio::test]
async fn test_login_fails_when_session_cannot_be_stored() {
    let mut slots = MockSlots::new();
    slots
        .expect_set()
        .returning(|_, _| Err(DomainError::Repository("read-only".to_string())));
    let service = SessionService::new(Arc::new(SessionContext::new()), Arc::new(slots));

    assert!(service.login(session("u1", None)).await.is_err());
    assert!(service.current().await.is_none());
}
