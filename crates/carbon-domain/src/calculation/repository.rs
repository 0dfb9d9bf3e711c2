use async_trait::async_trait;

use super::StoredCalculation;
use crate::footprint::{CalculationInput, CalculationResult};
use crate::leaderboard::LeaderboardEntry;
use crate::shared::DomainError;

/// The network API that computes and stores calculations server-side
#[async_trait]
pub trait RemoteCalculationApi: Send + Sync {
    /// `POST /calculate`. A bearer token is attached when given.
    async fn calculate(
        &self,
        input: &CalculationInput,
        token: Option<&str>,
    ) -> Result<CalculationResult, DomainError>;

    /// `GET /user/calculations` for the token's owner
    async fn list_calculations(&self, token: &str) -> Result<Vec<StoredCalculation>, DomainError>;

    /// `GET /leaderboard`
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError>;
}

/// Append-only local history shared by every user on this device
#[async_trait]
pub trait CalculationLog: Send + Sync {
    /// Append one record (read whole log, push, write whole log back).
    async fn append(&self, record: &StoredCalculation) -> Result<(), DomainError>;

    /// Every decodable record in insertion order. A missing or corrupt log
    /// reads as empty.
    async fn read_all(&self) -> Result<Vec<StoredCalculation>, DomainError>;
}
