use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::future::Future;
use std::time::Duration;

use super::ResultExt;
use carbon_domain::shared::DomainError;
use carbon_domain::storage::SlotStore;

/// Slot store backed by the `storage_slots` table
pub struct SqliteSlotStore {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl SqliteSlotStore {
    pub fn new(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &str, query: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.to_repo_err(operation),
            Err(_) => Err(DomainError::Timeout(format!(
                "{} timed out after {:?}",
                operation, self.query_timeout
            ))),
        }
    }
}

#[async_trait]
impl SlotStore for SqliteSlotStore {
    async fn get(&self, slot: &str) -> Result<Option<String>, DomainError> {
        let query = "SELECT value FROM storage_slots WHERE slot = ?1";

        self.bounded(
            "Read slot",
            sqlx::query_scalar::<_, String>(query)
                .bind(slot)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn set(&self, slot: &str, value: &str) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO storage_slots (slot, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slot) DO UPDATE SET
                value = ?2,
                updated_at = ?3
        "#;

        self.bounded(
            "Write slot",
            sqlx::query(query)
                .bind(slot)
                .bind(value)
                .bind(Utc::now().to_rfc3339())
                .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<(), DomainError> {
        self.bounded(
            "Remove slot",
            sqlx::query("DELETE FROM storage_slots WHERE slot = ?1")
                .bind(slot)
                .execute(&self.pool),
        )
        .await?;

        Ok(())
    }
}
