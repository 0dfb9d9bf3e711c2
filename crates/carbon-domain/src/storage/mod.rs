use async_trait::async_trait;

use crate::shared::DomainError;

/// Named slots each holding one text document, like browser local storage
#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn get(&self, slot: &str) -> Result<Option<String>, DomainError>;

    /// Overwrite the slot; last writer wins
    async fn set(&self, slot: &str, value: &str) -> Result<(), DomainError>;

    async fn remove(&self, slot: &str) -> Result<(), DomainError>;
}
