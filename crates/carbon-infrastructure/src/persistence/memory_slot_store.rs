use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use carbon_domain::shared::DomainError;
use carbon_domain::storage::SlotStore;

/// Process-local slot store; contents vanish with the process
#[derive(Debug, Default)]
pub struct InMemorySlotStore {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(slot: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.to_string(), value.to_string());
        Self {
            slots: RwLock::new(slots),
        }
    }
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn get(&self, slot: &str) -> Result<Option<String>, DomainError> {
        Ok(self.slots.read().await.get(slot).cloned())
    }

    async fn set(&self, slot: &str, value: &str) -> Result<(), DomainError> {
        self.slots
            .write()
            .await
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<(), DomainError> {
        self.slots.write().await.remove(slot);
        Ok(())
    }
}
