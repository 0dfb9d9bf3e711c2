use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

use super::ResultExt;
use carbon_domain::calculation::{CalculationLog, StoredCalculation};
use carbon_domain::shared::DomainError;
use carbon_domain::storage::SlotStore;

/// Local calculation history kept as a single JSON array in one slot
pub struct JsonCalculationLog {
    store: Arc<dyn SlotStore>,
    slot: String,
}

impl JsonCalculationLog {
    pub fn new(store: Arc<dyn SlotStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    /// Raw entries currently in the slot. A missing slot, or one that does not
    /// hold a JSON array, yields no entries.
    async fn read_entries(&self) -> Result<Vec<Value>, DomainError> {
        let Some(raw) = self.store.get(&self.slot).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(other) => {
                warn!(
                    "Calculation log slot {} holds {} instead of an array; treating as empty",
                    self.slot,
                    json_kind(&other)
                );
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(
                    "Calculation log slot {} is not valid JSON ({}); treating as empty",
                    self.slot, e
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl CalculationLog for JsonCalculationLog {
    async fn append(&self, record: &StoredCalculation) -> Result<(), DomainError> {
        let mut entries = self.read_entries().await?;
        entries.push(serde_json::to_value(record).to_serialization_err()?);

        let serialized = serde_json::to_string(&entries).to_serialization_err()?;
        self.store.set(&self.slot, &serialized).await?;

        debug!(
            "Appended calculation {} to slot {} ({} entries)",
            record.id(),
            self.slot,
            entries.len()
        );
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<StoredCalculation>, DomainError> {
        let entries = self.read_entries().await?;
        let received = entries.len();
        let records = StoredCalculation::decode_lenient(entries);

        if records.len() < received {
            warn!(
                "Skipped {} malformed entr(y/ies) in calculation log slot {}",
                received - records.len(),
                self.slot
            );
        }

        Ok(records)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
