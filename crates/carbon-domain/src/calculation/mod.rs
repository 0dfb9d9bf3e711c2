mod repository;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::footprint::{CalculationInput, CalculationResult};
use crate::shared::{CalculationId, DomainError, UserId};

pub use repository::{CalculationLog, RemoteCalculationApi};

/// A submitted calculation as kept in history
///
/// Created once on submit and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCalculation {
    id: CalculationId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    input_data: CalculationInput,
    result_data: CalculationResult,
}

impl StoredCalculation {
    /// Record a fresh local calculation for a user
    pub fn new(
        user_id: UserId,
        input_data: CalculationInput,
        result_data: CalculationResult,
    ) -> Result<Self, DomainError> {
        if user_id.is_empty() {
            return Err(DomainError::Validation(
                "Stored calculation requires a user id".to_string(),
            ));
        }
        if !result_data.is_valid() {
            return Err(DomainError::Validation(
                "Stored calculation requires a finite total".to_string(),
            ));
        }

        Ok(Self {
            id: CalculationId::local(),
            user_id,
            created_at: Utc::now(),
            input_data,
            result_data,
        })
    }

    /// Restore a record from storage
    pub fn restore(
        id: CalculationId,
        user_id: UserId,
        created_at: DateTime<Utc>,
        input_data: CalculationInput,
        result_data: CalculationResult,
    ) -> Self {
        Self {
            id,
            user_id,
            created_at,
            input_data,
            result_data,
        }
    }

    /// Decode records one by one, dropping any that are malformed or lack a
    /// numeric total
    pub fn decode_lenient(entries: Vec<Value>) -> Vec<StoredCalculation> {
        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<StoredCalculation>(entry).ok())
            .filter(|record| record.result_data.is_valid())
            .collect()
    }

    /// Sort newest first
    pub fn sort_newest_first(records: &mut [StoredCalculation]) {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    // Getters
    pub fn id(&self) -> &CalculationId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn input_data(&self) -> &CalculationInput {
        &self.input_data
    }

    pub fn result_data(&self) -> &CalculationResult {
        &self.result_data
    }

    pub fn total(&self) -> f64 {
        self.result_data.total
    }
}
