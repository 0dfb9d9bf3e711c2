use serde::Serialize;

use crate::application::services::AttemptRecord;
use carbon_domain::calculation::StoredCalculation;
use carbon_domain::footprint::CalculationResult;
use carbon_domain::leaderboard::RankedEntry;

/// Where a value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Remote,
    Local,
}

impl DataSource {
    pub const REMOTE: &'static str = "remote";
    pub const LOCAL: &'static str = "local";

    /// Map a fallback strategy name to its source
    pub fn from_strategy(name: &str) -> Option<Self> {
        match name {
            Self::REMOTE => Some(DataSource::Remote),
            Self::LOCAL => Some(DataSource::Local),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Remote => Self::REMOTE,
            DataSource::Local => Self::LOCAL,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationOutcome {
    pub result: CalculationResult,
    pub source: DataSource,
    /// The local history record written for this calculation, if any
    pub stored: Option<StoredCalculation>,
    pub attempts: Vec<AttemptRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    /// Newest first
    pub calculations: Vec<StoredCalculation>,
    /// `None` when every source was skipped or failed
    pub source: Option<DataSource>,
    pub attempts: Vec<AttemptRecord>,
}

impl HistoryView {
    pub fn empty(attempts: Vec<AttemptRecord>) -> Self {
        Self {
            calculations: Vec::new(),
            source: None,
            attempts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardView {
    pub entries: Vec<RankedEntry>,
    pub source: Option<DataSource>,
    pub attempts: Vec<AttemptRecord>,
}
