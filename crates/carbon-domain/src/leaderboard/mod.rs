use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calculation::StoredCalculation;
use crate::shared::UserId;

/// A user's standing on the global leaderboard (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub total_emissions: f64,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

/// Rank entries by ascending emissions; a smaller footprint ranks first.
/// Entries with a non-finite total are dropped. Equal totals keep their
/// incoming order and receive consecutive ranks.
pub fn rank_entries(entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
    let mut entries: Vec<LeaderboardEntry> = entries
        .into_iter()
        .filter(|entry| entry.total_emissions.is_finite())
        .collect();
    entries.sort_by(|a, b| a.total_emissions.total_cmp(&b.total_emissions));

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            rank: index + 1,
            entry,
        })
        .collect()
}

/// Build leaderboard entries from local history: each user's most recent
/// calculation total. `names` supplies display names for known users; other
/// users are shown by id.
pub fn entries_from_history(
    records: &[StoredCalculation],
    names: &HashMap<UserId, String>,
) -> Vec<LeaderboardEntry> {
    let mut latest: HashMap<&UserId, &StoredCalculation> = HashMap::new();
    let mut order: Vec<&UserId> = Vec::new();

    for record in records {
        let replace = match latest.get(record.user_id()) {
            Some(current) => current.created_at() < record.created_at(),
            None => {
                order.push(record.user_id());
                true
            }
        };
        if replace {
            latest.insert(record.user_id(), record);
        }
    }

    order
        .into_iter()
        .filter_map(|user_id| latest.get(user_id))
        .map(|record| LeaderboardEntry {
            user_id: record.user_id().clone(),
            total_emissions: record.total(),
            display_name: names
                .get(record.user_id())
                .cloned()
                .unwrap_or_else(|| record.user_id().to_string()),
        })
        .collect()
}
