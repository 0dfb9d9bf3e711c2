use log::warn;
use serde::Deserialize;
use serde_json::Value;

use carbon_domain::calculation::StoredCalculation;
use carbon_domain::footprint::{Breakdown, CalculationResult};
use carbon_domain::leaderboard::LeaderboardEntry;
use carbon_domain::shared::DomainError;

pub const USER_AGENT: &str = concat!("carbon-tracker/", env!("CARGO_PKG_VERSION"));

/// Wire shape of a calculation response. Only `total` is mandatory.
#[derive(Debug, Deserialize)]
struct CalculationResultPayload {
    total: f64,
    #[serde(default)]
    breakdown: Option<Value>,
}

/// Decode a `POST /calculate` body. Fails unless the body is an object with a
/// numeric `total`; an unreadable breakdown is replaced by an empty one.
pub fn decode_calculation_result(body: &str) -> Result<CalculationResult, DomainError> {
    let payload: CalculationResultPayload = serde_json::from_str(body).map_err(|e| {
        DomainError::Deserialization(format!(
            "Calculation response has no numeric total: {} ({})",
            e,
            super::truncate(body, 200)
        ))
    })?;

    let breakdown = match payload.breakdown {
        None | Some(Value::Null) => Breakdown::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Ignoring malformed breakdown in calculation response: {}", e);
            Breakdown::default()
        }),
    };

    Ok(CalculationResult {
        total: payload.total,
        breakdown,
    })
}

fn decode_array(body: &str, what: &str) -> Result<Vec<Value>, DomainError> {
    serde_json::from_str::<Vec<Value>>(body).map_err(|e| {
        DomainError::Deserialization(format!(
            "Expected a JSON array of {}: {} ({})",
            what,
            e,
            super::truncate(body, 200)
        ))
    })
}

/// Decode a `GET /user/calculations` body. Entries that do not decode or lack
/// a numeric total are dropped.
pub fn decode_calculations(body: &str) -> Result<Vec<StoredCalculation>, DomainError> {
    let entries = decode_array(body, "calculations")?;
    let received = entries.len();
    let records = StoredCalculation::decode_lenient(entries);

    if records.len() < received {
        warn!(
            "Dropped {} malformed calculation(s) from remote history",
            received - records.len()
        );
    }

    Ok(records)
}

pub fn decode_leaderboard(body: &str) -> Result<Vec<LeaderboardEntry>, DomainError> {
    let entries = decode_array(body, "leaderboard entries")?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<LeaderboardEntry>(entry).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_result() {
        let body = r#"{
            "total": 42.5,
            "breakdown": {
                "transport": { "emissions": 40.0, "percentage": 94 },
                "electricity": { "emissions": 2.5, "percentage": 6 },
                "waste": { "emissions": 0, "percentage": 0 },
                "food": { "emissions": 0, "percentage": 0 }
            }
        }"#;

        let result = decode_calculation_result(body).unwrap();
        assert_eq!(result.total, 42.5);
        assert_eq!(result.breakdown.transport.percentage, 94);
        assert_eq!(result.breakdown.electricity.emissions, 2.5);
    }

    #[test]
    fn test_decode_requires_numeric_total() {
        assert!(decode_calculation_result(r#"{ "total": "42" }"#).is_err());
        assert!(decode_calculation_result(r#"{ "breakdown": {} }"#).is_err());
        assert!(decode_calculation_result("<html>oops</html>").is_err());
        assert!(decode_calculation_result("[]").is_err());
    }

    #[test]
    fn test_decode_tolerates_bad_breakdown() {
        let result =
            decode_calculation_result(r#"{ "total": 7, "breakdown": "n/a" }"#).unwrap();
        assert_eq!(result.total, 7.0);
        assert_eq!(result.breakdown, Breakdown::default());
    }

    #[test]
    fn test_decode_calculations_drops_invalid_entries() {
        let body = r#"[
            {
                "id": "r1",
                "userId": "u1",
                "createdAt": "2025-03-01T10:00:00Z",
                "inputData": { "waste": [{ "garbageBags": "1" }] },
                "resultData": { "total": 10.0 }
            },
            { "id": "r2", "userId": "u1", "createdAt": "2025-03-01T10:00:00Z", "inputData": {}, "resultData": {} },
            17
        ]"#;

        let records = decode_calculations(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id().as_str(), "r1");
        assert_eq!(records[0].total(), 10.0);
    }

    #[test]
    fn test_decode_calculations_requires_array() {
        assert!(decode_calculations(r#"{ "data": [] }"#).is_err());
    }

    #[test]
    fn test_decode_leaderboard() {
        let body = r#"[
            { "userId": "a", "totalEmissions": 12.5, "displayName": "Ann" },
            { "userId": "b", "totalEmissions": 8 },
            { "userId": "c" }
        ]"#;

        let entries = decode_leaderboard(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].display_name, "");
    }
}
