use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::application::dtos::CalculationOutcome;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use carbon_domain::footprint::CalculationInput;

/// Read a calculation input from a file, or from stdin when `source` is `-`
pub fn read_input(source: &str) -> Result<CalculationInput, CommandError> {
    let raw = if source == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        raw
    } else {
        std::fs::read_to_string(Path::new(source)).map_err(|e| {
            CommandError::invalid_input(format!("Cannot read input file {}: {}", source, e))
        })?
    };

    parse_input(&raw)
}

fn parse_input(raw: &str) -> Result<CalculationInput, CommandError> {
    if raw.trim().is_empty() {
        return Ok(CalculationInput::new());
    }
    Ok(serde_json::from_str(raw)?)
}

pub async fn calculate(
    state: &AppState,
    input: CalculationInput,
) -> Result<CalculationOutcome, CommandError> {
    let session = state.services.session.current().await;
    let outcome = state
        .services
        .calculation
        .calculate(input, session.as_ref())
        .await;

    info!(
        total = outcome.result.total,
        source = outcome.source.as_str(),
        recorded = outcome.stored.is_some(),
        "Calculation complete"
    );
    Ok(outcome)
}
