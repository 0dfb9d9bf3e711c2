use log::{debug, info};

use super::types::decode_calculation_result;
use carbon_domain::footprint::{CalculationInput, CalculationResult};
use carbon_domain::shared::DomainError;

impl super::ApiClient {
    /// Submit an input to `POST /calculate` - single attempt
    pub async fn post_calculate(
        &self,
        input: &CalculationInput,
        token: Option<&str>,
    ) -> Result<CalculationResult, DomainError> {
        let url = self.endpoint("calculate")?;
        debug!(
            "Submitting {} line item(s) to {} (authenticated: {})",
            input.item_count(),
            url,
            token.is_some()
        );

        let request = Self::authorize(self.client.post(url).json(input), token);
        let body = self.send("Calculate", request).await?;
        let result = decode_calculation_result(&body)?;

        info!("Remote calculation succeeded: total={}", result.total);
        Ok(result)
    }
}
