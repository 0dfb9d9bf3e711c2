use log::{debug, info};

use super::types::decode_calculations;
use carbon_domain::calculation::StoredCalculation;
use carbon_domain::shared::DomainError;

impl super::ApiClient {
    /// Fetch the token owner's calculations from `GET /user/calculations`
    pub async fn get_user_calculations(
        &self,
        token: &str,
    ) -> Result<Vec<StoredCalculation>, DomainError> {
        let url = self.endpoint("user/calculations")?;
        debug!("Fetching calculation history from {}", url);

        let request = Self::authorize(self.client.get(url), Some(token));
        let body = self.send("Get user calculations", request).await?;
        let records = decode_calculations(&body)?;

        info!("Fetched {} calculation(s) from remote history", records.len());
        Ok(records)
    }
}
