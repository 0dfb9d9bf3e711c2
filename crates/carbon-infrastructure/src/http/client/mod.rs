mod calculate;
mod history;
mod leaderboard;
mod types;

pub use types::{
    decode_calculation_result, decode_calculations, decode_leaderboard, USER_AGENT,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, RequestBuilder};
use url::Url;

use crate::config::{parse_api_base_url, TimeoutConfig};
use carbon_domain::calculation::{RemoteCalculationApi, StoredCalculation};
use carbon_domain::footprint::{CalculationInput, CalculationResult};
use carbon_domain::leaderboard::LeaderboardEntry;
use carbon_domain::shared::DomainError;

/// Client for the carbon calculation network API
///
/// Every call is a single attempt bounded by the configured timeout; the
/// caller decides what to do on failure.
pub struct ApiClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeouts(base_url, &TimeoutConfig::default())
    }

    pub fn with_timeouts(base_url: &str, timeouts: &TimeoutConfig) -> Result<Self> {
        let base_url = parse_api_base_url(base_url).context("Invalid API base URL")?;
        Self::from_url(base_url, timeouts)
    }

    pub fn from_url(base_url: Url, timeouts: &TimeoutConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeouts.http_request)
            .connect_timeout(timeouts.http_connect)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, DomainError> {
        self.base_url
            .join(path)
            .map_err(|e| DomainError::Infrastructure(format!("Invalid endpoint {}: {}", path, e)))
    }

    pub(super) fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let request = request.header(header::ACCEPT, "application/json");
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and return the body of a 2xx response
    pub(super) async fn send(
        &self,
        operation_name: &str,
        request: RequestBuilder,
    ) -> Result<String, DomainError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!("{} response status: {}", operation_name, status);

        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(DomainError::RemoteService(format!(
                "{} failed with status {}: {}",
                operation_name,
                status,
                truncate(&body, 200)
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl RemoteCalculationApi for ApiClient {
    async fn calculate(
        &self,
        input: &CalculationInput,
        token: Option<&str>,
    ) -> Result<CalculationResult, DomainError> {
        self.post_calculate(input, token).await
    }

    async fn list_calculations(&self, token: &str) -> Result<Vec<StoredCalculation>, DomainError> {
        self.get_user_calculations(token).await
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        self.get_leaderboard().await
    }
}

fn map_transport_error(error: reqwest::Error) -> DomainError {
    if error.is_timeout() {
        DomainError::Timeout(error.to_string())
    } else if error.is_decode() {
        DomainError::Deserialization(error.to_string())
    } else {
        DomainError::Network(error.to_string())
    }
}

pub(super) fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
