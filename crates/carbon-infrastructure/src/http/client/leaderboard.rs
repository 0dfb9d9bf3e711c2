use log::debug;

use super::types::decode_leaderboard;
use carbon_domain::leaderboard::LeaderboardEntry;
use carbon_domain::shared::DomainError;

impl super::ApiClient {
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let url = self.endpoint("leaderboard")?;
        debug!("Fetching leaderboard from {}", url);

        let request = Self::authorize(self.client.get(url), None);
        let body = self.send("Get leaderboard", request).await?;
        decode_leaderboard(&body)
    }
}
