use serde::Serialize;

use carbon_domain::session::AuthSession;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user_id: String,
    pub display_name: String,
    pub has_token: bool,
}

impl From<&AuthSession> for SessionDto {
    fn from(session: &AuthSession) -> Self {
        Self {
            user_id: session
                .identity()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            display_name: session.display_name().to_string(),
            has_token: session.bearer_token().is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    pub log_level: String,
    pub api_base_url: Option<String>,
    pub data_dir: String,
    pub log_dir: String,
    pub storage_slot: String,
    pub offline: bool,
}
