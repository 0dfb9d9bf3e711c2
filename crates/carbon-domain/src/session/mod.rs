use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::shared::{DomainError, UserId};

/// Session value object
/// The identity handed over by the external auth provider after login.
///
/// Passed explicitly to every operation that needs to know who is asking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    user_id: UserId,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl AuthSession {
    /// Create a new session
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, DomainError> {
        if user_id.is_empty() {
            return Err(DomainError::Validation(
                "Session user id cannot be empty".to_string(),
            ));
        }
        if matches!(&token, Some(token) if token.trim().is_empty()) {
            return Err(DomainError::Validation(
                "Session token cannot be blank".to_string(),
            ));
        }

        Ok(Self {
            user_id,
            display_name: display_name.into(),
            token,
        })
    }

    /// Restore session from persistence without validation
    pub fn restore(user_id: UserId, display_name: String, token: Option<String>) -> Self {
        Self {
            user_id,
            display_name,
            token,
        }
    }

    /// The user id, if the session carries a usable one
    pub fn identity(&self) -> Option<&UserId> {
        if self.user_id.is_empty() {
            None
        } else {
            Some(&self.user_id)
        }
    }

    /// Bearer token for the network API, ignoring blank values
    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn display_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            self.user_id.as_str()
        } else {
            &self.display_name
        }
    }
}

/// Holder for the current session; lifetime bounded by login and logout
#[derive(Debug, Default)]
pub struct SessionContext {
    current: RwLock<Option<AuthSession>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: AuthSession) -> Self {
        Self {
            current: RwLock::new(Some(session)),
        }
    }

    /// Replace any existing session
    pub async fn login(&self, session: AuthSession) {
        *self.current.write().await = Some(session);
    }

    /// Drop the current session, returning it if there was one
    pub async fn logout(&self) -> Option<AuthSession> {
        self.current.write().await.take()
    }

    pub async fn current(&self) -> Option<AuthSession> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}
