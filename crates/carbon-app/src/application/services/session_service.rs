use std::sync::Arc;
use tracing::{info, warn};

use carbon_domain::session::{AuthSession, SessionContext};
use carbon_domain::shared::DomainError;
use carbon_domain::storage::SlotStore;

pub const SESSION_SLOT: &str = "carbon_session";

/// Keeps the in-process [`SessionContext`] and its persisted copy in step so a
/// login survives between command invocations
pub struct SessionService {
    context: Arc<SessionContext>,
    store: Arc<dyn SlotStore>,
    slot: String,
}

impl SessionService {
    pub fn new(context: Arc<SessionContext>, store: Arc<dyn SlotStore>) -> Self {
        Self {
            context,
            store,
            slot: SESSION_SLOT.to_string(),
        }
    }

    /// Load a persisted session into the context. A missing or unreadable
    /// session leaves the context signed out.
    pub async fn restore(&self) -> Option<AuthSession> {
        let raw = match self.store.get(&self.slot).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read persisted session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<AuthSession>(&raw) {
            Ok(session) if session.identity().is_some() => {
                self.context.login(session.clone()).await;
                Some(session)
            }
            Ok(_) => {
                warn!("Ignoring persisted session without a user id");
                None
            }
            Err(e) => {
                warn!("Ignoring unreadable persisted session: {}", e);
                None
            }
        }
    }

    pub async fn login(&self, session: AuthSession) -> Result<(), DomainError> {
        let serialized = serde_json::to_string(&session)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;
        self.store.set(&self.slot, &serialized).await?;

        info!(display_name = %session.display_name(), "Signed in");
        self.context.login(session).await;
        Ok(())
    }

    pub async fn logout(&self) -> Result<Option<AuthSession>, DomainError> {
        self.store.remove(&self.slot).await?;
        let previous = self.context.logout().await;
        if let Some(session) = &previous {
            info!(display_name = %session.display_name(), "Signed out");
        }
        Ok(previous)
    }

    pub async fn current(&self) -> Option<AuthSession> {
        self.context.current().await
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }
}
