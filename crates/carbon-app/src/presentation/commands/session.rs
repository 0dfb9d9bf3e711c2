use crate::application::dtos::SessionDto;
use crate::presentation::error::CommandError;
use crate::presentation::output::Message;
use crate::presentation::state::AppState;
use carbon_domain::session::AuthSession;
use carbon_domain::shared::UserId;

pub async fn login(
    state: &AppState,
    user_id: &str,
    display_name: Option<String>,
    token: Option<String>,
) -> Result<SessionDto, CommandError> {
    let user_id = user_id.trim();
    let session = AuthSession::new(
        UserId::from_string(user_id),
        display_name.unwrap_or_else(|| user_id.to_string()),
        token,
    )?;

    state.services.session.login(session.clone()).await?;
    Ok(SessionDto::from(&session))
}

pub async fn logout(state: &AppState) -> Result<Message, CommandError> {
    let message = match state.services.session.logout().await? {
        Some(session) => format!("Signed out {}", session.display_name()),
        None => "Not signed in".to_string(),
    };
    Ok(Message::new(message))
}

pub async fn whoami(state: &AppState) -> Result<SessionDto, CommandError> {
    state
        .services
        .session
        .current()
        .await
        .map(|session| SessionDto::from(&session))
        .ok_or_else(|| CommandError::unauthenticated("Not signed in"))
}
