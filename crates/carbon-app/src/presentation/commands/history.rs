use crate::application::dtos::{DashboardSummaryDto, HistoryView, LeaderboardView};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

pub async fn history(state: &AppState, limit: Option<usize>) -> Result<HistoryView, CommandError> {
    let session = state.services.session.current().await;
    let mut view = state
        .services
        .history
        .list_calculations(session.as_ref())
        .await;

    if let Some(limit) = limit {
        view.calculations.truncate(limit);
    }
    Ok(view)
}

pub async fn leaderboard(
    state: &AppState,
    limit: Option<usize>,
) -> Result<LeaderboardView, CommandError> {
    let session = state.services.session.current().await;
    let mut view = state
        .queries
        .leaderboard
        .get_leaderboard(session.as_ref())
        .await;

    if let Some(limit) = limit {
        view.entries.truncate(limit);
    }
    Ok(view)
}

pub async fn dashboard(state: &AppState) -> Result<DashboardSummaryDto, CommandError> {
    let session = state.services.session.current().await;
    if session.is_none() {
        return Err(CommandError::unauthenticated(
            "Sign in with `carbon-tracker login` to see a dashboard",
        ));
    }

    Ok(state.queries.dashboard.get_dashboard(session.as_ref()).await)
}
