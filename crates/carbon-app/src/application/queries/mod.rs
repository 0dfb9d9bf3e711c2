mod dashboard_queries;
mod leaderboard_queries;

pub use dashboard_queries::{summarize_history, DashboardQueryService};
pub use leaderboard_queries::LeaderboardQueryService;
