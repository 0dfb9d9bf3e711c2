mod calculation_dto;
mod dashboard_dto;
mod session_dto;

pub use calculation_dto::{CalculationOutcome, DataSource, HistoryView, LeaderboardView};
pub use dashboard_dto::{CategoryAverageDto, DashboardSummaryDto, TrendPointDto};
pub use session_dto::{ConfigDto, SessionDto};
