mod calculation_service;
mod config_service;
mod fallback;
mod history_service;
mod session_service;

pub use calculation_service::CalculationService;
pub use config_service::{ConfigService, LogLevel, UnknownLogLevel};
pub use fallback::{
    AttemptRecord, AttemptStatus, FallbackPipeline, PipelineRun, Strategy, StrategyOutcome,
};
pub use history_service::HistoryService;
pub use session_service::{SessionService, SESSION_SLOT};

#[cfg(test)]
mod tests;
