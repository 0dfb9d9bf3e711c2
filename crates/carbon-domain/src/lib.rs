// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod calculation;
pub mod footprint;
pub mod leaderboard;
pub mod session;
pub mod shared;
pub mod storage;

// Re-exports for convenience
pub use footprint::{calculate_emissions, CalculationInput, CalculationResult};
pub use shared::{CalculationId, DomainError, UserId};
