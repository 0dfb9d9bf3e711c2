use carbon_domain::shared::{DomainError, ErrorCode, ErrorSeverity};
use carbon_infrastructure::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Structured error reported by CLI commands
///
/// Printed to stderr as JSON so scripts can react to:
/// - Error code for programmatic handling
/// - Human-readable message
/// - Severity level
/// - Recoverability flag for retry logic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    /// Numeric error code (1xxx-6xxx range)
    pub code: u16,

    /// Human-readable error message
    pub message: String,

    /// Error severity level
    pub severity: ErrorSeverity,

    /// Whether the operation can be retried
    pub recoverable: bool,
}

impl CommandError {
    /// Create an error from an error code and message
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    /// Create a generic infrastructure error
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationError, message)
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InvalidInput, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::Unauthenticated, message)
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self::infrastructure(message)
    }
}

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        Self::infrastructure(message.to_string())
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the context chain on one line
        Self::infrastructure(format!("{:#}", err))
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input(err.to_string())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}
