use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(CalculationId);

impl CalculationId {
    /// Synthetic id for records written by the local fallback path
    pub fn local() -> Self {
        Self(format!("local-{}", Uuid::new_v4()))
    }

    pub fn is_local(&self) -> bool {
        self.0.starts_with("local-")
    }
}

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1xxx)
    Unauthenticated = 1001,

    // Resource Not Found (2xxx)
    NotFound = 2001,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    NetworkError = 5002,
    TimeoutError = 5003,
    ExternalServiceError = 5004,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::Unauthenticated
            | ErrorCode::NetworkError
            | ErrorCode::TimeoutError
            | ErrorCode::ExternalServiceError
            | ErrorCode::SerializationError => ErrorSeverity::Warning,

            ErrorCode::NotFound | ErrorCode::ValidationError | ErrorCode::InvalidInput => {
                ErrorSeverity::Info
            }

            ErrorCode::RepositoryError | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Transient failures that the fallback path is expected to absorb
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError
                | ErrorCode::TimeoutError
                | ErrorCode::ExternalServiceError
                | ErrorCode::SerializationError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Remote service error: {0}")]
    RemoteService(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::NotFound(_) => ErrorCode::NotFound,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Network(_) => ErrorCode::NetworkError,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::RemoteService(_) => ErrorCode::ExternalServiceError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Network(msg)
            | DomainError::Timeout(msg)
            | DomainError::RemoteService(msg)
            | DomainError::Validation(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
