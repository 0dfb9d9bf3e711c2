use carbon_domain::shared::DomainError;

/// Extension trait for Result types to simplify error handling
pub trait ResultExt<T, E> {
    /// Convert error to DomainError::Infrastructure
    /// Usage: `result.to_infra_err()?`
    fn to_infra_err(self) -> Result<T, DomainError>;

    /// Convert error to DomainError::Repository, prefixed with the operation
    fn to_repo_err(self, operation: &str) -> Result<T, DomainError>;

    /// Convert error to DomainError::Serialization
    fn to_serialization_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }

    fn to_repo_err(self, operation: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{} failed: {}", operation, e)))
    }

    fn to_serialization_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Serialization(e.to_string()))
    }
}
