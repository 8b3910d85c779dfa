use storefront_core::DomainError;
use storefront_infra::RepositoryError;
use thiserror::Error;

/// Failure of an application use case.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Whether the use case failed because the aggregate does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Repository(RepositoryError::NotFound(_)))
    }
}
