//! Application services: pure functions over repository traits.

use thiserror::Error;

use crate::derivation::InvalidDate;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod clients;
pub mod export;
pub mod tickets;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<InvalidDate> for ServiceError {
    fn from(err: InvalidDate) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
