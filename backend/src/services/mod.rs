//! Business logic services
//!
//! Services validate input before any storage access and translate
//! repository errors into service errors.

pub mod group;

use crate::repositories::RepositoryError;
use gym_groups_shared::DomainError;
use thiserror::Error;

pub use group::{GroupManager, GroupService};

/// Service layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[source] RepositoryError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => ServiceError::NotFound(what),
            other => ServiceError::Storage(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
