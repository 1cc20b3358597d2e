//! Error types for the gym group domain

use thiserror::Error;

/// Domain rule violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid status value: {0:?}")]
    InvalidStatus(String),

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Authentication error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is required")]
    MissingToken,

    #[error("Invalid authorization format")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid user ID in token")]
    MissingSubject,
}
