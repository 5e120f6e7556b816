//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A fixture name is empty or would escape the fixture store.
    #[error("invalid fixture name: {0:?}")]
    InvalidFixtureName(String),

    /// A content type selects neither the JSON nor the XML codec.
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
