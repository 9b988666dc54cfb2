//! Application error types

use restdocs_domain::DomainError;
use thiserror::Error;

use crate::ports::{FileSystemError, TemplateError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A template could not be found or rendered.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Writing rendered snippets failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// A rendering context could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
