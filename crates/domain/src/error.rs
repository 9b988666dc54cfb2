//! Domain error types

use std::fmt;

use thiserror::Error;

/// Domain-level errors raised while describing, assembling or validating an exchange.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configuration was read or updated before `init`.
    #[error("configuration accessed before init")]
    NotInitialized,

    /// A descriptor was finalized without its required metadata.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Descriptor input had neither the list nor the record shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The captured exchange is internally inconsistent.
    #[error("incomplete capture: {0}")]
    IncompleteCapture(String),

    /// Strict mode found observed names that were never declared.
    #[error(transparent)]
    UnexpectedField(#[from] UnexpectedFieldError),

    /// Declared names were absent from the observed exchange.
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Observed fields or headers that the author never declared.
///
/// The message carries the offending names so a failing test points at the
/// exact mismatch:
///
/// ```
/// use restdocs_domain::UnexpectedFieldError;
///
/// let error = UnexpectedFieldError::new("request", "Unexpected fields", vec!["a".into(), "b".into()]);
/// assert_eq!(error.message(), "Unexpected fields: 'a', 'b'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedFieldError {
    context: String,
    message: String,
    extra_fields: Vec<String>,
}

impl UnexpectedFieldError {
    /// Creates an error for `context` listing `extra_fields` in observation order.
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        message: impl AsRef<str>,
        extra_fields: Vec<String>,
    ) -> Self {
        Self {
            context: context.into(),
            message: with_field_suffix(message.as_ref(), &extra_fields),
            extra_fields,
        }
    }

    /// The side of the exchange, `"request"`, `"response"` or empty.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The full message including the quoted field list.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The undeclared names, in the order they were observed.
    #[must_use]
    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }
}

impl From<&str> for UnexpectedFieldError {
    fn from(message: &str) -> Self {
        Self::new("", message, Vec::new())
    }
}

impl fmt::Display for UnexpectedFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UnexpectedFieldError {}

/// Declared fields or headers that never showed up in the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFieldError {
    context: String,
    message: String,
    missing_fields: Vec<String>,
}

impl MissingFieldError {
    /// Creates an error for `context` listing `missing_fields` in declaration order.
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        message: impl AsRef<str>,
        missing_fields: Vec<String>,
    ) -> Self {
        Self {
            context: context.into(),
            message: with_field_suffix(message.as_ref(), &missing_fields),
            missing_fields,
        }
    }

    /// The side of the exchange.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The full message including the quoted field list.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The declared names that were not observed.
    #[must_use]
    pub fn missing_fields(&self) -> &[String] {
        &self.missing_fields
    }
}

impl fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for MissingFieldError {}

fn with_field_suffix(message: &str, fields: &[String]) -> String {
    if fields.is_empty() {
        return message.to_string();
    }
    let quoted: Vec<String> = fields.iter().map(|field| format!("'{field}'")).collect();
    format!("{message}: {}", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_form_has_no_context() {
        let error = UnexpectedFieldError::from("msg");
        assert_eq!(error.message(), "msg");
        assert_eq!(error.context(), "");
        assert!(error.extra_fields().is_empty());
    }

    #[test]
    fn test_single_field_suffix() {
        let error = UnexpectedFieldError::new("response", "Unexpected fields", vec!["id".into()]);
        assert_eq!(error.to_string(), "Unexpected fields: 'id'");
    }

    #[test]
    fn test_multiple_fields_keep_order() {
        let error = UnexpectedFieldError::new("request", "m", vec!["a".into(), "b".into()]);
        assert_eq!(error.message(), "m: 'a', 'b'");
        assert_eq!(error.context(), "request");
        assert_eq!(error.extra_fields(), ["a", "b"]);
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let error: DomainError = UnexpectedFieldError::new("request", "m", vec!["x".into()]).into();
        assert_eq!(error.to_string(), "m: 'x'");
    }

    #[test]
    fn test_missing_field_message() {
        let error = MissingFieldError::new("response", "Missing fields", vec!["name".into()]);
        assert_eq!(error.message(), "Missing fields: 'name'");
        assert_eq!(error.missing_fields(), ["name"]);
    }
}
