//! Snippet catalogue

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Every kind of documentation fragment rendered from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnippetKind {
    /// A runnable `curl` command.
    CurlRequest,
    /// The raw HTTP request.
    HttpRequest,
    /// The raw HTTP response.
    HttpResponse,
    /// Path parameter table.
    PathParameters,
    /// Query parameter table.
    QueryParameters,
    /// Form parameter table.
    FormParameters,
    /// Request header table.
    RequestHeaders,
    /// Response header table.
    ResponseHeaders,
    /// Request cookie table.
    RequestCookies,
    /// Response cookie table.
    ResponseCookies,
    /// Pretty-printed request body.
    RequestBody,
    /// Pretty-printed response body.
    ResponseBody,
    /// Request field table.
    RequestFields,
    /// Response field table.
    ResponseFields,
    /// Multipart part table.
    RequestParts,
}

impl SnippetKind {
    /// Returns the snippet name, which is also its template name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CurlRequest => "curl-request",
            Self::HttpRequest => "http-request",
            Self::HttpResponse => "http-response",
            Self::PathParameters => "path-parameters",
            Self::QueryParameters => "query-parameters",
            Self::FormParameters => "form-parameters",
            Self::RequestHeaders => "request-headers",
            Self::ResponseHeaders => "response-headers",
            Self::RequestCookies => "request-cookies",
            Self::ResponseCookies => "response-cookies",
            Self::RequestBody => "request-body",
            Self::ResponseBody => "response-body",
            Self::RequestFields => "request-fields",
            Self::ResponseFields => "response-fields",
            Self::RequestParts => "request-parts",
        }
    }

    /// Get all snippet kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CurlRequest,
            Self::HttpRequest,
            Self::HttpResponse,
            Self::PathParameters,
            Self::QueryParameters,
            Self::FormParameters,
            Self::RequestHeaders,
            Self::ResponseHeaders,
            Self::RequestCookies,
            Self::ResponseCookies,
            Self::RequestBody,
            Self::ResponseBody,
            Self::RequestFields,
            Self::ResponseFields,
            Self::RequestParts,
        ]
    }
}

impl fmt::Display for SnippetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SnippetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown snippet: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = SnippetKind::all().iter().map(SnippetKind::name).collect();
        assert_eq!(names.len(), SnippetKind::all().len());
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for kind in SnippetKind::all() {
            assert_eq!(kind.name().parse::<SnippetKind>(), Ok(*kind));
        }
        assert!("openapi".parse::<SnippetKind>().is_err());
    }
}
