//! Captured HTTP exchange
//!
//! An [`HttpCapture`] is produced by the test harness that performed the real
//! call. It is read-only input to snapshot assembly.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One side of an HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeSide {
    /// The request sent by the test.
    Request,
    /// The response returned by the server.
    Response,
}

impl ExchangeSide {
    /// Returns `"request"` or `"response"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for ExchangeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `content_type` names JSON, including `+json` suffixes.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.parse::<mime::Mime>().is_ok_and(|parsed| {
        parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON)
    })
}

/// A raw request/response pair as observed on the wire.
///
/// Header and cookie maps keep the order in which they were captured.
/// A `null` body means no body was sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpCapture {
    /// HTTP method, e.g. `POST`.
    pub method: String,
    /// Absolute request URL including any query string.
    pub url: String,
    /// Request headers.
    #[serde(default)]
    pub request_headers: IndexMap<String, String>,
    /// Request body.
    #[serde(default)]
    pub request_body: Value,
    /// Response headers.
    #[serde(default)]
    pub response_headers: IndexMap<String, String>,
    /// Response body.
    #[serde(default)]
    pub response_body: Value,
    /// Response status code; absent when no response was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Cookies sent with the request.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub request_cookies: IndexMap<String, String>,
    /// Cookies set by the response.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub response_cookies: IndexMap<String, String>,
}

impl HttpCapture {
    /// Creates a capture of a request with no body, headers or response yet.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_request_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_request_body(mut self, body: Value) -> Self {
        self.request_body = body;
        self
    }

    /// Sets the response status.
    #[must_use]
    pub const fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_response_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response_headers.insert(name.into(), value.into());
        self
    }

    /// Sets the response body.
    #[must_use]
    pub fn with_response_body(mut self, body: Value) -> Self {
        self.response_body = body;
        self
    }

    /// Adds a request cookie.
    #[must_use]
    pub fn with_request_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_cookies.insert(name.into(), value.into());
        self
    }

    /// Adds a response cookie.
    #[must_use]
    pub fn with_response_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response_cookies.insert(name.into(), value.into());
        self
    }

    /// Headers of one side.
    #[must_use]
    pub const fn headers(&self, side: ExchangeSide) -> &IndexMap<String, String> {
        match side {
            ExchangeSide::Request => &self.request_headers,
            ExchangeSide::Response => &self.response_headers,
        }
    }

    /// Body of one side.
    #[must_use]
    pub const fn body(&self, side: ExchangeSide) -> &Value {
        match side {
            ExchangeSide::Request => &self.request_body,
            ExchangeSide::Response => &self.response_body,
        }
    }

    /// Body of one side as its fields are observed.
    ///
    /// A text body sent with a JSON `Content-Type` is parsed, so its
    /// top-level keys count as fields. Any other body is returned as captured.
    #[must_use]
    pub fn observed_body(&self, side: ExchangeSide) -> Cow<'_, Value> {
        let body = self.body(side);
        let Value::String(text) = body else {
            return Cow::Borrowed(body);
        };
        if !self.header(side, "content-type").is_some_and(is_json_content_type) {
            return Cow::Borrowed(body);
        }
        serde_json::from_str::<Value>(text).map_or(Cow::Borrowed(body), Cow::Owned)
    }

    /// Cookies of one side.
    #[must_use]
    pub const fn cookies(&self, side: ExchangeSide) -> &IndexMap<String, String> {
        match side {
            ExchangeSide::Request => &self.request_cookies,
            ExchangeSide::Response => &self.response_cookies,
        }
    }

    /// Looks up a header of one side, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, side: ExchangeSide, name: &str) -> Option<&str> {
        self.headers(side)
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if the response side carries any data.
    #[must_use]
    pub fn has_response_data(&self) -> bool {
        !self.response_body.is_null()
            || !self.response_headers.is_empty()
            || !self.response_cookies.is_empty()
    }
}
