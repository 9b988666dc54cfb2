//! Request and response snippet contexts: curl, raw HTTP, cookies

use restdocs_domain::{DocumentSnapshot, ExchangeSide, HttpCapture};
use serde::Serialize;
use url::Url;

use super::body::{body_context, is_empty_body, wire_body};
use crate::ApplicationResult;

/// A header or cookie as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameValue {
    /// Header or cookie name.
    pub name: String,
    /// Raw value.
    pub value: String,
}

impl NameValue {
    fn list<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a String)>) -> Vec<Self> {
        pairs
            .into_iter()
            .map(|(name, value)| Self {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }
}

/// Context of the `curl-request` snippet. Values are shell-quoted already.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurlContext {
    /// Request URL.
    pub url: String,
    /// Upper-case method.
    pub method: String,
    /// Request headers in capture order.
    pub headers: Vec<NameValue>,
    /// `name=value` pairs joined by `; `, if any cookie was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    /// Request body as sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Context of the `http-request` snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestContext {
    /// Upper-case method.
    pub method: String,
    /// Path and query string.
    pub path: String,
    /// `Host` line value, unless the capture carries a `Host` header itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Request headers in capture order.
    pub headers: Vec<NameValue>,
    /// Formatted body ending with a newline, empty without a body.
    pub body: String,
    /// Whether a body was sent.
    pub has_body: bool,
}

/// Context of the `http-response` snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponseContext {
    /// Status code, absent when no response was captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Canonical reason phrase, empty for unregistered codes.
    pub status_reason: String,
    /// Response headers in capture order.
    pub headers: Vec<NameValue>,
    /// Formatted body ending with a newline, empty without a body.
    pub body: String,
    /// Whether a body was returned.
    pub has_body: bool,
}

/// Context of the cookie snippets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CookieContext {
    /// Cookies in capture order.
    pub items: Vec<NameValue>,
}

/// Builds the `curl` command context.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn curl_request(snapshot: &DocumentSnapshot) -> ApplicationResult<CurlContext> {
    let http = snapshot.http();
    let headers = NameValue::list(&http.request_headers)
        .into_iter()
        .map(|h| NameValue {
            name: shell_quote(&h.name),
            value: shell_quote(&h.value),
        })
        .collect();
    let cookie = (!http.request_cookies.is_empty()).then(|| {
        let pairs: Vec<String> = http
            .request_cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        shell_quote(&pairs.join("; "))
    });

    Ok(CurlContext {
        url: shell_quote(&http.url),
        method: http.method.to_uppercase(),
        headers,
        cookie,
        data: wire_body(&http.request_body)?.map(|body| shell_quote(&body)),
    })
}

/// Builds the raw HTTP request context.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn http_request(snapshot: &DocumentSnapshot) -> ApplicationResult<HttpRequestContext> {
    let http = snapshot.http();
    let (path, host) = match Url::parse(&http.url) {
        Ok(url) => (path_and_query(&url), authority(&url)),
        Err(_) => (http.url.clone(), None),
    };
    let host = host.filter(|_| http.header(ExchangeSide::Request, "host").is_none());

    Ok(HttpRequestContext {
        method: http.method.to_uppercase(),
        path,
        host,
        headers: NameValue::list(&http.request_headers),
        body: formatted_body(http, ExchangeSide::Request)?,
        has_body: !is_empty_body(&http.request_body),
    })
}

/// Builds the raw HTTP response context.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn http_response(snapshot: &DocumentSnapshot) -> ApplicationResult<HttpResponseContext> {
    let http = snapshot.http();
    let status_reason = http
        .status_code
        .and_then(|code| http::StatusCode::from_u16(code).ok())
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
        .to_string();

    Ok(HttpResponseContext {
        status_code: http.status_code,
        status_reason,
        headers: NameValue::list(&http.response_headers),
        body: formatted_body(http, ExchangeSide::Response)?,
        has_body: !is_empty_body(&http.response_body),
    })
}

/// Builds the request cookie context.
#[must_use]
pub fn request_cookies(snapshot: &DocumentSnapshot) -> CookieContext {
    CookieContext {
        items: NameValue::list(snapshot.http().cookies(ExchangeSide::Request)),
    }
}

/// Builds the response cookie context.
#[must_use]
pub fn response_cookies(snapshot: &DocumentSnapshot) -> CookieContext {
    CookieContext {
        items: NameValue::list(snapshot.http().cookies(ExchangeSide::Response)),
    }
}

fn formatted_body(http: &HttpCapture, side: ExchangeSide) -> ApplicationResult<String> {
    if is_empty_body(http.body(side)) {
        return Ok(String::new());
    }
    Ok(body_context(http.body(side), http.header(side, "content-type"))?.body)
}

fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Escapes a value for use inside single quotes in a POSIX shell.
fn shell_quote(value: &str) -> String {
    value.replace('\'', "'\\''")
}
