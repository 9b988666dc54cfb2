//! Context builders
//!
//! One pure function per snippet projects a [`DocumentSnapshot`] into the
//! minimal, fully owned data its template consumes. Contexts never borrow from
//! the snapshot.

mod body;
mod exchange;
mod table;

pub use body::{BodyContext, body_context, language_for, pretty_json, request_body, response_body};
pub use exchange::{
    CookieContext, CurlContext, HttpRequestContext, HttpResponseContext, NameValue, curl_request,
    http_request, http_response, request_cookies, response_cookies,
};
pub use table::{
    MergeKey, TableContext, TableItem, form_parameters, merge_items, path_parameters,
    query_parameters, request_fields, request_headers, request_parts, response_fields,
    response_headers,
};

use restdocs_domain::{DocumentSnapshot, SnippetKind};
use serde_json::Value;

use crate::ApplicationResult;

/// Builds the context of `kind` as a template-ready JSON value.
///
/// # Errors
///
/// Returns an error if a body or the context cannot be serialized.
pub fn build_context(kind: SnippetKind, snapshot: &DocumentSnapshot) -> ApplicationResult<Value> {
    let value = match kind {
        SnippetKind::CurlRequest => serde_json::to_value(curl_request(snapshot)?)?,
        SnippetKind::HttpRequest => serde_json::to_value(http_request(snapshot)?)?,
        SnippetKind::HttpResponse => serde_json::to_value(http_response(snapshot)?)?,
        SnippetKind::PathParameters => serde_json::to_value(path_parameters(snapshot))?,
        SnippetKind::QueryParameters => serde_json::to_value(query_parameters(snapshot))?,
        SnippetKind::FormParameters => serde_json::to_value(form_parameters(snapshot))?,
        SnippetKind::RequestHeaders => serde_json::to_value(request_headers(snapshot))?,
        SnippetKind::ResponseHeaders => serde_json::to_value(response_headers(snapshot))?,
        SnippetKind::RequestCookies => serde_json::to_value(request_cookies(snapshot))?,
        SnippetKind::ResponseCookies => serde_json::to_value(response_cookies(snapshot))?,
        SnippetKind::RequestBody => serde_json::to_value(request_body(snapshot)?)?,
        SnippetKind::ResponseBody => serde_json::to_value(response_body(snapshot)?)?,
        SnippetKind::RequestFields => serde_json::to_value(request_fields(snapshot))?,
        SnippetKind::ResponseFields => serde_json::to_value(response_fields(snapshot))?,
        SnippetKind::RequestParts => serde_json::to_value(request_parts(snapshot))?,
    };
    Ok(value)
}
