//! Body snippet contexts

use restdocs_domain::{DocumentSnapshot, ExchangeSide};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{ApplicationError, ApplicationResult};

/// Context of the `request-body` and `response-body` snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyContext {
    /// Body text, always ending with a newline.
    pub body: String,
    /// Source-block language.
    pub language: String,
}

impl BodyContext {
    /// The placeholder rendered for an absent body.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            body: "\n".to_string(),
            language: "json".to_string(),
        }
    }
}

/// Builds the request body context.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn request_body(snapshot: &DocumentSnapshot) -> ApplicationResult<BodyContext> {
    side_body(snapshot, ExchangeSide::Request)
}

/// Builds the response body context.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn response_body(snapshot: &DocumentSnapshot) -> ApplicationResult<BodyContext> {
    side_body(snapshot, ExchangeSide::Response)
}

fn side_body(snapshot: &DocumentSnapshot, side: ExchangeSide) -> ApplicationResult<BodyContext> {
    let http = snapshot.http();
    body_context(&http.observed_body(side), http.header(side, "content-type"))
}

/// Projects one body into its rendering context.
///
/// JSON values are pretty-printed; text bodies keep their content and take
/// their language from `content_type`.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn body_context(body: &Value, content_type: Option<&str>) -> ApplicationResult<BodyContext> {
    if is_empty_body(body) {
        return Ok(BodyContext::empty());
    }

    let Value::String(text) = body else {
        return Ok(BodyContext {
            body: pretty_json(body)?,
            language: "json".to_string(),
        });
    };

    let language = language_for(content_type);
    if language == "json" {
        if let Ok(parsed) = serde_json::from_str::<Value>(text) {
            return Ok(BodyContext {
                body: pretty_json(&parsed)?,
                language: language.to_string(),
            });
        }
    }

    let mut body = text.clone();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    Ok(BodyContext {
        body,
        language: language.to_string(),
    })
}

/// Serializes a value as 2-space indented JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn pretty_json(value: &Value) -> ApplicationResult<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json =
        String::from_utf8(buffer).map_err(|e| ApplicationError::Internal(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

/// Maps the `Content-Type` of a text body to a source-block language.
///
/// Without a usable content type the text is plain `text`.
#[must_use]
pub fn language_for(content_type: Option<&str>) -> &'static str {
    let Some(parsed) = content_type.and_then(|ct| ct.parse::<mime::Mime>().ok()) else {
        return "text";
    };

    let is = |name: mime::Name<'static>| parsed.subtype() == name || parsed.suffix() == Some(name);
    if is(mime::JSON) {
        "json"
    } else if is(mime::XML) {
        "xml"
    } else if parsed.subtype() == mime::HTML {
        "html"
    } else {
        "text"
    }
}

/// Returns true for `null`, an empty string, and empty containers.
pub(crate) fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Body as it travels on the wire: compact JSON or the raw text.
pub(crate) fn wire_body(body: &Value) -> ApplicationResult<Option<String>> {
    if is_empty_body(body) {
        return Ok(None);
    }
    match body {
        Value::String(text) => Ok(Some(text.clone())),
        other => Ok(Some(serde_json::to_string(other)?)),
    }
}
