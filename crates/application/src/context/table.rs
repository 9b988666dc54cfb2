//! Table snippet contexts: fields, headers and parameters
//!
//! Each table merges what was observed on the wire with what the author
//! declared. Observed entries come first in wire order; declared metadata
//! overrides an observed entry of the same name, and declared-only entries
//! are appended in declaration order.

use indexmap::IndexMap;
use restdocs_domain::{Descriptor, DocumentSnapshot, ExchangeSide, FieldType};
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// One row of a field, header or parameter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableItem {
    /// Field, header or parameter name.
    pub name: String,
    /// Documented or inferred type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Description; empty for undeclared entries.
    pub description: String,
    /// Whether the entry may be absent.
    pub optional: bool,
    /// Format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl TableItem {
    /// An entry seen on the wire but not declared.
    #[must_use]
    pub fn observed(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: String::new(),
            optional: false,
            format: None,
        }
    }
}

impl From<&Descriptor> for TableItem {
    fn from(descriptor: &Descriptor) -> Self {
        Self {
            name: descriptor.name().to_string(),
            field_type: descriptor.field_type(),
            description: descriptor.description().unwrap_or_default().to_string(),
            optional: descriptor.is_optional(),
            format: descriptor.format().map(ToString::to_string),
        }
    }
}

/// Context of every table snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContext {
    /// Rows in merge order.
    pub items: Vec<TableItem>,
    /// True if any row carries a format.
    pub has_format: bool,
    /// True if any row is optional.
    pub has_optional: bool,
}

impl TableContext {
    /// Wraps merged rows, computing the column flags.
    #[must_use]
    pub fn new(items: Vec<TableItem>) -> Self {
        let has_format = items
            .iter()
            .any(|item| item.format.as_deref().is_some_and(|f| !f.is_empty()));
        let has_optional = items.iter().any(|item| item.optional);
        Self {
            items,
            has_format,
            has_optional,
        }
    }
}

/// How two rows are recognised as the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKey {
    /// Names must match exactly.
    Exact,
    /// Names match ignoring ASCII case, as header names do.
    IgnoreAsciiCase,
}

impl MergeKey {
    fn key(self, name: &str) -> String {
        match self {
            Self::Exact => name.to_string(),
            Self::IgnoreAsciiCase => name.to_ascii_lowercase(),
        }
    }
}

/// Merges observed rows with declared rows; declared metadata wins.
#[must_use]
pub fn merge_items(
    observed: Vec<TableItem>,
    declared: Vec<TableItem>,
    key: MergeKey,
) -> Vec<TableItem> {
    let mut merged: IndexMap<String, TableItem> = IndexMap::new();
    for item in observed {
        merged.entry(key.key(&item.name)).or_insert(item);
    }
    for item in declared {
        merged.insert(key.key(&item.name), item);
    }
    merged.into_values().collect()
}

fn merged_table(observed: Vec<TableItem>, declared: &[Descriptor], key: MergeKey) -> TableContext {
    let declared = declared.iter().map(TableItem::from).collect();
    TableContext::new(merge_items(observed, declared, key))
}

/// Builds the request field table.
#[must_use]
pub fn request_fields(snapshot: &DocumentSnapshot) -> TableContext {
    side_fields(snapshot, ExchangeSide::Request)
}

/// Builds the response field table.
#[must_use]
pub fn response_fields(snapshot: &DocumentSnapshot) -> TableContext {
    side_fields(snapshot, ExchangeSide::Response)
}

fn side_fields(snapshot: &DocumentSnapshot, side: ExchangeSide) -> TableContext {
    let observed: Vec<TableItem> = match snapshot.http().observed_body(side).as_ref() {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| TableItem::observed(name.clone(), FieldType::infer(value)))
            .collect(),
        _ => Vec::new(),
    };
    merged_table(observed, snapshot.fields().side(side), MergeKey::Exact)
}

/// Builds the request header table.
#[must_use]
pub fn request_headers(snapshot: &DocumentSnapshot) -> TableContext {
    side_headers(snapshot, ExchangeSide::Request)
}

/// Builds the response header table.
#[must_use]
pub fn response_headers(snapshot: &DocumentSnapshot) -> TableContext {
    side_headers(snapshot, ExchangeSide::Response)
}

fn side_headers(snapshot: &DocumentSnapshot, side: ExchangeSide) -> TableContext {
    let observed: Vec<TableItem> = snapshot
        .http()
        .headers(side)
        .keys()
        .map(|name| TableItem::observed(name.clone(), FieldType::String))
        .collect();
    merged_table(observed, snapshot.headers().side(side), MergeKey::IgnoreAsciiCase)
}

/// Builds the path parameter table from the declarations.
#[must_use]
pub fn path_parameters(snapshot: &DocumentSnapshot) -> TableContext {
    merged_table(Vec::new(), snapshot.path_parameters(), MergeKey::Exact)
}

/// Builds the query parameter table from the URL and the declarations.
#[must_use]
pub fn query_parameters(snapshot: &DocumentSnapshot) -> TableContext {
    let observed = Url::parse(&snapshot.http().url)
        .map(|url| {
            let mut seen: Vec<TableItem> = Vec::new();
            for (name, _) in url.query_pairs() {
                if !seen.iter().any(|item| item.name == name) {
                    seen.push(TableItem::observed(name.into_owned(), FieldType::String));
                }
            }
            seen
        })
        .unwrap_or_else(|e| {
            tracing::debug!(url = %snapshot.http().url, error = %e, "query string not inspected");
            Vec::new()
        });
    merged_table(observed, snapshot.query_parameters(), MergeKey::Exact)
}

/// Builds the form parameter table from an url-encoded body and the declarations.
#[must_use]
pub fn form_parameters(snapshot: &DocumentSnapshot) -> TableContext {
    let http = snapshot.http();
    let is_form = http
        .header(ExchangeSide::Request, "content-type")
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .is_some_and(|ct| {
            ct.type_() == mime::APPLICATION && ct.subtype() == mime::WWW_FORM_URLENCODED
        });

    let observed: Vec<TableItem> = match (&http.request_body, is_form) {
        (Value::String(body), true) => serde_urlencoded::from_str::<Vec<(String, String)>>(body)
            .map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(name, _)| TableItem::observed(name, FieldType::String))
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    merged_table(observed, snapshot.form_parameters(), MergeKey::Exact)
}

/// Builds the multipart part table from the declarations.
#[must_use]
pub fn request_parts(snapshot: &DocumentSnapshot) -> TableContext {
    merged_table(Vec::new(), snapshot.request_parts(), MergeKey::Exact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restdocs_domain::{
        DeclaredDescriptors, HttpCapture, define_field, define_form_parameter, define_header,
        define_query_parameter,
    };
    use serde_json::json;

    fn snapshot(capture: HttpCapture, declared: DeclaredDescriptors) -> DocumentSnapshot {
        DocumentSnapshot::assemble(capture, declared).expect("valid snapshot")
    }

    #[test]
    fn test_empty_table() {
        let snapshot = snapshot(HttpCapture::new("GET", "https://x"), DeclaredDescriptors::new());
        let context = request_fields(&snapshot);
        assert_eq!(context, TableContext::default());
        assert!(!context.has_format);
        assert!(!context.has_optional);
    }

    #[test]
    fn test_declared_metadata_wins_and_order_is_stable() {
        let capture = HttpCapture::new("POST", "https://x/users")
            .with_request_body(json!({"username": "a", "age": 3}));
        let declared = DeclaredDescriptors::new().with_request_fields(vec![
            define_field("age")
                .field_type(FieldType::Number)
                .description("Age")
                .to_descriptor()
                .expect("typed"),
            define_field("nickname")
                .field_type(FieldType::String)
                .optional()
                .to_descriptor()
                .expect("typed"),
        ]);

        let context = request_fields(&snapshot(capture, declared));

        let names: Vec<_> = context.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["username", "age", "nickname"]);
        assert_eq!(context.items[0].description, "");
        assert_eq!(context.items[1].field_type, FieldType::Number);
        assert_eq!(context.items[1].description, "Age");
        assert!(context.has_optional);
        assert!(!context.has_format);
    }

    #[test]
    fn test_json_text_body_fields_are_observed() {
        let capture = HttpCapture::new("POST", "https://x/users")
            .with_request_header("Content-Type", "application/json")
            .with_request_body(json!(r#"{"username":"a","secret":"x"}"#));

        let context = request_fields(&snapshot(capture, DeclaredDescriptors::new()));

        let names: Vec<_> = context.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["username", "secret"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let items = vec![
            TableItem::observed("a", FieldType::String),
            TableItem {
                format: Some("uuid".to_string()),
                ..TableItem::observed("b", FieldType::String)
            },
        ];
        let merged = merge_items(items.clone(), items.clone(), MergeKey::Exact);
        assert_eq!(merged, items);
    }

    #[test]
    fn test_headers_merge_ignoring_case() {
        let capture = HttpCapture::new("GET", "https://x")
            .with_request_header("content-type", "application/json");
        let declared = DeclaredDescriptors::new().with_request_headers(vec![
            define_header("Content-Type")
                .description("Body media type")
                .to_descriptor()
                .expect("header"),
        ]);

        let context = request_headers(&snapshot(capture, declared));

        assert_eq!(context.items.len(), 1);
        assert_eq!(context.items[0].name, "Content-Type");
        assert_eq!(context.items[0].description, "Body media type");
    }

    #[test]
    fn test_query_parameters_are_observed_from_url() {
        let capture = HttpCapture::new("GET", "https://x/users?page=2&size=10&page=3");
        let declared = DeclaredDescriptors::new().with_query_parameters(vec![
            define_query_parameter("size")
                .field_type(FieldType::Integer)
                .format("int32")
                .to_descriptor()
                .expect("query"),
        ]);

        let context = query_parameters(&snapshot(capture, declared));

        let names: Vec<_> = context.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["page", "size"]);
        assert!(context.has_format);
    }

    #[test]
    fn test_form_parameters_from_urlencoded_body() {
        let capture = HttpCapture::new("POST", "https://x/login")
            .with_request_header("Content-Type", "application/x-www-form-urlencoded")
            .with_request_body(json!("user=a&pass=b"));
        let declared = DeclaredDescriptors::new().with_form_parameters(vec![
            define_form_parameter("pass")
                .description("Password")
                .to_descriptor()
                .expect("form"),
        ]);

        let context = form_parameters(&snapshot(capture, declared));

        let names: Vec<_> = context.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["user", "pass"]);
        assert_eq!(context.items[1].description, "Password");
    }

    #[test]
    fn test_context_serializes_camel_case_flags() {
        let value = serde_json::to_value(TableContext::default()).expect("serializable");
        assert_eq!(value, json!({"items": [], "hasFormat": false, "hasOptional": false}));
    }
}
