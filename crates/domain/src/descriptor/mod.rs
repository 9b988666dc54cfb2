//! Descriptor types
//!
//! A descriptor is the author's declaration of one path parameter, query
//! parameter, header, body field, form parameter or multipart part. Descriptors
//! are immutable once built; use [`DescriptorBuilder`] or
//! [`KeyedCollection::normalize`] to create them.

mod builder;
mod collection;

pub use builder::{
    DescriptorBuilder, define_field, define_form_parameter, define_header, define_part,
    define_path_parameter, define_query_parameter,
};
pub use collection::{CollectionShape, DescriptorSpec, KeyedCollection, KeyedEntry, normalize_json};

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// What part of an exchange a descriptor documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    /// A templated segment of the request path.
    Path,
    /// A query string parameter.
    Query,
    /// A request or response header.
    Header,
    /// A top-level field of a JSON body.
    Field,
    /// A part of a multipart request.
    Part,
    /// A parameter of a form-encoded body.
    Form,
}

impl DescriptorKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Field => "field",
            Self::Part => "part",
            Self::Form => "form",
        }
    }

    /// The type assumed when the author leaves it out.
    ///
    /// Body fields have no default: their type must always be declared.
    #[must_use]
    pub const fn default_type(&self) -> Option<FieldType> {
        match self {
            Self::Field => None,
            _ => Some(FieldType::String),
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The documented type of a parameter, header or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Text.
    String,
    /// Any JSON number with a fractional part.
    Number,
    /// `true` or `false`.
    Boolean,
    /// A whole number.
    Integer,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl FieldType {
    /// Returns the lowercase name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Infers the type of an observed JSON value.
    ///
    /// `null` carries no type information and is reported as `object`.
    #[must_use]
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::Array(_) => Self::Array,
            Value::Object(_) | Value::Null => Self::Object,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized, immutable descriptor.
///
/// Deserialization goes through [`Descriptor::new`], so an empty name is
/// rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct Descriptor {
    kind: DescriptorKind,
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

/// Unchecked wire form of a [`Descriptor`].
#[derive(Deserialize)]
struct RawDescriptor {
    kind: DescriptorKind,
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    format: Option<String>,
}

impl TryFrom<RawDescriptor> for Descriptor {
    type Error = DomainError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.kind, raw.name, raw.field_type)?.with_metadata(
            raw.description,
            raw.optional,
            raw.format,
        ))
    }
}

impl Descriptor {
    /// Creates a descriptor, rejecting an empty name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDescriptor`] if `name` is empty.
    pub fn new(
        kind: DescriptorKind,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidDescriptor(format!(
                "{kind} descriptor has an empty name"
            )));
        }
        Ok(Self {
            kind,
            name,
            field_type,
            description: None,
            optional: false,
            format: None,
        })
    }

    pub(crate) fn with_metadata(
        mut self,
        description: Option<String>,
        optional: bool,
        format: Option<String>,
    ) -> Self {
        self.description = description;
        self.optional = optional;
        self.format = format;
        self
    }

    /// The kind of exchange element this descriptor documents.
    #[must_use]
    pub const fn kind(&self) -> DescriptorKind {
        self.kind
    }

    /// The parameter, header or field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The documented type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The human-readable description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the element may be absent.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// The format hint (`date-time`, `uuid`, ...), if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_name_is_rejected() {
        let result = Descriptor::new(DescriptorKind::Field, "", FieldType::String);
        assert!(matches!(result, Err(DomainError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_infer_types() {
        assert_eq!(FieldType::infer(&json!("a")), FieldType::String);
        assert_eq!(FieldType::infer(&json!(519)), FieldType::Integer);
        assert_eq!(FieldType::infer(&json!(5.19)), FieldType::Number);
        assert_eq!(FieldType::infer(&json!(true)), FieldType::Boolean);
        assert_eq!(FieldType::infer(&json!([1])), FieldType::Array);
        assert_eq!(FieldType::infer(&json!({})), FieldType::Object);
        assert_eq!(FieldType::infer(&Value::Null), FieldType::Object);
    }

    #[test]
    fn test_descriptor_serializes_type_key() {
        let descriptor = Descriptor::new(DescriptorKind::Header, "X-Trace", FieldType::String)
            .expect("valid descriptor");
        let value = serde_json::to_value(&descriptor).expect("serializable");
        assert_eq!(value, json!({"kind": "header", "name": "X-Trace", "type": "string"}));
    }

    #[test]
    fn test_deserialize_rejects_empty_name() {
        let result = serde_json::from_value::<Descriptor>(
            json!({"kind": "field", "name": "", "type": "string"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_keeps_metadata() {
        let descriptor: Descriptor = serde_json::from_value(json!({
            "kind": "query",
            "name": "page",
            "type": "integer",
            "description": "Page number",
            "optional": true
        }))
        .expect("valid descriptor");

        assert_eq!(descriptor.kind(), DescriptorKind::Query);
        assert_eq!(descriptor.field_type(), FieldType::Integer);
        assert_eq!(descriptor.description(), Some("Page number"));
        assert!(descriptor.is_optional());
        assert_eq!(descriptor.format(), None);
    }

    #[test]
    fn test_default_type_only_for_non_fields() {
        assert_eq!(DescriptorKind::Field.default_type(), None);
        assert_eq!(DescriptorKind::Query.default_type(), Some(FieldType::String));
    }
}
