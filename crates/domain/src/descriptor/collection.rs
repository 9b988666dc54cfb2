//! Author-facing descriptor collections and their normalization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Descriptor, DescriptorKind, FieldType};
use crate::error::{DomainError, DomainResult};

/// Descriptor metadata as written by the author, without its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorSpec {
    /// The documented type; required for body fields.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the element may be absent.
    #[serde(default)]
    pub optional: bool,
    /// Format hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl DescriptorSpec {
    /// Creates a spec with the given type.
    #[must_use]
    pub const fn typed(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            description: None,
            optional: false,
            format: None,
        }
    }

    /// Adds a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the element optional.
    #[must_use]
    pub const fn with_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Adds a format hint.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// One entry of the list shape: the key plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedEntry {
    /// The value of the entry's key field.
    pub key: String,
    /// The remaining metadata.
    pub spec: DescriptorSpec,
}

impl KeyedEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(key: impl Into<String>, spec: DescriptorSpec) -> Self {
        Self {
            key: key.into(),
            spec,
        }
    }
}

/// Which of the two author-facing shapes a collection uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionShape {
    /// An ordered sequence of entries each carrying its own key.
    List,
    /// A mapping from key to metadata.
    Record,
}

impl CollectionShape {
    /// Discriminates raw JSON input: a sequence is a list, an object is a
    /// record, anything else has no shape.
    #[must_use]
    pub const fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Array(_) => Some(Self::List),
            Value::Object(_) => Some(Self::Record),
            _ => None,
        }
    }
}

/// Descriptors as the author wrote them, in either accepted shape.
///
/// Both shapes normalize to the same ordered list of [`Descriptor`]s.
/// Record order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyedCollection {
    /// The list shape.
    List(Vec<KeyedEntry>),
    /// The record shape.
    Record(IndexMap<String, DescriptorSpec>),
}

impl Default for KeyedCollection {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl KeyedCollection {
    /// Parses raw JSON input.
    ///
    /// List entries must be objects exposing `key_field` as a string; the
    /// rest of each entry, and each record value, must be valid metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if the value has neither shape
    /// or an entry is malformed.
    pub fn from_json(value: &Value, key_field: &str) -> DomainResult<Self> {
        match (CollectionShape::of(value), value) {
            (Some(CollectionShape::List), Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| list_entry(index, item, key_field))
                .collect::<DomainResult<Vec<_>>>()
                .map(Self::List),
            (Some(CollectionShape::Record), Value::Object(map)) => map
                .iter()
                .map(|(key, item)| Ok((key.clone(), parse_spec(key, item.clone())?)))
                .collect::<DomainResult<IndexMap<_, _>>>()
                .map(Self::Record),
            _ => Err(DomainError::InvalidInput(format!(
                "expected an array of objects keyed by '{key_field}' or an object map, got {}",
                json_kind(value)
            ))),
        }
    }

    /// Returns which shape this collection uses.
    #[must_use]
    pub const fn shape(&self) -> CollectionShape {
        match self {
            Self::List(_) => CollectionShape::List,
            Self::Record(_) => CollectionShape::Record,
        }
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(entries) => entries.is_empty(),
            Self::Record(map) => map.is_empty(),
        }
    }

    /// Normalizes into tagged descriptors of `kind`, keeping input order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDescriptor`] for an empty key or a body
    /// field without a type.
    pub fn normalize(&self, kind: DescriptorKind) -> DomainResult<Vec<Descriptor>> {
        match self {
            Self::List(entries) => entries
                .iter()
                .map(|entry| tag(kind, &entry.key, &entry.spec))
                .collect(),
            Self::Record(map) => map.iter().map(|(key, spec)| tag(kind, key, spec)).collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, DescriptorSpec)> for KeyedCollection {
    fn from_iter<T: IntoIterator<Item = (K, DescriptorSpec)>>(iter: T) -> Self {
        Self::Record(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Vec<KeyedEntry>> for KeyedCollection {
    fn from(entries: Vec<KeyedEntry>) -> Self {
        Self::List(entries)
    }
}

/// Parses and normalizes raw JSON input in one step.
///
/// # Errors
///
/// See [`KeyedCollection::from_json`] and [`KeyedCollection::normalize`].
pub fn normalize_json(
    kind: DescriptorKind,
    value: &Value,
    key_field: &str,
) -> DomainResult<Vec<Descriptor>> {
    KeyedCollection::from_json(value, key_field)?.normalize(kind)
}

fn tag(kind: DescriptorKind, name: &str, spec: &DescriptorSpec) -> DomainResult<Descriptor> {
    let field_type = spec
        .field_type
        .or_else(|| kind.default_type())
        .ok_or_else(|| DomainError::InvalidDescriptor(format!("{kind} '{name}' has no type")))?;

    Ok(Descriptor::new(kind, name, field_type)?.with_metadata(
        spec.description.clone(),
        spec.optional,
        spec.format.clone(),
    ))
}

fn list_entry(index: usize, item: &Value, key_field: &str) -> DomainResult<KeyedEntry> {
    let Value::Object(map) = item else {
        return Err(DomainError::InvalidInput(format!(
            "entry {index} is {}, expected an object",
            json_kind(item)
        )));
    };

    let mut rest: Map<String, Value> = map.clone();
    let key = match rest.remove(key_field) {
        Some(Value::String(key)) => key,
        _ => {
            return Err(DomainError::InvalidInput(format!(
                "entry {index} has no string '{key_field}' field"
            )));
        }
    };
    // A list entry may repeat the tag the normalizer injects anyway.
    rest.remove("kind");

    let spec = parse_spec(&key, Value::Object(rest))?;
    Ok(KeyedEntry { key, spec })
}

fn parse_spec(key: &str, value: Value) -> DomainResult<DescriptorSpec> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::InvalidInput(format!("invalid metadata for '{key}': {e}")))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(descriptors: &[Descriptor]) -> Vec<(DescriptorKind, &str)> {
        descriptors.iter().map(|d| (d.kind(), d.name())).collect()
    }

    #[test]
    fn test_list_shape_keeps_order() {
        let input = json!([
            {"name": "zeta", "type": "string"},
            {"name": "alpha", "type": "integer", "optional": true}
        ]);

        let descriptors =
            normalize_json(DescriptorKind::Field, &input, "name").expect("valid list input");

        assert_eq!(
            names(&descriptors),
            vec![(DescriptorKind::Field, "zeta"), (DescriptorKind::Field, "alpha")]
        );
        assert!(descriptors[1].is_optional());
        assert_eq!(descriptors[1].field_type(), FieldType::Integer);
    }

    #[test]
    fn test_record_shape_keeps_insertion_order() {
        let input = json!({
            "userId": {"description": "The user"},
            "commentId": {"type": "integer"}
        });

        let descriptors =
            normalize_json(DescriptorKind::Path, &input, "name").expect("valid record input");

        assert_eq!(
            names(&descriptors),
            vec![(DescriptorKind::Path, "userId"), (DescriptorKind::Path, "commentId")]
        );
        assert_eq!(descriptors[0].field_type(), FieldType::String);
        assert_eq!(descriptors[0].description(), Some("The user"));
    }

    #[test]
    fn test_both_shapes_normalize_identically() {
        let list = KeyedCollection::List(vec![
            KeyedEntry::new("page", DescriptorSpec::typed(FieldType::Integer)),
            KeyedEntry::new("sort", DescriptorSpec::default().with_description("Sort key")),
        ]);
        let record: KeyedCollection = [
            ("page", DescriptorSpec::typed(FieldType::Integer)),
            ("sort", DescriptorSpec::default().with_description("Sort key")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            list.normalize(DescriptorKind::Query).expect("list"),
            record.normalize(DescriptorKind::Query).expect("record")
        );
        assert_eq!(list.shape(), CollectionShape::List);
        assert_eq!(record.shape(), CollectionShape::Record);
    }

    #[test]
    fn test_custom_key_field() {
        let input = json!([{"header": "X-Request-Id", "description": "Trace id"}]);
        let descriptors =
            normalize_json(DescriptorKind::Header, &input, "header").expect("keyed by header");
        assert_eq!(descriptors[0].name(), "X-Request-Id");
    }

    #[test]
    fn test_scalar_input_is_rejected() {
        let result = KeyedCollection::from_json(&json!("nope"), "name");
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_list_entry_without_key_is_rejected() {
        let result = KeyedCollection::from_json(&json!([{"type": "string"}]), "name");
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_list_entry_must_be_object() {
        let result = KeyedCollection::from_json(&json!(["name"]), "name");
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = KeyedCollection::from_json(&json!({"id": {"type": "uuid"}}), "name");
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_untyped_field_fails_normalization() {
        let collection =
            KeyedCollection::from_json(&json!({"id": {}}), "name").expect("shape is valid");
        let result = collection.normalize(DescriptorKind::Field);
        assert!(matches!(result, Err(DomainError::InvalidDescriptor(_))));
    }
}
