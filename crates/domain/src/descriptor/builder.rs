//! Fluent descriptor builder

use super::{Descriptor, DescriptorKind, FieldType};
use crate::error::{DomainError, DomainResult};

/// Incrementally describes one element of an exchange.
///
/// Each mutator consumes the builder and returns the next state.
/// [`to_descriptor`](Self::to_descriptor) copies the current state out, so a
/// builder reused after finalizing never changes a descriptor already handed out.
///
/// ```
/// use restdocs_domain::{FieldType, define_field};
///
/// let username = define_field("username")
///     .field_type(FieldType::String)
///     .description("Login name")
///     .to_descriptor()
///     .unwrap();
/// assert_eq!(username.name(), "username");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct DescriptorBuilder {
    kind: DescriptorKind,
    name: String,
    field_type: Option<FieldType>,
    description: Option<String>,
    optional: bool,
    format: Option<String>,
}

/// Starts describing a body field.
pub fn define_field(name: impl Into<String>) -> DescriptorBuilder {
    DescriptorBuilder::new(DescriptorKind::Field, name)
}

/// Starts describing a header.
pub fn define_header(name: impl Into<String>) -> DescriptorBuilder {
    DescriptorBuilder::new(DescriptorKind::Header, name)
}

/// Starts describing a path parameter.
pub fn define_path_parameter(name: impl Into<String>) -> DescriptorBuilder {
    DescriptorBuilder::new(DescriptorKind::Path, name)
}

/// Starts describing a query parameter.
pub fn define_query_parameter(name: impl Into<String>) -> DescriptorBuilder {
    DescriptorBuilder::new(DescriptorKind::Query, name)
}

/// Starts describing a form parameter.
pub fn define_form_parameter(name: impl Into<String>) -> DescriptorBuilder {
    DescriptorBuilder::new(DescriptorKind::Form, name)
}

/// Starts describing a multipart part.
pub fn define_part(name: impl Into<String>) -> DescriptorBuilder {
    DescriptorBuilder::new(DescriptorKind::Part, name)
}

impl DescriptorBuilder {
    /// Creates a builder holding only the kind and name.
    pub fn new(kind: DescriptorKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            field_type: None,
            description: None,
            optional: false,
            format: None,
        }
    }

    /// Sets the documented type.
    pub const fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the element as optional.
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the format hint.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Finalizes the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDescriptor`] if the name is empty or no
    /// type was set for a kind without a default type.
    pub fn to_descriptor(&self) -> DomainResult<Descriptor> {
        let field_type = self
            .field_type
            .or_else(|| self.kind.default_type())
            .ok_or_else(|| {
                DomainError::InvalidDescriptor(format!(
                    "{} '{}' has no type",
                    self.kind, self.name
                ))
            })?;

        Ok(Descriptor::new(self.kind, self.name.clone(), field_type)?.with_metadata(
            self.description.clone(),
            self.optional,
            self.format.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_without_type_fails() {
        let result = define_field("id").description("Identifier").to_descriptor();
        assert!(matches!(result, Err(DomainError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_header_defaults_to_string() {
        let descriptor = define_header("Authorization")
            .to_descriptor()
            .expect("headers have a default type");
        assert_eq!(descriptor.field_type(), FieldType::String);
        assert_eq!(descriptor.kind(), DescriptorKind::Header);
    }

    #[test]
    fn test_full_chain() {
        let descriptor = define_field("createdAt")
            .field_type(FieldType::String)
            .description("Creation time")
            .format("date-time")
            .optional()
            .to_descriptor()
            .expect("complete descriptor");

        assert_eq!(descriptor.name(), "createdAt");
        assert_eq!(descriptor.description(), Some("Creation time"));
        assert_eq!(descriptor.format(), Some("date-time"));
        assert!(descriptor.is_optional());
    }

    #[test]
    fn test_finalized_descriptor_is_detached_from_builder() {
        let builder = define_field("age").field_type(FieldType::Integer);
        let first = builder.to_descriptor().expect("typed");

        let second = builder.description("Age in years").optional().to_descriptor().expect("typed");

        assert_eq!(first.description(), None);
        assert!(!first.is_optional());
        assert_eq!(second.description(), Some("Age in years"));
    }

    #[test]
    fn test_empty_name_fails() {
        let result = define_query_parameter("").to_descriptor();
        assert!(matches!(result, Err(DomainError::InvalidDescriptor(_))));
    }
}
