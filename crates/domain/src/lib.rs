//! RestDocs Domain - Core documentation types
//!
//! This crate defines the model that turns one captured HTTP exchange and the
//! author's declarations into an immutable [`DocumentSnapshot`].
//! All types here are pure Rust with no I/O dependencies.

pub mod capture;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod snapshot;
pub mod snippet;
pub mod validation;

pub use capture::{ExchangeSide, HttpCapture, is_json_content_type};
pub use config::{
    ConfigPatch, ConfigService, ConfigState, OutputLayout, RestDocsConfig, Severity, SnippetFormat,
};
pub use descriptor::{
    CollectionShape, Descriptor, DescriptorBuilder, DescriptorKind, DescriptorSpec, FieldType,
    KeyedCollection, KeyedEntry, define_field, define_form_parameter, define_header, define_part,
    define_path_parameter, define_query_parameter, normalize_json,
};
pub use error::{DomainError, DomainResult, MissingFieldError, UnexpectedFieldError};
pub use snapshot::{DeclaredDescriptors, DocumentSnapshot, SidedDescriptors};
pub use snippet::SnippetKind;
pub use validation::{ValidationPolicy, ValidationReport, validate};
