//! RestDocs Application - Rendering pipeline and ports
//!
//! This crate defines the application layer with:
//! - Port traits (template store, template engine, file system, snippet writer)
//! - Context builders projecting a snapshot into template data
//! - The snippet registry and the concurrent document renderer
//! - Use case orchestration

pub mod context;
pub mod error;
pub mod ports;
pub mod render;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    FileSystem, FileSystemError, SnippetWriter, Template, TemplateError, TemplateRenderer,
    TemplateStore,
};
pub use render::{
    DocumentRenderer, RenderedDocument, RenderedSnippet, SnippetRegistry, SnippetRenderer,
};
pub use use_cases::{DocumentExchange, DocumentExchangeInput, DocumentExchangeOutput};
