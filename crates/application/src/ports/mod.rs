//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the rendering core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod file_system;
mod snippet_writer;
mod template_renderer;
mod template_store;

pub use file_system::{FileSystem, FileSystemError};
pub use snippet_writer::SnippetWriter;
pub use template_renderer::TemplateRenderer;
pub use template_store::{Template, TemplateError, TemplateStore};
