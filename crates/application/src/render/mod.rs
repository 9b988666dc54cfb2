//! Snippet rendering
//!
//! A [`SnippetRegistry`] binds one [`SnippetRenderer`] per snippet kind to a
//! shared template store and engine; the [`DocumentRenderer`] validates a
//! snapshot and fans out over the registry.

mod document;
mod document_renderer;
mod registry;
mod snippet_renderer;

pub use document::{RenderedDocument, RenderedSnippet};
pub use document_renderer::DocumentRenderer;
pub use registry::SnippetRegistry;
pub use snippet_renderer::SnippetRenderer;
