//! Template storage port

use std::future::Future;
use std::path::PathBuf;

use super::FileSystemError;

/// Errors raised while loading or rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No template is registered under the name.
    #[error("template not found: {0}")]
    NotFound(String),

    /// `get` was called before `load`.
    #[error("templates have not been loaded")]
    NotLoaded,

    /// The template engine rejected the template or the context.
    #[error("render failed: {0}")]
    Render(String),

    /// A template file has no usable name or extension.
    #[error("invalid template file: {0}")]
    InvalidTemplate(PathBuf),

    /// Reading template files failed.
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
}

/// A loaded template and the extension of the files it renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Output file extension, without the dot.
    pub extension: String,
    /// Template source.
    pub content: String,
}

impl Template {
    /// Creates a template.
    #[must_use]
    pub fn new(extension: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            content: content.into(),
        }
    }
}

/// Port for the named templates snippets are rendered with.
///
/// `load` warms the store once; later calls must be cheap no-ops. `get` is
/// only valid after `load` has completed.
pub trait TemplateStore: Send + Sync {
    /// Loads every template into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the templates cannot be read.
    fn load(&self) -> impl Future<Output = Result<(), TemplateError>> + Send;

    /// Returns the template registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotLoaded`] before `load`, and
    /// [`TemplateError::NotFound`] for an unknown name.
    fn get(&self, name: &str) -> Result<&Template, TemplateError>;
}
