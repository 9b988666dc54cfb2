//! Snippet persistence port

use std::future::Future;
use std::path::PathBuf;

use crate::ApplicationResult;
use crate::render::RenderedDocument;

/// Port for persisting the snippets rendered for one exchange.
pub trait SnippetWriter: Send + Sync {
    /// Writes every snippet of `document` under `identifier`.
    ///
    /// Returns the written paths in snippet-name order.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    fn write(
        &self,
        identifier: &str,
        document: &RenderedDocument,
    ) -> impl Future<Output = ApplicationResult<Vec<PathBuf>>> + Send;
}
