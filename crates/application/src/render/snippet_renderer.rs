//! Single-snippet renderer

use std::sync::Arc;

use restdocs_domain::{DocumentSnapshot, SnippetKind};

use super::RenderedSnippet;
use crate::ApplicationResult;
use crate::context::build_context;
use crate::ports::{TemplateRenderer, TemplateStore};

/// Renders one kind of snippet from a snapshot with its named template.
pub struct SnippetRenderer<S, R> {
    kind: SnippetKind,
    store: Arc<S>,
    engine: Arc<R>,
}

impl<S, R> Clone for SnippetRenderer<S, R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            store: Arc::clone(&self.store),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<S: TemplateStore, R: TemplateRenderer> SnippetRenderer<S, R> {
    /// Creates a renderer for `kind` bound to the shared store and engine.
    pub const fn new(kind: SnippetKind, store: Arc<S>, engine: Arc<R>) -> Self {
        Self {
            kind,
            store,
            engine,
        }
    }

    /// The snippet this renderer produces.
    #[must_use]
    pub const fn kind(&self) -> SnippetKind {
        self.kind
    }

    /// Renders the snippet; `None` when the output is blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing, the context cannot be
    /// built, or the engine fails.
    pub async fn render(
        &self,
        snapshot: &DocumentSnapshot,
    ) -> ApplicationResult<Option<RenderedSnippet>> {
        let template = self.store.get(self.kind.name())?;
        let context = build_context(self.kind, snapshot)?;
        let content = self.engine.render(&template.content, &context).await?;

        if content.trim().is_empty() {
            tracing::debug!(snippet = %self.kind, "blank output discarded");
            return Ok(None);
        }
        tracing::debug!(snippet = %self.kind, bytes = content.len(), "snippet rendered");
        Ok(Some(RenderedSnippet {
            extension: template.extension.clone(),
            content,
        }))
    }
}
