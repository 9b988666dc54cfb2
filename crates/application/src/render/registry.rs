//! Snippet registry

use std::sync::Arc;

use restdocs_domain::SnippetKind;

use super::SnippetRenderer;
use crate::ports::{TemplateRenderer, TemplateStore};

/// The fixed set of snippet renderers sharing one template store and engine.
pub struct SnippetRegistry<S, R> {
    store: Arc<S>,
    renderers: Vec<SnippetRenderer<S, R>>,
}

impl<S: TemplateStore, R: TemplateRenderer> SnippetRegistry<S, R> {
    /// Registers a renderer for every snippet kind.
    pub fn new(store: Arc<S>, engine: Arc<R>) -> Self {
        Self::with_snippets(store, engine, SnippetKind::all())
    }

    /// Registers renderers for `kinds` only, ignoring repeats.
    pub fn with_snippets(store: Arc<S>, engine: Arc<R>, kinds: &[SnippetKind]) -> Self {
        let mut renderers: Vec<SnippetRenderer<S, R>> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if renderers.iter().any(|r| r.kind() == *kind) {
                continue;
            }
            renderers.push(SnippetRenderer::new(
                *kind,
                Arc::clone(&store),
                Arc::clone(&engine),
            ));
        }
        Self { store, renderers }
    }

    /// The shared template store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The registered renderers in registration order.
    #[must_use]
    pub fn renderers(&self) -> &[SnippetRenderer<S, R>] {
        &self.renderers
    }

    /// The registered snippet kinds in registration order.
    #[must_use]
    pub fn kinds(&self) -> Vec<SnippetKind> {
        self.renderers.iter().map(SnippetRenderer::kind).collect()
    }

    /// Returns the number of registered renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}
