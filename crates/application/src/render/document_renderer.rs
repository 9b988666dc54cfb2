//! Document renderer: validation plus concurrent fan-out over the registry

use std::sync::Arc;

use restdocs_domain::{DocumentSnapshot, RestDocsConfig, ValidationPolicy, validate};
use tokio::task::JoinSet;

use super::{RenderedDocument, SnippetRegistry};
use crate::ports::{TemplateRenderer, TemplateStore};
use crate::{ApplicationError, ApplicationResult};

/// Renders every registered snippet of a snapshot.
///
/// Renders run concurrently and may finish in any order. The first failure
/// aborts the remaining renders and fails the whole document; there are no
/// partial results.
pub struct DocumentRenderer<S, R> {
    registry: SnippetRegistry<S, R>,
    policy: ValidationPolicy,
}

impl<S, R> DocumentRenderer<S, R>
where
    S: TemplateStore + 'static,
    R: TemplateRenderer + 'static,
{
    /// Creates a renderer validating according to `config`.
    #[must_use]
    pub fn new(registry: SnippetRegistry<S, R>, config: &RestDocsConfig) -> Self {
        Self::with_policy(registry, ValidationPolicy::from(config))
    }

    /// Creates a renderer with an explicit validation policy.
    #[must_use]
    pub const fn with_policy(registry: SnippetRegistry<S, R>, policy: ValidationPolicy) -> Self {
        Self { registry, policy }
    }

    /// The registered snippets.
    #[must_use]
    pub const fn registry(&self) -> &SnippetRegistry<S, R> {
        &self.registry
    }

    /// The validation policy applied before rendering.
    #[must_use]
    pub const fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Loads the templates; a no-op once they are loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the template store cannot load.
    pub async fn warm_up(&self) -> ApplicationResult<()> {
        self.registry.store().load().await?;
        Ok(())
    }

    /// Validates the snapshot, then renders every registered snippet.
    ///
    /// Blank outputs are left out of the document.
    ///
    /// # Errors
    ///
    /// Returns the validation error in strict mode, or the first template,
    /// context or engine error raised by any snippet.
    pub async fn render(&self, snapshot: DocumentSnapshot) -> ApplicationResult<RenderedDocument> {
        let report = validate(&snapshot, self.policy)?;
        for missing in &report.missing {
            tracing::warn!(context = missing.context(), "{}", missing.message());
        }

        self.warm_up().await?;

        let snapshot = Arc::new(snapshot);
        let mut tasks = JoinSet::new();
        for renderer in self.registry.renderers() {
            let renderer = renderer.clone();
            let snapshot = Arc::clone(&snapshot);
            tasks.spawn(async move {
                let kind = renderer.kind();
                renderer.render(&snapshot).await.map(|output| (kind, output))
            });
        }

        let mut document = RenderedDocument::new();
        while let Some(joined) = tasks.join_next().await {
            let (kind, output) = joined
                .map_err(|e| ApplicationError::Internal(format!("snippet task failed: {e}")))??;
            if let Some(snippet) = output {
                document.insert(kind.name(), snippet);
            }
        }

        tracing::info!(
            method = %snapshot.http().method,
            url = %snapshot.http().url,
            snippets = document.len(),
            "document rendered"
        );
        Ok(document)
    }
}
