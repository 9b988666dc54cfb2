//! Document exchange use case

use std::path::PathBuf;

use restdocs_domain::{DeclaredDescriptors, DocumentSnapshot, DomainError, HttpCapture};

use crate::ApplicationResult;
use crate::ports::{SnippetWriter, TemplateRenderer, TemplateStore};
use crate::render::{DocumentRenderer, RenderedDocument};

/// Input for documenting one test exchange.
#[derive(Debug, Clone)]
pub struct DocumentExchangeInput {
    /// Directory or file-name prefix the snippets are written under.
    pub identifier: String,
    /// The exchange performed by the test.
    pub capture: HttpCapture,
    /// What the test declared about it.
    pub declared: DeclaredDescriptors,
}

/// Output of a documented exchange.
#[derive(Debug, Clone)]
pub struct DocumentExchangeOutput {
    /// The rendered snippets.
    pub document: RenderedDocument,
    /// Files written, in snippet-name order.
    pub written: Vec<PathBuf>,
}

/// Assembles, validates, renders and persists the snippets of one exchange.
pub struct DocumentExchange<S, R, W> {
    renderer: DocumentRenderer<S, R>,
    writer: W,
}

impl<S, R, W> DocumentExchange<S, R, W>
where
    S: TemplateStore + 'static,
    R: TemplateRenderer + 'static,
    W: SnippetWriter,
{
    /// Creates a new `DocumentExchange` use case.
    pub const fn new(renderer: DocumentRenderer<S, R>, writer: W) -> Self {
        Self { renderer, writer }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the identifier is unusable, the capture is
    /// incomplete, strict validation fails, a snippet fails to render, or a
    /// file cannot be written.
    pub async fn execute(
        &self,
        input: DocumentExchangeInput,
    ) -> ApplicationResult<DocumentExchangeOutput> {
        check_identifier(&input.identifier)?;

        let snapshot = DocumentSnapshot::assemble(input.capture, input.declared)?;
        let document = self.renderer.render(snapshot).await?;
        let written = self.writer.write(&input.identifier, &document).await?;

        tracing::info!(
            identifier = %input.identifier,
            files = written.len(),
            "exchange documented"
        );
        Ok(DocumentExchangeOutput { document, written })
    }
}

fn check_identifier(identifier: &str) -> Result<(), DomainError> {
    if identifier.trim().is_empty() {
        return Err(DomainError::InvalidInput("identifier is empty".to_string()));
    }
    if identifier
        .split(['/', '\\'])
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(DomainError::InvalidInput(format!(
            "identifier '{identifier}' is not a relative path"
        )));
    }
    Ok(())
}
