//! Snippet writer persisting rendered documents to disk.

use std::path::{Path, PathBuf};

use restdocs_application::ports::{FileSystem, SnippetWriter};
use restdocs_application::{ApplicationResult, RenderedDocument};
use restdocs_domain::{OutputLayout, RestDocsConfig};

/// Writes each snippet of a document to its own file under an output directory.
///
/// With [`OutputLayout::Nested`] a snippet lands in
/// `{output}/{identifier}/{name}.{ext}`; with [`OutputLayout::Flat`] in
/// `{output}/{identifier}-{name}.{ext}`. Existing files are overwritten.
pub struct FileSnippetWriter<F: FileSystem> {
    fs: F,
    output: PathBuf,
    layout: OutputLayout,
}

impl<F: FileSystem> FileSnippetWriter<F> {
    /// Creates a writer rooted at `output`.
    pub fn new(fs: F, output: impl Into<PathBuf>, layout: OutputLayout) -> Self {
        Self {
            fs,
            output: output.into(),
            layout,
        }
    }

    /// Creates a writer from the configured output directory and layout.
    pub fn from_config(fs: F, config: &RestDocsConfig) -> Self {
        Self::new(fs, config.output.clone(), config.layout)
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the path a snippet of `identifier` is written to.
    #[must_use]
    pub fn snippet_path(&self, identifier: &str, name: &str, extension: &str) -> PathBuf {
        match self.layout {
            OutputLayout::Nested => self
                .output
                .join(identifier)
                .join(format!("{name}.{extension}")),
            OutputLayout::Flat => self.output.join(format!("{identifier}-{name}.{extension}")),
        }
    }
}

impl<F: FileSystem> SnippetWriter for FileSnippetWriter<F> {
    async fn write(
        &self,
        identifier: &str,
        document: &RenderedDocument,
    ) -> ApplicationResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(document.len());
        for (name, snippet) in document.iter() {
            let path = self.snippet_path(identifier, name, &snippet.extension);
            self.fs.write_file(&path, snippet.content.as_bytes()).await?;
            tracing::debug!(path = %path.display(), "snippet written");
            written.push(path);
        }
        Ok(written)
    }
}
