//! Template engine port

use std::future::Future;

use serde_json::Value;

use super::TemplateError;

/// Port for the engine that turns a template and a context into text.
///
/// Implementations must not HTML-escape: snippets are AsciiDoc, Markdown or
/// raw HTTP text. The built-in table templates expect a `cell` filter that
/// escapes `|` inside a table cell.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `source` against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if the template is invalid or
    /// references something the context cannot provide.
    fn render(
        &self,
        source: &str,
        context: &Value,
    ) -> impl Future<Output = Result<String, TemplateError>> + Send;
}
