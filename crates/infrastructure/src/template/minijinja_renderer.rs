//! Template engine backed by `minijinja`.

use minijinja::{AutoEscape, Environment};
use restdocs_application::ports::{TemplateError, TemplateRenderer};
use serde_json::Value;

const TEMPLATE_NAME: &str = "snippet";

/// Renders snippet templates with `minijinja`.
///
/// Output is never HTML-escaped and keeps the template's trailing newline.
/// Templates get a `cell` filter that escapes `|` for AsciiDoc and Markdown
/// table cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaRenderer;

impl MiniJinjaRenderer {
    /// Creates a new renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn render_sync(source: &str, context: &Value) -> Result<String, minijinja::Error> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.add_filter("cell", escape_cell);
        env.add_template(TEMPLATE_NAME, source)?;
        env.get_template(TEMPLATE_NAME)?.render(context)
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

impl TemplateRenderer for MiniJinjaRenderer {
    async fn render(&self, source: &str, context: &Value) -> Result<String, TemplateError> {
        Self::render_sync(source, context).map_err(|e| TemplateError::Render(e.to_string()))
    }
}
