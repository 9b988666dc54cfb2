//! Templates compiled into the crate.

use std::collections::HashMap;

use restdocs_application::ports::{Template, TemplateError, TemplateStore};
use restdocs_domain::SnippetFormat;

macro_rules! templates {
    ($dir:literal, $ext:literal, [$($name:literal),* $(,)?]) => {
        &[$(($name, include_str!(concat!("../../templates/", $dir, "/", $name, ".", $ext)))),*]
    };
}

const ASCIIDOCTOR: &[(&str, &str)] = templates!(
    "asciidoctor",
    "adoc",
    [
        "curl-request",
        "http-request",
        "http-response",
        "path-parameters",
        "query-parameters",
        "form-parameters",
        "request-headers",
        "response-headers",
        "request-cookies",
        "response-cookies",
        "request-body",
        "response-body",
        "request-fields",
        "response-fields",
        "request-parts",
    ]
);

const MARKDOWN: &[(&str, &str)] = templates!(
    "markdown",
    "md",
    [
        "curl-request",
        "http-request",
        "http-response",
        "path-parameters",
        "query-parameters",
        "form-parameters",
        "request-headers",
        "response-headers",
        "request-cookies",
        "response-cookies",
        "request-body",
        "response-body",
        "request-fields",
        "response-fields",
        "request-parts",
    ]
);

/// The default template set for one snippet format, embedded at build time.
///
/// Loading is a no-op; every template is available from construction.
#[derive(Debug, Clone)]
pub struct BuiltinTemplateStore {
    format: SnippetFormat,
    templates: HashMap<String, Template>,
}

impl BuiltinTemplateStore {
    /// Creates the store for `format`.
    #[must_use]
    pub fn new(format: SnippetFormat) -> Self {
        let sources = match format {
            SnippetFormat::Adoc => ASCIIDOCTOR,
            SnippetFormat::Md => MARKDOWN,
        };
        let templates = sources
            .iter()
            .map(|(name, content)| ((*name).to_string(), Template::new(format.as_str(), *content)))
            .collect();
        Self { format, templates }
    }

    /// The format the templates produce.
    #[must_use]
    pub const fn format(&self) -> SnippetFormat {
        self.format
    }
}

impl TemplateStore for BuiltinTemplateStore {
    async fn load(&self) -> Result<(), TemplateError> {
        Ok(())
    }

    fn get(&self, name: &str) -> Result<&Template, TemplateError> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }
}
