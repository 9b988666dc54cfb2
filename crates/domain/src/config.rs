//! Snippet generation configuration
//!
//! [`RestDocsConfig`] is an immutable value. [`ConfigService`] is the explicit
//! init-once holder a test suite keeps for it: updates swap in a new value and
//! leave every previously handed-out `Arc` untouched.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Markup language of rendered snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnippetFormat {
    /// AsciiDoc (default).
    #[default]
    Adoc,
    /// Markdown.
    Md,
}

impl SnippetFormat {
    /// Returns the short name, which is also the default file extension.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adoc => "adoc",
            Self::Md => "md",
        }
    }
}

impl FromStr for SnippetFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adoc" | "asciidoc" | "asciidoctor" => Ok(Self::Adoc),
            "md" | "markdown" => Ok(Self::Md),
            other => Err(DomainError::InvalidInput(format!("unknown snippet format: {other}"))),
        }
    }
}

/// How rendered snippets are laid out under the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// `{output}/{identifier}/{snippet}.{ext}`
    #[default]
    Nested,
    /// `{output}/{identifier}-{snippet}.{ext}`
    Flat,
}

impl FromStr for OutputLayout {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(Self::Nested),
            "flat" => Ok(Self::Flat),
            other => Err(DomainError::InvalidInput(format!("unknown output layout: {other}"))),
        }
    }
}

/// How a declared-but-unobserved field is reported in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Log a warning and continue.
    #[default]
    Warn,
    /// Fail the render.
    Error,
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(DomainError::InvalidInput(format!("unknown severity: {other}"))),
        }
    }
}

/// Immutable snippet generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestDocsConfig {
    /// Directory snippets are written to.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Markup language of the snippets.
    #[serde(default)]
    pub format: SnippetFormat,
    /// Fail when the exchange and the declarations disagree.
    #[serde(default)]
    pub strict: bool,
    /// File layout under `output`.
    #[serde(default)]
    pub layout: OutputLayout,
    /// Severity of declared names missing from the exchange.
    #[serde(default)]
    pub missing_field_severity: Severity,
}

fn default_output() -> PathBuf {
    PathBuf::from("target/generated-snippets")
}

impl Default for RestDocsConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: SnippetFormat::default(),
            strict: false,
            layout: OutputLayout::default(),
            missing_field_severity: Severity::default(),
        }
    }
}

/// A partial configuration; set fields override the base they are applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    /// Output directory override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Format override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SnippetFormat>,
    /// Strict flag override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    /// Layout override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<OutputLayout>,
    /// Missing-field severity override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_field_severity: Option<Severity>,
}

impl ConfigPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the output directory.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Overrides the format.
    #[must_use]
    pub const fn with_format(mut self, format: SnippetFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Overrides the strict flag.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Overrides the layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Overrides the missing-field severity.
    #[must_use]
    pub const fn with_missing_field_severity(mut self, severity: Severity) -> Self {
        self.missing_field_severity = Some(severity);
        self
    }

    /// Layers `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            output: other.output.or(self.output),
            format: other.format.or(self.format),
            strict: other.strict.or(self.strict),
            layout: other.layout.or(self.layout),
            missing_field_severity: other.missing_field_severity.or(self.missing_field_severity),
        }
    }

    /// Produces a new config by shallow-merging this patch over `base`.
    #[must_use]
    pub fn apply(&self, base: &RestDocsConfig) -> RestDocsConfig {
        RestDocsConfig {
            output: self.output.clone().unwrap_or_else(|| base.output.clone()),
            format: self.format.unwrap_or(base.format),
            strict: self.strict.unwrap_or(base.strict),
            layout: self.layout.unwrap_or(base.layout),
            missing_field_severity: self
                .missing_field_severity
                .unwrap_or(base.missing_field_severity),
        }
    }
}

/// Lifecycle of the suite-wide configuration.
#[derive(Debug, Clone, Default)]
pub enum ConfigState {
    /// `init` has not run yet.
    #[default]
    Uninitialized,
    /// The current configuration.
    Initialized(Arc<RestDocsConfig>),
}

/// Init-once holder of the suite-wide configuration.
///
/// Writes happen from test setup and teardown only, before any render starts,
/// so no locking is involved.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    state: ConfigState,
}

impl ConfigService {
    /// Creates an uninitialized service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes from defaults merged with `overrides`.
    ///
    /// A second call returns the existing configuration and ignores `overrides`.
    pub fn init(&mut self, overrides: ConfigPatch) -> Arc<RestDocsConfig> {
        if let ConfigState::Initialized(config) = &self.state {
            return Arc::clone(config);
        }
        let config = Arc::new(overrides.apply(&RestDocsConfig::default()));
        self.state = ConfigState::Initialized(Arc::clone(&config));
        config
    }

    /// Returns the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotInitialized`] before `init`.
    pub fn get(&self) -> DomainResult<Arc<RestDocsConfig>> {
        match &self.state {
            ConfigState::Initialized(config) => Ok(Arc::clone(config)),
            ConfigState::Uninitialized => Err(DomainError::NotInitialized),
        }
    }

    /// Replaces the configuration with `partial` merged over the current one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotInitialized`] before `init`.
    pub fn update(&mut self, partial: &ConfigPatch) -> DomainResult<Arc<RestDocsConfig>> {
        let current = self.get()?;
        let next = Arc::new(partial.apply(&current));
        self.state = ConfigState::Initialized(Arc::clone(&next));
        Ok(next)
    }

    /// Returns true once `init` has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        matches!(self.state, ConfigState::Initialized(_))
    }

    /// Returns to the uninitialized state, for suite teardown.
    pub fn reset(&mut self) {
        self.state = ConfigState::Uninitialized;
    }
}
