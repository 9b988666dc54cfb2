//! Configuration loading from files and environment variables.

use std::path::Path;
use std::str::FromStr;

use restdocs_application::ports::{FileSystem, FileSystemError};
use restdocs_domain::{ConfigPatch, DomainError};

/// Environment variable overriding the output directory.
pub const ENV_OUTPUT: &str = "RESTDOCS_OUTPUT";
/// Environment variable overriding the snippet format.
pub const ENV_FORMAT: &str = "RESTDOCS_FORMAT";
/// Environment variable overriding strict mode.
pub const ENV_STRICT: &str = "RESTDOCS_STRICT";
/// Environment variable overriding the output layout.
pub const ENV_LAYOUT: &str = "RESTDOCS_LAYOUT";
/// Environment variable overriding the missing-field severity.
pub const ENV_MISSING_FIELD_SEVERITY: &str = "RESTDOCS_MISSING_FIELD_SEVERITY";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// The file could not be read.
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    /// The YAML file is malformed.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON file is malformed.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment variable holds an unusable value.
    #[error("invalid value for {name}: {source}")]
    InvalidVariable {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        source: DomainError,
    },
}

/// Reads a configuration patch from a file.
///
/// `.yml` and `.yaml` files are parsed as YAML, anything else as JSON. Keys
/// are camelCase and every key is optional.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_config_file<F: FileSystem>(
    fs: &F,
    path: &Path,
) -> Result<ConfigPatch, ConfigLoadError> {
    let content = fs.read_file_string(path).await?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"));

    let patch: ConfigPatch = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    tracing::debug!(path = %path.display(), "config file loaded");
    Ok(patch)
}

/// Reads a configuration patch from the process environment.
///
/// # Errors
///
/// Returns an error if a set variable holds an unusable value.
pub fn config_from_env() -> Result<ConfigPatch, ConfigLoadError> {
    config_from_vars(|name| std::env::var(name).ok())
}

/// Reads a configuration patch through `lookup`; unset or blank variables are
/// left out of the patch.
///
/// # Errors
///
/// Returns an error if a set variable holds an unusable value.
pub fn config_from_vars(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigPatch, ConfigLoadError> {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    Ok(ConfigPatch {
        output: get(ENV_OUTPUT).map(Into::into),
        format: parse_var(ENV_FORMAT, get(ENV_FORMAT))?,
        strict: get(ENV_STRICT).map(|v| parse_flag(ENV_STRICT, &v)).transpose()?,
        layout: parse_var(ENV_LAYOUT, get(ENV_LAYOUT))?,
        missing_field_severity: parse_var(
            ENV_MISSING_FIELD_SEVERITY,
            get(ENV_MISSING_FIELD_SEVERITY),
        )?,
    })
}

fn parse_var<T: FromStr<Err = DomainError>>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigLoadError> {
    value
        .map(|v| v.parse().map_err(|source| ConfigLoadError::InvalidVariable { name, source }))
        .transpose()
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigLoadError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigLoadError::InvalidVariable {
            name,
            source: DomainError::InvalidInput(format!("not a boolean: {other}")),
        }),
    }
}
