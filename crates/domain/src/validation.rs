//! Declared-versus-observed consistency checks
//!
//! In strict mode every top-level body field and every header seen on the wire
//! must have been declared. Declared names that never showed up are collected
//! separately and reported at the configured [`Severity`].

use std::collections::HashSet;

use serde_json::Value;

use crate::capture::ExchangeSide;
use crate::config::{RestDocsConfig, Severity};
use crate::descriptor::Descriptor;
use crate::error::{DomainResult, MissingFieldError, UnexpectedFieldError};
use crate::snapshot::DocumentSnapshot;

/// Settings the validator reads from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationPolicy {
    /// Run the checks at all.
    pub strict: bool,
    /// What to do with declared names that were not observed.
    pub missing_field_severity: Severity,
}

impl From<&RestDocsConfig> for ValidationPolicy {
    fn from(config: &RestDocsConfig) -> Self {
        Self {
            strict: config.strict,
            missing_field_severity: config.missing_field_severity,
        }
    }
}

/// Non-fatal findings of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Declared names absent from the exchange, one entry per side and subject.
    pub missing: Vec<MissingFieldError>,
}

impl ValidationReport {
    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Checks a snapshot against its declarations.
///
/// Header names compare case-insensitively, and headers are only checked on
/// a side where at least one header was declared.
///
/// # Errors
///
/// Returns [`UnexpectedFieldError`] for the first side with undeclared
/// fields or headers, and [`MissingFieldError`] when the severity is
/// [`Severity::Error`] and a declared name was not observed.
pub fn validate(
    snapshot: &DocumentSnapshot,
    policy: ValidationPolicy,
) -> DomainResult<ValidationReport> {
    let mut report = ValidationReport::default();
    if !policy.strict {
        return Ok(report);
    }

    for side in [ExchangeSide::Request, ExchangeSide::Response] {
        let observed_body = snapshot.http().observed_body(side);
        let observed_fields = body_keys(&observed_body);
        let declared_fields = snapshot.fields().side(side);

        let extra = undeclared(&observed_fields, declared_fields, false);
        if !extra.is_empty() {
            return Err(UnexpectedFieldError::new(side.as_str(), "Unexpected fields", extra).into());
        }
        let missing = unobserved(declared_fields, &observed_fields, false);
        if !missing.is_empty() {
            report
                .missing
                .push(MissingFieldError::new(side.as_str(), "Missing fields", missing));
        }

        let declared_headers = snapshot.headers().side(side);
        if declared_headers.is_empty() {
            continue;
        }
        let observed_headers: Vec<&str> = snapshot
            .http()
            .headers(side)
            .keys()
            .map(String::as_str)
            .collect();

        let extra = undeclared(&observed_headers, declared_headers, true);
        if !extra.is_empty() {
            return Err(
                UnexpectedFieldError::new(side.as_str(), "Unexpected headers", extra).into(),
            );
        }
        let missing = unobserved(declared_headers, &observed_headers, true);
        if !missing.is_empty() {
            report
                .missing
                .push(MissingFieldError::new(side.as_str(), "Missing headers", missing));
        }
    }

    if policy.missing_field_severity == Severity::Error {
        if let Some(first) = report.missing.into_iter().next() {
            return Err(first.into());
        }
        return Ok(ValidationReport::default());
    }

    Ok(report)
}

fn body_keys(body: &Value) -> Vec<&str> {
    match body {
        Value::Object(map) => map.keys().map(String::as_str).collect(),
        _ => Vec::new(),
    }
}

fn normalize_name(name: &str, ignore_case: bool) -> String {
    if ignore_case {
        name.to_ascii_lowercase()
    } else {
        name.to_string()
    }
}

fn undeclared(observed: &[&str], declared: &[Descriptor], ignore_case: bool) -> Vec<String> {
    let declared: HashSet<String> = declared
        .iter()
        .map(|d| normalize_name(d.name(), ignore_case))
        .collect();
    observed
        .iter()
        .filter(|name| !declared.contains(&normalize_name(name, ignore_case)))
        .map(ToString::to_string)
        .collect()
}

fn unobserved(declared: &[Descriptor], observed: &[&str], ignore_case: bool) -> Vec<String> {
    let observed: HashSet<String> = observed
        .iter()
        .map(|name| normalize_name(name, ignore_case))
        .collect();
    declared
        .iter()
        .filter(|d| !d.is_optional())
        .filter(|d| !observed.contains(&normalize_name(d.name(), ignore_case)))
        .map(|d| d.name().to_string())
        .collect()
}
