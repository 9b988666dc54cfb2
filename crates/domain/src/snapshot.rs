//! Document snapshot assembly
//!
//! A [`DocumentSnapshot`] combines one captured exchange with everything the
//! author declared about it. It is built once per exchange and never mutated.

use std::collections::HashSet;

use serde::Serialize;

use crate::capture::{ExchangeSide, HttpCapture};
use crate::descriptor::{Descriptor, DescriptorKind};
use crate::error::{DomainError, DomainResult};

/// Descriptors declared for both sides of an exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidedDescriptors {
    /// Request side.
    pub request: Vec<Descriptor>,
    /// Response side.
    pub response: Vec<Descriptor>,
}

impl SidedDescriptors {
    /// Descriptors of one side.
    #[must_use]
    pub fn side(&self, side: ExchangeSide) -> &[Descriptor] {
        match side {
            ExchangeSide::Request => &self.request,
            ExchangeSide::Response => &self.response,
        }
    }
}

/// Everything the author declared about one exchange, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredDescriptors {
    /// Request and response body fields.
    pub fields: SidedDescriptors,
    /// Request and response headers.
    pub headers: SidedDescriptors,
    /// Path parameters.
    pub path_parameters: Vec<Descriptor>,
    /// Query parameters.
    pub query_parameters: Vec<Descriptor>,
    /// Form parameters of an url-encoded request body.
    pub form_parameters: Vec<Descriptor>,
    /// Parts of a multipart request.
    pub request_parts: Vec<Descriptor>,
}

impl DeclaredDescriptors {
    /// Creates an empty declaration set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request body fields.
    #[must_use]
    pub fn with_request_fields(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.fields.request = descriptors;
        self
    }

    /// Sets the response body fields.
    #[must_use]
    pub fn with_response_fields(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.fields.response = descriptors;
        self
    }

    /// Sets the request headers.
    #[must_use]
    pub fn with_request_headers(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.headers.request = descriptors;
        self
    }

    /// Sets the response headers.
    #[must_use]
    pub fn with_response_headers(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.headers.response = descriptors;
        self
    }

    /// Sets the path parameters.
    #[must_use]
    pub fn with_path_parameters(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.path_parameters = descriptors;
        self
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query_parameters(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.query_parameters = descriptors;
        self
    }

    /// Sets the form parameters.
    #[must_use]
    pub fn with_form_parameters(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.form_parameters = descriptors;
        self
    }

    /// Sets the request parts.
    #[must_use]
    pub fn with_request_parts(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.request_parts = descriptors;
        self
    }
}

/// The immutable aggregate every snippet is rendered from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    http: HttpCapture,
    fields: SidedDescriptors,
    headers: SidedDescriptors,
    path_parameters: Vec<Descriptor>,
    query_parameters: Vec<Descriptor>,
    form_parameters: Vec<Descriptor>,
    request_parts: Vec<Descriptor>,
}

impl DocumentSnapshot {
    /// Assembles a snapshot from a capture and the declared descriptors.
    ///
    /// Assembly is structural only: nothing is inferred from the capture.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompleteCapture`] if the capture has no method
    /// or URL, or carries response data without a status code, and
    /// [`DomainError::InvalidInput`] if a collection holds a descriptor of the
    /// wrong kind or repeats a name.
    pub fn assemble(http: HttpCapture, declared: DeclaredDescriptors) -> DomainResult<Self> {
        check_capture(&http)?;

        let DeclaredDescriptors {
            fields,
            headers,
            path_parameters,
            query_parameters,
            form_parameters,
            request_parts,
        } = declared;

        check_collection("request fields", DescriptorKind::Field, &fields.request)?;
        check_collection("response fields", DescriptorKind::Field, &fields.response)?;
        check_collection("request headers", DescriptorKind::Header, &headers.request)?;
        check_collection("response headers", DescriptorKind::Header, &headers.response)?;
        check_collection("path parameters", DescriptorKind::Path, &path_parameters)?;
        check_collection("query parameters", DescriptorKind::Query, &query_parameters)?;
        check_collection("form parameters", DescriptorKind::Form, &form_parameters)?;
        check_collection("request parts", DescriptorKind::Part, &request_parts)?;

        Ok(Self {
            http,
            fields,
            headers,
            path_parameters,
            query_parameters,
            form_parameters,
            request_parts,
        })
    }

    /// The captured exchange.
    #[must_use]
    pub const fn http(&self) -> &HttpCapture {
        &self.http
    }

    /// Declared body fields.
    #[must_use]
    pub const fn fields(&self) -> &SidedDescriptors {
        &self.fields
    }

    /// Declared headers.
    #[must_use]
    pub const fn headers(&self) -> &SidedDescriptors {
        &self.headers
    }

    /// Declared path parameters.
    #[must_use]
    pub fn path_parameters(&self) -> &[Descriptor] {
        &self.path_parameters
    }

    /// Declared query parameters.
    #[must_use]
    pub fn query_parameters(&self) -> &[Descriptor] {
        &self.query_parameters
    }

    /// Declared form parameters.
    #[must_use]
    pub fn form_parameters(&self) -> &[Descriptor] {
        &self.form_parameters
    }

    /// Declared multipart parts.
    #[must_use]
    pub fn request_parts(&self) -> &[Descriptor] {
        &self.request_parts
    }
}

fn check_capture(http: &HttpCapture) -> DomainResult<()> {
    if http.method.trim().is_empty() {
        return Err(DomainError::IncompleteCapture("method is empty".to_string()));
    }
    if http.url.trim().is_empty() {
        return Err(DomainError::IncompleteCapture("url is empty".to_string()));
    }
    if http.status_code.is_none() && http.has_response_data() {
        return Err(DomainError::IncompleteCapture(
            "response data captured without a status code".to_string(),
        ));
    }
    Ok(())
}

fn check_collection(
    label: &str,
    expected: DescriptorKind,
    descriptors: &[Descriptor],
) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for descriptor in descriptors {
        if descriptor.kind() != expected {
            return Err(DomainError::InvalidInput(format!(
                "{label} contain {} descriptor '{}'",
                descriptor.kind(),
                descriptor.name()
            )));
        }
        // Header names are case-insensitive on the wire.
        let key = if expected == DescriptorKind::Header {
            descriptor.name().to_ascii_lowercase()
        } else {
            descriptor.name().to_string()
        };
        if !seen.insert(key) {
            return Err(DomainError::InvalidInput(format!(
                "{label} declare '{}' more than once",
                descriptor.name()
            )));
        }
    }
    Ok(())
}
