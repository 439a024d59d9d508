//! Endpoint registrations.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{Headers, Params, PathTemplate, Payload, Serializer, SharedSerializer};

/// Per-endpoint defaults and serializer override.
///
/// # Example
///
/// ```
/// use rest_service_core::{EndpointOptions, EndpointSpec};
/// use serde_json::Value;
///
/// let options = EndpointOptions::<Value>::new()
///     .param("format", "json")
///     .header("Accept", "application/json")
///     .payload("albumId", 1);
/// let spec = EndpointSpec::new(http::Method::POST, "add_photo", "/photos", options);
/// assert_eq!(spec.params().len(), 1);
/// ```
pub struct EndpointOptions<O> {
    params: Params,
    headers: Headers,
    payload: Payload,
    serializer: Option<SharedSerializer<O>>,
}

impl<O> EndpointOptions<O> {
    /// Options with no defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Params::new(),
            headers: Headers::new(),
            payload: Payload::new(),
            serializer: None,
        }
    }

    /// Add a default substitution value.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replace the default substitution values.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Add a default header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the default headers.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Add a default payload field.
    #[must_use]
    pub fn payload(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(name.into(), value.into());
        self
    }

    /// Replace the default payload.
    #[must_use]
    pub fn payload_map(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Decode this endpoint's responses with `serializer` instead of the client's.
    #[must_use]
    pub fn serializer<S>(mut self, serializer: S) -> Self
    where
        S: Serializer<Output = O> + 'static,
    {
        self.serializer = Some(Arc::new(serializer));
        self
    }
}

impl<O> Default for EndpointOptions<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for EndpointOptions<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointOptions")
            .field("params", &self.params)
            .field("headers", &self.headers)
            .field("payload", &self.payload)
            .field("serializer", &self.serializer.is_some())
            .finish()
    }
}

/// One registered operation: verb, name, path template and options.
pub struct EndpointSpec<O> {
    method: http::Method,
    name: String,
    path: PathTemplate,
    options: EndpointOptions<O>,
}

impl<O> EndpointSpec<O> {
    /// Create an endpoint. The verb is not validated here.
    #[must_use]
    pub fn new(
        method: http::Method,
        name: impl Into<String>,
        path: impl Into<PathTemplate>,
        options: EndpointOptions<O>,
    ) -> Self {
        Self {
            method,
            name: name.into(),
            path: path.into(),
            options,
        }
    }

    /// HTTP verb.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Operation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path template.
    #[must_use]
    pub const fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// Default substitution values.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.options.params
    }

    /// Default headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.options.headers
    }

    /// Default payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.options.payload
    }

    /// Serializer override, if any.
    #[must_use]
    pub const fn serializer(&self) -> Option<&SharedSerializer<O>> {
        self.options.serializer.as_ref()
    }
}

impl<O> fmt::Debug for EndpointSpec<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointSpec")
            .field("method", &self.method)
            .field("name", &self.name)
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}
