//! Call-site arguments.

use serde_json::Value;

use crate::{Headers, Params, Payload};

/// Arguments for one operation call.
///
/// `parameter` sets an entry of the explicit `parameters` mapping; `arg`
/// adds a loose named value. Both end up in the params used for path
/// substitution, explicit parameters winning over loose args.
///
/// # Example
///
/// ```
/// use rest_service_core::Invocation;
///
/// let call = Invocation::new()
///     .arg("id", 1)
///     .header("Accept", "application/json")
///     .payload("title", "new title");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    headers: Headers,
    payload: Payload,
    parameters: Params,
    extra: Params,
}

impl Invocation {
    /// Empty arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set a payload field.
    #[must_use]
    pub fn payload(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(name.into(), value.into());
        self
    }

    /// Merge a whole payload mapping.
    #[must_use]
    pub fn payload_map(mut self, payload: Payload) -> Self {
        self.payload.extend(payload);
        self
    }

    /// Set an explicit parameter.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Merge a whole explicit parameters mapping.
    #[must_use]
    pub fn parameters(mut self, parameters: Params) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Add a loose named value.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Call headers.
    #[must_use]
    pub const fn call_headers(&self) -> &Headers {
        &self.headers
    }

    /// Call payload.
    #[must_use]
    pub const fn call_payload(&self) -> &Payload {
        &self.payload
    }

    /// Explicit parameters.
    #[must_use]
    pub const fn explicit_parameters(&self) -> &Params {
        &self.parameters
    }

    /// Loose named values.
    #[must_use]
    pub const fn extra_args(&self) -> &Params {
        &self.extra
    }

    /// Consume into (headers, payload, parameters, extra args).
    #[must_use]
    pub fn into_parts(self) -> (Headers, Payload, Params, Params) {
        (self.headers, self.payload, self.parameters, self.extra)
    }
}
