//! Response model.
//!
//! - [`RawResponse`] - what a transport hands back on success
//! - [`Response`] - a successful call, with the serializer's output
//! - [`ResponseWithError`] - a failed call, with the raw error body
//! - [`Reply`] - exactly one of the two per invocation

use crate::{Headers, TransportFailure, TransportResult};

// ============================================================================
// Raw Response
// ============================================================================

/// Undecoded response as received by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Headers,
    /// Response body.
    pub body: String,
}

impl RawResponse {
    /// Creates a new raw response.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Classify by status: 2xx is a success, anything else a failure.
    ///
    /// The failure message is `"<code> <reason>"`, e.g. `"404 Not Found"`.
    pub fn into_result(self) -> TransportResult {
        if self.is_success() {
            return Ok(self);
        }

        let message = http::StatusCode::from_u16(self.status).map_or_else(
            |_| self.status.to_string(),
            |code| match code.canonical_reason() {
                Some(reason) => format!("{} {reason}", code.as_u16()),
                None => code.as_u16().to_string(),
            },
        );

        Err(TransportFailure {
            status: Some(self.status),
            headers: self.headers,
            body: self.body,
            message,
        })
    }
}

// ============================================================================
// Successful Response
// ============================================================================

/// Successful call: status, headers, raw body and deserialized result.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<O> {
    status: u16,
    headers: Headers,
    body: String,
    result: O,
}

impl<O> Response<O> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: String, result: O) -> Self {
        Self {
            status,
            headers,
            body,
            result,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Single header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Serializer output.
    #[must_use]
    pub const fn result(&self) -> &O {
        &self.result
    }

    /// Consume into the serializer output.
    #[must_use]
    pub fn into_result(self) -> O {
        self.result
    }
}

// ============================================================================
// Failed Response
// ============================================================================

/// Failed call: the transport reported a non-2xx status or a network fault.
///
/// The body is never run through the serializer; [`result`](Self::result)
/// is the raw error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseWithError {
    status: Option<u16>,
    headers: Headers,
    body: String,
    message: String,
}

impl ResponseWithError {
    /// Creates a new error response.
    #[must_use]
    pub fn new(
        status: Option<u16>,
        headers: Headers,
        body: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            message: message.into(),
        }
    }

    /// HTTP status code, absent when no response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The raw error body.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.body
    }

    /// Failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status is 4xx.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status.is_some_and(|s| (400..500).contains(&s))
    }

    /// Status is 5xx.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status.is_some_and(|s| (500..600).contains(&s))
    }

    /// Try to decode the error body as JSON.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(self.body.as_bytes())
    }
}

impl From<TransportFailure> for ResponseWithError {
    fn from(failure: TransportFailure) -> Self {
        Self {
            status: failure.status,
            headers: failure.headers,
            body: failure.body,
            message: failure.message,
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Outcome of one operation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<O> {
    /// The transport succeeded and the body was deserialized.
    Success(Response<O>),
    /// The transport failed.
    Failure(ResponseWithError),
}

impl<O> Reply<O> {
    /// Returns `true` for [`Reply::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success(response) => Some(response.status()),
            Self::Failure(response) => response.status(),
        }
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        match self {
            Self::Success(response) => response.headers(),
            Self::Failure(response) => response.headers(),
        }
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Success(response) => response.body(),
            Self::Failure(response) => response.body(),
        }
    }

    /// Failure message, for [`Reply::Failure`].
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(response) => Some(response.message()),
        }
    }

    /// The successful response, if any.
    #[must_use]
    pub const fn success(&self) -> Option<&Response<O>> {
        match self {
            Self::Success(response) => Some(response),
            Self::Failure(_) => None,
        }
    }

    /// The failed response, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ResponseWithError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(response) => Some(response),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<Response<O>, ResponseWithError> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Failure(response) => Err(response),
        }
    }
}
