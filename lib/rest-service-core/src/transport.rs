//! Transport traits.
//!
//! - [`Transport`] - executes one [`Request`] and reports success or failure
//! - [`TransportExt`] - one helper per verb, as used by the executor
//!
//! The facade crate ships a hyper-based implementation. Implement
//! [`Transport`] directly for custom stacks or test fixtures.

use std::future::Future;
use std::sync::Arc;

use derive_more::Display;

use crate::{Error, Headers, Method, Payload, RawResponse, Request};

/// Outcome of a transport call.
pub type TransportResult = Result<RawResponse, TransportFailure>;

/// A non-2xx response or a network-level fault.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{message}")]
pub struct TransportFailure {
    /// HTTP status code, absent when no response was received.
    pub status: Option<u16>,
    /// Response headers.
    pub headers: Headers,
    /// Response body.
    pub body: String,
    /// Failure message.
    pub message: String,
}

impl TransportFailure {
    /// A failure that never produced a response.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            headers: Headers::new(),
            body: String::new(),
            message: message.into(),
        }
    }
}

impl From<Error> for TransportFailure {
    fn from(error: Error) -> Self {
        Self::network(error.to_string())
    }
}

/// Executes HTTP requests.
///
/// Implementations return `Err` for any non-2xx status (see
/// [`RawResponse::into_result`]) and for network faults.
///
/// # Example
///
/// ```
/// use rest_service_core::{Headers, RawResponse, Request, Transport, TransportResult};
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn send(&self, _request: Request) -> TransportResult {
///         RawResponse::new(200, Headers::new(), "[]").into_result()
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send a request.
    fn send(&self, request: Request) -> impl Future<Output = TransportResult> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: Request) -> impl Future<Output = TransportResult> + Send {
        (**self).send(request)
    }
}

/// Extension trait for [`Transport`] with one method per verb.
///
/// GET and DELETE forward headers but never a body; POST, PUT and PATCH
/// forward both.
pub trait TransportExt: Transport {
    /// Send a GET request.
    fn get(&self, url: &str, headers: Headers) -> impl Future<Output = TransportResult> + Send {
        self.send(Request::builder(Method::Get, url).headers(headers).build())
    }

    /// Send a POST request.
    fn post(
        &self,
        url: &str,
        payload: Payload,
        headers: Headers,
    ) -> impl Future<Output = TransportResult> + Send {
        self.send(
            Request::builder(Method::Post, url)
                .headers(headers)
                .body(payload)
                .build(),
        )
    }

    /// Send a PUT request.
    fn put(
        &self,
        url: &str,
        payload: Payload,
        headers: Headers,
    ) -> impl Future<Output = TransportResult> + Send {
        self.send(
            Request::builder(Method::Put, url)
                .headers(headers)
                .body(payload)
                .build(),
        )
    }

    /// Send a PATCH request.
    fn patch(
        &self,
        url: &str,
        payload: Payload,
        headers: Headers,
    ) -> impl Future<Output = TransportResult> + Send {
        self.send(
            Request::builder(Method::Patch, url)
                .headers(headers)
                .body(payload)
                .build(),
        )
    }

    /// Send a DELETE request.
    fn delete(&self, url: &str, headers: Headers) -> impl Future<Output = TransportResult> + Send {
        self.send(Request::builder(Method::Delete, url).headers(headers).build())
    }
}

// Blanket implementation for all Transport implementors
impl<T: Transport> TransportExt for T {}
