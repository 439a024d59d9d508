//! Error types for rest-service.

use derive_more::{Display, Error, From};

/// Main error type for rest-service operations.
///
/// Transport failures (non-2xx statuses, connection faults) are not part of
/// this enum on the call path: they are recovered into
/// [`Reply::Failure`](crate::Reply::Failure). The transport-level variants
/// exist so transports can describe what went wrong before folding it into a
/// [`TransportFailure`](crate::TransportFailure).
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// HTTP verb outside GET, POST, PUT, PATCH and DELETE.
    #[display("unsupported HTTP method: {_0}")]
    #[from(skip)]
    UnsupportedMethod(#[error(not(source))] String),

    /// No endpoint registered under this operation name.
    #[display("unknown operation: {_0}")]
    #[from(skip)]
    UnknownOperation(#[error(not(source))] String),

    /// The response body could not be decoded by the effective serializer.
    #[display("serialization error at '{path}': {message}")]
    #[from(skip)]
    Serialization {
        /// Path to the failing field (e.g., "user.address.city"), empty for syntax errors.
        path: String,
        /// Error message.
        message: String,
    },

    /// JSON payload encoding error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded payload encoding error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unsupported method error.
    #[must_use]
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod(method.into())
    }

    /// Create an unknown operation error.
    #[must_use]
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    /// Create a serialization error with path context.
    #[must_use]
    pub fn serialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the response body could not be decoded.
    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns `true` if this is an unsupported method error.
    #[must_use]
    pub const fn is_unsupported_method(&self) -> bool {
        matches!(self, Self::UnsupportedMethod(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::unsupported_method("PURGE");
        assert_eq!(err.to_string(), "unsupported HTTP method: PURGE");

        let err = Error::unknown_operation("find_photo");
        assert_eq!(err.to_string(), "unknown operation: find_photo");

        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "connection error: failed to connect");

        let err = Error::serialization("photo.title", "invalid type: integer `1`");
        assert_eq!(
            err.to_string(),
            "serialization error at 'photo.title': invalid type: integer `1`"
        );
    }

    #[test]
    fn error_predicates() {
        assert!(Error::Timeout.is_timeout());
        assert!(!Error::connection("failed").is_timeout());

        assert!(Error::connection("failed").is_connection());
        assert!(!Error::Timeout.is_connection());

        assert!(Error::serialization("", "eof").is_serialization());
        assert!(Error::unsupported_method("HEAD").is_unsupported_method());
        assert!(!Error::unknown_operation("x").is_unsupported_method());
    }

    #[test]
    fn error_from_url() {
        let err: Error = url::Url::parse("not a url").expect_err("invalid").into();
        assert!(err.to_string().starts_with("invalid URL"));
    }
}
