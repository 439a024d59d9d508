//! HTTP method types.

use derive_more::Display;

use crate::Error;

/// One of the five verbs an endpoint can be executed with.
///
/// Endpoints are registered with an arbitrary [`http::Method`]; the
/// conversion into this enum is the runtime guard that rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// Headers only.
    #[display("GET")]
    Get,
    /// Payload and headers.
    #[display("POST")]
    Post,
    /// Payload and headers.
    #[display("PUT")]
    Put,
    /// Payload and headers.
    #[display("PATCH")]
    Patch,
    /// Headers only; a payload is dropped.
    #[display("DELETE")]
    Delete,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = Error;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        match *method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PUT => Ok(Self::Put),
            http::Method::PATCH => Ok(Self::Patch),
            http::Method::DELETE => Ok(Self::Delete),
            ref other => Err(Error::unsupported_method(other.as_str())),
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        Self::try_from(&method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_http_verb() {
        for method in [
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Patch,
            Method::Delete,
        ] {
            assert_eq!(method.to_string(), http::Method::from(method).as_str());
        }
    }

    #[test]
    fn method_from_http() {
        assert_eq!(
            Method::try_from(http::Method::DELETE).expect("DELETE"),
            Method::Delete
        );
        assert_eq!(
            Method::try_from(&http::Method::POST).expect("POST"),
            Method::Post
        );
    }

    #[test]
    fn method_rejects_other_verbs() {
        let err = Method::try_from(http::Method::HEAD).expect_err("HEAD is not supported");
        assert!(err.is_unsupported_method());

        let purge = http::Method::from_bytes(b"PURGE").expect("extension method");
        let err = Method::try_from(purge).expect_err("PURGE is not supported");
        assert_eq!(err.to_string(), "unsupported HTTP method: PURGE");
    }
}
