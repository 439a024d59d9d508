//! Verb dispatch onto a [`Transport`].

use crate::{Headers, Method, Payload, Result, Transport, TransportExt, TransportResult};

/// Execute one request through the transport.
///
/// GET forwards headers only; POST, PUT and PATCH forward payload and
/// headers; DELETE forwards headers and drops the payload. Any other verb
/// fails with [`Error::UnsupportedMethod`](crate::Error::UnsupportedMethod)
/// before the transport is touched.
///
/// The outer `Result` only carries that guard; the transport's own success
/// or failure is the inner [`TransportResult`].
pub async fn execute<T: Transport>(
    transport: &T,
    method: &http::Method,
    endpoint: &str,
    payload: Payload,
    headers: Headers,
) -> Result<TransportResult> {
    let method = Method::try_from(method)?;

    let result = match method {
        Method::Get => transport.get(endpoint, headers).await,
        Method::Post => transport.post(endpoint, payload, headers).await,
        Method::Put => transport.put(endpoint, payload, headers).await,
        Method::Patch => transport.patch(endpoint, payload, headers).await,
        Method::Delete => transport.delete(endpoint, headers).await,
    };

    Ok(result)
}
