//! HTTP transport implementation using hyper-util.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    ContentType, Error, Headers, RawResponse, Request, Result, Transport, TransportFailure,
    TransportResult, config::ClientConfig, connector::https_connector, encode_payload,
};

/// [`Transport`] over hyper-util with connection pooling and rustls TLS.
///
/// Request payloads are form-encoded unless the `Content-Type` header names
/// JSON; a missing `Content-Type` header is filled in to match. Non-2xx
/// statuses and network faults come back as [`TransportFailure`].
///
/// Response bodies are decoded as UTF-8 lossily: invalid byte sequences are
/// replaced with `U+FFFD` before the body reaches a serializer or
/// [`ResponseWithError::result`](crate::ResponseWithError::result).
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use rest_service::{ClientConfig, HyperTransport};
///
/// let transport = HyperTransport::with_config(
///     ClientConfig::builder()
///         .timeout(Duration::from_secs(5))
///         .build(),
/// );
/// assert_eq!(transport.config().timeout, Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(&config));

        Self { inner, config }
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a hyper request, encoding the payload if there is one.
    fn build_hyper_request(request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, mut headers, payload) = request.into_parts();
        let url = Url::parse(&url)?;

        let body = match payload {
            Some(payload) => {
                let content_type = ContentType::from_headers(&headers);
                if !has_header(&headers, "content-type") {
                    headers.insert(
                        http::header::CONTENT_TYPE.to_string(),
                        content_type.as_str().to_string(),
                    );
                }
                Full::new(encode_payload(&payload, content_type)?)
            }
            None => Full::default(),
        };

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers, skipping values that are not valid strings.
    fn extract_headers(headers: &http::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, request: Request) -> Result<RawResponse> {
        let hyper_request = Self::build_hyper_request(request)?;

        let exchange = async {
            let response = self
                .inner
                .request(hyper_request)
                .await
                .map_err(|e| Error::connection(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = Self::extract_headers(response.headers());
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| Error::connection(e.to_string()))?
                .to_bytes();

            Ok(RawResponse::new(
                status,
                headers,
                String::from_utf8_lossy(&body).into_owned(),
            ))
        };

        tokio::time::timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout)?
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    async fn send(&self, request: Request) -> TransportResult {
        let method = request.method();
        let url = request.url().to_string();
        debug!(%method, %url, "sending request");

        match self.execute(request).await {
            Ok(raw) => {
                debug!(%method, %url, status = raw.status, "response received");
                raw.into_result()
            }
            Err(err) => {
                warn!(%method, %url, error = %err, "request failed without a response");
                Err(TransportFailure::from(err))
            }
        }
    }
}

fn has_header(headers: &Headers, name: &str) -> bool {
    headers.keys().any(|key| key.eq_ignore_ascii_case(name))
}
