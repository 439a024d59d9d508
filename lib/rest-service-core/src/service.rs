//! Client instances and the per-call pipeline.
//!
//! A [`Service`] pairs a shared [`ServiceDeclaration`] with a [`Transport`]
//! and the instance configuration resolved by [`ServiceBuilder`]. Each
//! [`Service::call`] merges the configuration layers, fills the path
//! template, executes the request and normalizes the outcome into a
//! [`Reply`].

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{Instrument, info, info_span, warn};

use crate::executor::execute;
use crate::merge::{merge_headers, merge_params, merge_payload};
use crate::{
    EndpointSpec, Error, Headers, Invocation, JsonSerializer, Params, Reply, Response,
    ResponseWithError, Result, Serializer, ServiceDeclaration, SharedSerializer, Transport,
};

fn default_serializer<O: DeserializeOwned + 'static>() -> SharedSerializer<O> {
    Arc::new(JsonSerializer::<O>::new())
}

// ============================================================================
// Builder
// ============================================================================

/// Resolves instance configuration.
///
/// Every value follows the same precedence: set on the builder, else
/// declared on the [`ServiceDeclaration`], else the built-in default
/// (empty host, [`JsonSerializer`], empty headers and params, debug off).
pub struct ServiceBuilder<O, T> {
    declaration: Arc<ServiceDeclaration<O>>,
    transport: T,
    host: Option<String>,
    serializer: Option<SharedSerializer<O>>,
    headers: Option<Headers>,
    params: Option<Params>,
    debug: Option<bool>,
}

impl<O, T> ServiceBuilder<O, T> {
    /// Start from a declaration and a transport.
    #[must_use]
    pub fn new(declaration: impl Into<Arc<ServiceDeclaration<O>>>, transport: T) -> Self {
        Self {
            declaration: declaration.into(),
            transport,
            host: None,
            serializer: None,
            headers: None,
            params: None,
            debug: None,
        }
    }

    /// Override the declared host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Override the declared serializer.
    #[must_use]
    pub fn serializer<S>(mut self, serializer: S) -> Self
    where
        S: Serializer<Output = O> + 'static,
    {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    /// Override the declared default headers.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Override the declared default params.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Override the declared debug flag.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}

impl<O: DeserializeOwned + 'static, T> ServiceBuilder<O, T> {
    /// Build the service.
    #[must_use]
    pub fn build(self) -> Service<O, T> {
        let declaration = self.declaration;

        let host = self
            .host
            .or_else(|| declaration.declared_host().map(str::to_string))
            .unwrap_or_default();
        let serializer = self
            .serializer
            .or_else(|| declaration.declared_serializer().cloned())
            .unwrap_or_else(default_serializer);
        let default_headers = self
            .headers
            .or_else(|| declaration.declared_headers().cloned())
            .unwrap_or_default();
        let default_params = self
            .params
            .or_else(|| declaration.declared_params().cloned())
            .unwrap_or_default();
        let debug = self
            .debug
            .or(declaration.declared_debug())
            .unwrap_or(false);

        Service {
            declaration,
            transport: self.transport,
            host,
            serializer,
            default_headers,
            default_params,
            debug,
        }
    }
}

impl<O, T> fmt::Debug for ServiceBuilder<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBuilder")
            .field("declaration", &self.declaration)
            .field("host", &self.host)
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Service
// ============================================================================

/// A client instance: declaration, transport and resolved configuration.
///
/// The configuration is read-only while a call runs; the setters exist for
/// adjusting an instance between calls.
///
/// # Example
///
/// ```
/// use rest_service_core::{
///     EndpointOptions, Headers, Invocation, RawResponse, Request, Service, ServiceDeclaration,
///     Transport, TransportResult,
/// };
/// use serde_json::{Value, json};
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn send(&self, request: Request) -> TransportResult {
///         assert_eq!(request.url(), "https://api.test/photos/1");
///         RawResponse::new(200, Headers::new(), r#"{"id":1}"#).into_result()
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> rest_service_core::Result<()> {
/// let declaration = ServiceDeclaration::<Value>::new()
///     .host("https://api.test")
///     .get("find_photo", "/photos/:id", EndpointOptions::new());
/// let service = Service::builder(declaration, Canned).build();
///
/// let reply = service.call("find_photo", Invocation::new().arg("id", 1)).await?;
/// assert_eq!(reply.success().map(|r| r.result()), Some(&json!({"id": 1})));
/// # Ok(())
/// # }
/// ```
pub struct Service<O, T> {
    declaration: Arc<ServiceDeclaration<O>>,
    transport: T,
    host: String,
    serializer: SharedSerializer<O>,
    default_headers: Headers,
    default_params: Params,
    debug: bool,
}

impl<O, T> Service<O, T> {
    /// Create a new builder.
    #[must_use]
    pub fn builder(
        declaration: impl Into<Arc<ServiceDeclaration<O>>>,
        transport: T,
    ) -> ServiceBuilder<O, T> {
        ServiceBuilder::new(declaration, transport)
    }

    /// The shared declaration.
    #[must_use]
    pub fn declaration(&self) -> &ServiceDeclaration<O> {
        &self.declaration
    }

    /// The transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Host prefixed to every endpoint path.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Replace the host.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// Client-level serializer.
    #[must_use]
    pub const fn serializer(&self) -> &SharedSerializer<O> {
        &self.serializer
    }

    /// Replace the client-level serializer.
    pub fn set_serializer<S>(&mut self, serializer: S)
    where
        S: Serializer<Output = O> + 'static,
    {
        self.serializer = Arc::new(serializer);
    }

    /// Default headers.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Mutable access to the default headers.
    pub fn default_headers_mut(&mut self) -> &mut Headers {
        &mut self.default_headers
    }

    /// Default params.
    #[must_use]
    pub const fn default_params(&self) -> &Params {
        &self.default_params
    }

    /// Mutable access to the default params.
    pub fn default_params_mut(&mut self) -> &mut Params {
        &mut self.default_params
    }

    /// Whether calls are traced.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Turn call tracing on or off.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Returns `true` if `name` is a registered operation.
    #[must_use]
    pub fn has_operation(&self, name: &str) -> bool {
        self.declaration.has_operation(name)
    }

    /// Registered operation names, in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.declaration.operations()
    }
}

impl<O, T: Transport> Service<O, T> {
    /// Call the operation registered under `operation`.
    ///
    /// Transport failures come back as [`Reply::Failure`]. `Err` is reserved
    /// for an unknown operation, an unsupported verb, and a success body the
    /// effective serializer cannot decode.
    pub async fn call(&self, operation: &str, invocation: Invocation) -> Result<Reply<O>> {
        let endpoint = self
            .declaration
            .endpoint(operation)
            .ok_or_else(|| Error::unknown_operation(operation))?;

        self.invoke(endpoint, invocation).await
    }

    async fn invoke(&self, endpoint: &EndpointSpec<O>, invocation: Invocation) -> Result<Reply<O>> {
        let (headers, payload, parameters, extra) = invocation.into_parts();

        let params = merge_params(&self.default_params, endpoint.params(), &extra, &parameters);
        let headers = merge_headers(&self.default_headers, endpoint.headers(), &headers);
        let payload = merge_payload(endpoint.payload(), &payload);
        let serializer = endpoint.serializer().unwrap_or(&self.serializer);

        let url = format!("{}{}", self.host, endpoint.path().substitute(&params));
        let method = endpoint.method();
        let debug = self.debug;

        let span = info_span!(
            "rest_service_call",
            operation = endpoint.name(),
            %method,
            %url
        );

        async move {
            if debug {
                info!(headers = ?headers, payload = ?payload, "sending request");

                let unfilled: Vec<_> = endpoint
                    .path()
                    .placeholders()
                    .into_iter()
                    .filter(|name| !params.contains_key(*name))
                    .collect();
                if !unfilled.is_empty() {
                    warn!(placeholders = ?unfilled, "path placeholders left unfilled");
                }
            }

            let outcome = execute(&self.transport, method, &url, payload, headers).await?;

            let reply = match outcome {
                Ok(raw) => {
                    let result = serializer.deserialize(&raw.body).inspect_err(|err| {
                        if debug {
                            warn!(status = raw.status, error = %err, "response body rejected");
                        }
                    })?;
                    Reply::Success(Response::new(raw.status, raw.headers, raw.body, result))
                }
                Err(failure) => Reply::Failure(ResponseWithError::from(failure)),
            };

            if debug {
                match &reply {
                    Reply::Success(response) => info!(
                        status = response.status(),
                        headers = ?response.headers(),
                        body = response.body(),
                        "request completed"
                    ),
                    Reply::Failure(response) => warn!(
                        status = ?response.status(),
                        headers = ?response.headers(),
                        body = response.body(),
                        message = response.message(),
                        "request failed"
                    ),
                }
            }

            Ok(reply)
        }
        .instrument(span)
        .await
    }
}

impl<O, T: Clone> Clone for Service<O, T> {
    fn clone(&self) -> Self {
        Self {
            declaration: Arc::clone(&self.declaration),
            transport: self.transport.clone(),
            host: self.host.clone(),
            serializer: Arc::clone(&self.serializer),
            default_headers: self.default_headers.clone(),
            default_params: self.default_params.clone(),
            debug: self.debug,
        }
    }
}

impl<O, T> fmt::Debug for Service<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("host", &self.host)
            .field("default_headers", &self.default_headers)
            .field("default_params", &self.default_params)
            .field("debug", &self.debug)
            .field("operations", &self.operations().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert2::{check, let_assert};
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::FixtureTransport;
    use crate::{EndpointOptions, FnSerializer, Method};

    fn photos() -> ServiceDeclaration<Value> {
        ServiceDeclaration::new()
            .host("https://api.test")
            .get("photos", "/photos", EndpointOptions::new())
            .get("find_photo", "/photos/:id", EndpointOptions::new())
            .post("add_photo", "/photos", EndpointOptions::new())
            .put("update_photo", "/photos/:id", EndpointOptions::new())
            .patch("update_photo_data", "/photos/:id", EndpointOptions::new())
            .delete("delete_photo", "/photos/:id", EndpointOptions::new())
    }

    fn service(
        declaration: ServiceDeclaration<Value>,
        transport: &Arc<FixtureTransport>,
    ) -> Service<Value, Arc<FixtureTransport>> {
        Service::builder(declaration, Arc::clone(transport)).build()
    }

    #[tokio::test]
    async fn every_declared_operation_is_callable() {
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));
        let service = service(photos(), &transport);

        for name in [
            "photos",
            "find_photo",
            "add_photo",
            "update_photo",
            "update_photo_data",
            "delete_photo",
        ] {
            check!(service.has_operation(name));
            let reply = service
                .call(name, Invocation::new().arg("id", 1))
                .await
                .expect("callable");
            check!(reply.is_success());
        }
        check!(transport.call_count() == 6);
    }

    #[tokio::test]
    async fn get_round_trip_returns_parsed_result() {
        let transport = Arc::new(FixtureTransport::ok(200, r#"{"id":1,"title":"x"}"#));
        let service = service(photos(), &transport);

        let reply = service
            .call("find_photo", Invocation::new().arg("id", 1))
            .await
            .expect("call");

        let_assert!(Reply::Success(response) = reply);
        check!(response.status() == 200);
        check!(response.result() == &json!({"id": 1, "title": "x"}));
        check!(response.body() == r#"{"id":1,"title":"x"}"#);

        let request = transport.last_request().expect("sent");
        check!(request.method() == Method::Get);
        check!(request.url() == "https://api.test/photos/1");
    }

    #[tokio::test]
    async fn merge_precedence_across_layers() {
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));
        let declaration = ServiceDeclaration::new()
            .host("https://api.test")
            .param("a", 1)
            .header("Accept", "text/plain")
            .header("X-Client", "declared")
            .post(
                "pair",
                "/:a/:b",
                EndpointOptions::new()
                    .param("a", 2)
                    .param("b", 3)
                    .header("Accept", "application/json")
                    .payload("albumId", 1)
                    .payload("title", "draft"),
            );
        let service = service(declaration, &transport);

        service
            .call(
                "pair",
                Invocation::new()
                    .arg("b", 99)
                    .parameter("b", 4)
                    .header("X-Client", "call")
                    .payload("title", "final"),
            )
            .await
            .expect("call");

        let request = transport.last_request().expect("sent");
        check!(request.url() == "https://api.test/2/4");
        check!(request.header("Accept") == Some("application/json"));
        check!(request.header("X-Client") == Some("call"));
        check!(request.body().cloned().map(Value::Object) == Some(json!({"albumId": 1, "title": "final"})));
    }

    #[tokio::test]
    async fn unused_params_are_dropped() {
        let transport = Arc::new(FixtureTransport::ok(200, "[]"));
        let service = service(photos(), &transport);

        service
            .call("photos", Invocation::new().arg("page", 2))
            .await
            .expect("call");

        let request = transport.last_request().expect("sent");
        check!(request.url() == "https://api.test/photos");
    }

    #[tokio::test]
    async fn host_and_path_are_concatenated_verbatim() {
        let transport = Arc::new(FixtureTransport::ok(200, "[]"));
        let service = Service::builder(photos(), Arc::clone(&transport))
            .host("https://api.test/")
            .build();

        service.call("photos", Invocation::new()).await.expect("call");

        let request = transport.last_request().expect("sent");
        check!(request.url() == "https://api.test//photos");
    }

    #[tokio::test]
    async fn error_status_becomes_failure_with_raw_body() {
        let transport = Arc::new(FixtureTransport::ok(404, r#"{"error":"not found"}"#));
        let decoded = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&decoded);
        let service = Service::builder(photos(), Arc::clone(&transport))
            .serializer(FnSerializer::new(move |body: &str| -> Result<Value> {
                counter.fetch_add(1, Ordering::SeqCst);
                crate::from_json(body.as_bytes())
            }))
            .build();

        let reply = service
            .call("find_photo", Invocation::new().arg("id", 999))
            .await
            .expect("failure is not an error");

        let_assert!(Reply::Failure(response) = reply);
        check!(response.status() == Some(404));
        check!(response.result() == r#"{"error":"not found"}"#);
        check!(response.message() == "404 Not Found");
        check!(decoded.load(Ordering::SeqCst) == 0);
    }

    #[tokio::test]
    async fn network_fault_becomes_failure_without_status() {
        let transport = Arc::new(FixtureTransport::unreachable("connection refused"));
        let service = service(photos(), &transport);

        let reply = service.call("photos", Invocation::new()).await.expect("call");

        check!(reply.status() == None);
        check!(reply.message() == Some("connection refused"));
    }

    #[tokio::test]
    async fn endpoint_serializer_overrides_client_serializer() {
        let transport = Arc::new(FixtureTransport::ok(200, r#"{"id":1}"#));
        let declaration = ServiceDeclaration::<String>::new()
            .host("https://api.test")
            .serializer(FnSerializer::new(|_: &str| -> Result<String> {
                Ok("client".to_string())
            }))
            .get("find_photo", "/photos/:id", EndpointOptions::new())
            .get(
                "find_post",
                "/posts/:id",
                EndpointOptions::new().serializer(FnSerializer::new(
                    |body: &str| -> Result<String> { Ok(format!("endpoint:{body}")) },
                )),
            );
        let service = Service::builder(declaration, Arc::clone(&transport)).build();

        let post = service
            .call("find_post", Invocation::new().arg("id", 1))
            .await
            .expect("call");
        let photo = service
            .call("find_photo", Invocation::new().arg("id", 1))
            .await
            .expect("call");

        check!(post.success().map(Response::result) == Some(&r#"endpoint:{"id":1}"#.to_string()));
        check!(photo.success().map(Response::result) == Some(&"client".to_string()));
    }

    #[tokio::test]
    async fn unsupported_verb_fails_before_transport() {
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));
        let declaration = photos().register(
            http::Method::HEAD,
            "probe",
            "/photos",
            EndpointOptions::new(),
        );
        let service = service(declaration, &transport);

        let err = service
            .call("probe", Invocation::new())
            .await
            .expect_err("HEAD is rejected");

        check!(err.is_unsupported_method());
        check!(transport.call_count() == 0);
    }

    #[tokio::test]
    async fn unknown_operation_fails_before_transport() {
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));
        let service = service(photos(), &transport);

        let err = service
            .call("find_album", Invocation::new())
            .await
            .expect_err("not registered");

        let_assert!(Error::UnknownOperation(name) = err);
        check!(name == "find_album");
        check!(transport.call_count() == 0);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_serialization_error() {
        let transport = Arc::new(FixtureTransport::ok(200, "<html>oops</html>"));
        let service = service(photos(), &transport);

        let err = service
            .call("photos", Invocation::new())
            .await
            .expect_err("not json");

        check!(err.is_serialization());
    }

    #[tokio::test]
    async fn delete_sends_headers_but_no_payload() {
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));
        let service = service(photos(), &transport);

        service
            .call(
                "delete_photo",
                Invocation::new()
                    .arg("id", 1)
                    .header("Authorization", "Bearer t")
                    .payload("ignored", true),
            )
            .await
            .expect("call");

        let request = transport.last_request().expect("sent");
        check!(request.method() == Method::Delete);
        check!(request.url() == "https://api.test/photos/1");
        check!(request.header("Authorization") == Some("Bearer t"));
        check!(request.body().is_none());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn debug_traces_request_and_completion() {
        let transport = Arc::new(FixtureTransport::ok(200, "[1,2]"));
        let service = Service::builder(photos().debug(true), Arc::clone(&transport)).build();

        let reply = service.call("photos", Invocation::new()).await.expect("call");

        check!(reply.success().map(Response::result) == Some(&json!([1, 2])));
        check!(logs_contain("rest_service_call"));
        check!(logs_contain("sending request"));
        check!(logs_contain("request completed"));
        check!(logs_contain("body="));
        check!(!logs_contain("request failed"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn debug_traces_failures() {
        let transport = Arc::new(FixtureTransport::ok(404, r#"{"error":"not found"}"#));
        let service = Service::builder(photos().debug(true), Arc::clone(&transport)).build();

        let reply = service
            .call("find_photo", Invocation::new().arg("id", 9))
            .await
            .expect("recovered");

        check!(!reply.is_success());
        check!(logs_contain("sending request"));
        check!(logs_contain("request failed"));
        check!(logs_contain("404 Not Found"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn debug_off_emits_no_trace() {
        let transport = Arc::new(FixtureTransport::ok(200, "[1,2]"));
        let service = service(photos(), &transport);

        let reply = service.call("photos", Invocation::new()).await.expect("call");

        check!(reply.is_success());
        check!(!logs_contain("sending request"));
        check!(!logs_contain("request completed"));
        check!(!logs_contain("request failed"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn debug_warns_about_unfilled_placeholders() {
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));
        let service = Service::builder(photos().debug(true), Arc::clone(&transport)).build();

        service
            .call("find_photo", Invocation::new())
            .await
            .expect("call");

        check!(logs_contain("path placeholders left unfilled"));
    }

    #[test]
    fn construction_precedence() {
        let declaration = Arc::new(
            photos()
                .host("https://declared.test")
                .header("Accept", "application/json")
                .param("format", "json")
                .debug(true),
        );
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));

        // Declared values win over built-in defaults.
        let declared = Service::builder(Arc::clone(&declaration), Arc::clone(&transport)).build();
        check!(declared.host() == "https://declared.test");
        check!(declared.default_headers().get("Accept").map(String::as_str) == Some("application/json"));
        check!(declared.default_params().get("format") == Some(&json!("json")));
        check!(declared.debug());

        // Explicit arguments win over declared values.
        let explicit = Service::builder(Arc::clone(&declaration), Arc::clone(&transport))
            .host("https://explicit.test")
            .headers(Headers::new())
            .params(Params::new())
            .debug(false)
            .build();
        check!(explicit.host() == "https://explicit.test");
        check!(explicit.default_headers().is_empty());
        check!(explicit.default_params().is_empty());
        check!(!explicit.debug());

        // Nothing declared: built-in defaults.
        let bare = Service::builder(ServiceDeclaration::<Value>::new(), transport).build();
        check!(bare.host().is_empty());
        check!(bare.default_headers().is_empty());
        check!(bare.default_params().is_empty());
        check!(!bare.debug());
        check!(bare.serializer().deserialize("[]").expect("json") == json!([]));
    }

    #[test]
    fn instance_state_is_mutable_between_calls() {
        let transport = Arc::new(FixtureTransport::ok(200, "{}"));
        let mut service = service(photos(), &transport);

        service.set_host("https://other.test");
        service.set_debug(true);
        service
            .default_headers_mut()
            .insert("X-Trace".to_string(), "1".to_string());
        service
            .default_params_mut()
            .insert("id".to_string(), json!(7));

        check!(service.host() == "https://other.test");
        check!(service.debug());
        check!(service.default_headers().len() == 1);
        check!(service.default_params().get("id") == Some(&json!(7)));
        check!(service.operations().count() == 6);
    }
}
