//! Client-type declarations.
//!
//! A [`ServiceDeclaration`] is built once per client type: optional host,
//! serializer, default headers/params and debug flag, plus the ordered list
//! of endpoints. Instances read it through an `Arc` and never change it.
//!
//! # Example
//!
//! ```
//! use rest_service_core::{EndpointOptions, ServiceDeclaration};
//! use serde_json::Value;
//!
//! let declaration = ServiceDeclaration::<Value>::new()
//!     .host("https://jsonplaceholder.typicode.com")
//!     .get("photos", "/photos", EndpointOptions::new())
//!     .get("find_photo", "/photos/:id", EndpointOptions::new())
//!     .delete("delete_photo", "/photos/:id", EndpointOptions::new());
//!
//! assert!(declaration.has_operation("find_photo"));
//! assert_eq!(declaration.operations().count(), 3);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{
    EndpointOptions, EndpointSpec, Headers, Params, PathTemplate, Serializer, SharedSerializer,
};

/// Type-level configuration and endpoint registry.
pub struct ServiceDeclaration<O> {
    host: Option<String>,
    serializer: Option<SharedSerializer<O>>,
    headers: Option<Headers>,
    params: Option<Params>,
    debug: Option<bool>,
    endpoints: Vec<EndpointSpec<O>>,
}

impl<O> ServiceDeclaration<O> {
    /// An empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: None,
            serializer: None,
            headers: None,
            params: None,
            debug: None,
            endpoints: Vec::new(),
        }
    }

    /// Declare the host every endpoint path is appended to.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Declare the client-level serializer.
    #[must_use]
    pub fn serializer<S>(mut self, serializer: S) -> Self
    where
        S: Serializer<Output = O> + 'static,
    {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    /// Declare the default headers.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add one default header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Declare the default params.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Add one default param.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(name.into(), value.into());
        self
    }

    /// Declare the debug flag.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Register an operation.
    ///
    /// The verb is not checked here: anything outside GET, POST, PUT, PATCH
    /// and DELETE fails when the operation is called. Registering a name
    /// twice replaces the first endpoint and keeps its position.
    #[must_use]
    pub fn register(
        mut self,
        method: http::Method,
        name: impl Into<String>,
        path: impl Into<PathTemplate>,
        options: EndpointOptions<O>,
    ) -> Self {
        let spec = EndpointSpec::new(method, name, path, options);
        match self.endpoints.iter_mut().find(|e| e.name() == spec.name()) {
            Some(existing) => *existing = spec,
            None => self.endpoints.push(spec),
        }
        self
    }

    /// Register a GET operation.
    #[must_use]
    pub fn get(
        self,
        name: impl Into<String>,
        path: impl Into<PathTemplate>,
        options: EndpointOptions<O>,
    ) -> Self {
        self.register(http::Method::GET, name, path, options)
    }

    /// Register a POST operation.
    #[must_use]
    pub fn post(
        self,
        name: impl Into<String>,
        path: impl Into<PathTemplate>,
        options: EndpointOptions<O>,
    ) -> Self {
        self.register(http::Method::POST, name, path, options)
    }

    /// Register a PUT operation.
    #[must_use]
    pub fn put(
        self,
        name: impl Into<String>,
        path: impl Into<PathTemplate>,
        options: EndpointOptions<O>,
    ) -> Self {
        self.register(http::Method::PUT, name, path, options)
    }

    /// Register a PATCH operation.
    #[must_use]
    pub fn patch(
        self,
        name: impl Into<String>,
        path: impl Into<PathTemplate>,
        options: EndpointOptions<O>,
    ) -> Self {
        self.register(http::Method::PATCH, name, path, options)
    }

    /// Register a DELETE operation.
    #[must_use]
    pub fn delete(
        self,
        name: impl Into<String>,
        path: impl Into<PathTemplate>,
        options: EndpointOptions<O>,
    ) -> Self {
        self.register(http::Method::DELETE, name, path, options)
    }

    /// Declared host.
    #[must_use]
    pub fn declared_host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Declared serializer.
    #[must_use]
    pub const fn declared_serializer(&self) -> Option<&SharedSerializer<O>> {
        self.serializer.as_ref()
    }

    /// Declared default headers.
    #[must_use]
    pub const fn declared_headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    /// Declared default params.
    #[must_use]
    pub const fn declared_params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Declared debug flag.
    #[must_use]
    pub const fn declared_debug(&self) -> Option<bool> {
        self.debug
    }

    /// Look up an endpoint by operation name.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&EndpointSpec<O>> {
        self.endpoints.iter().find(|e| e.name() == name)
    }

    /// Registered endpoints, in registration order.
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointSpec<O>] {
        &self.endpoints
    }

    /// Registered operation names, in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(EndpointSpec::name)
    }

    /// Returns `true` if an operation is registered under `name`.
    #[must_use]
    pub fn has_operation(&self, name: &str) -> bool {
        self.endpoint(name).is_some()
    }
}

impl<O> Default for ServiceDeclaration<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for ServiceDeclaration<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDeclaration")
            .field("host", &self.host)
            .field("serializer", &self.serializer.is_some())
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("debug", &self.debug)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
