//! Declarative REST clients for Rust.
//!
//! Declare a client type once (host, serializer, default headers and
//! params, one entry per operation) and call its operations by name. Each
//! call returns a [`Reply`]: a [`Response`] holding the deserialized body,
//! or a [`ResponseWithError`] holding the raw error body.
//!
//! # Example
//!
//! ```ignore
//! use rest_service::prelude::*;
//!
//! #[service(host = "https://jsonplaceholder.typicode.com")]
//! pub trait PhotoApi {
//!     #[get("/photos")]
//!     async fn photos(&self) -> rest_service::Result<Reply<Value>>;
//!
//!     #[get("/photos/:id")]
//!     async fn find_photo(&self, call: Invocation) -> rest_service::Result<Reply<Value>>;
//!
//!     #[post("/photos")]
//!     async fn add_photo(&self, call: Invocation) -> rest_service::Result<Reply<Value>>;
//! }
//!
//! let client = PhotoApiClient::new();
//! match client.find_photo(Invocation::new().arg("id", 1)).await? {
//!     Reply::Success(response) => println!("{}", response.result()),
//!     Reply::Failure(failure) => eprintln!("{}: {}", failure.message(), failure.result()),
//! }
//! ```
//!
//! Without the macro, build a [`ServiceDeclaration`] and a [`Service`] directly:
//!
//! ```no_run
//! use rest_service::{EndpointOptions, HyperTransport, Invocation, Service, ServiceDeclaration};
//! use serde_json::Value;
//!
//! # async fn run() -> rest_service::Result<()> {
//! let declaration = ServiceDeclaration::<Value>::new()
//!     .host("https://jsonplaceholder.typicode.com")
//!     .get("find_photo", "/photos/:id", EndpointOptions::new());
//! let service = Service::builder(declaration, HyperTransport::new()).build();
//!
//! let reply = service.call("find_photo", Invocation::new().arg("id", 1)).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod connector;
pub mod prelude;

// Re-export transport types
pub use client::HyperTransport;
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export core types
pub use rest_service_core::{
    ContentType, EndpointOptions, EndpointSpec, Error, FnSerializer, Headers, Invocation,
    JsonSerializer, Method, Params, PathTemplate, Payload, RawResponse, Reply, Request,
    RequestBuilder, Response, ResponseWithError, Result, Serializer, Service, ServiceBuilder,
    ServiceDeclaration, SharedSerializer, StatusCode, Transport, TransportExt, TransportFailure,
    TransportResult, encode_payload, execute, from_json, to_form, to_json,
};

// Re-export crates for macro-generated code
pub use http;
pub use serde_json;

// Re-export macros
pub use rest_service_macro::service;
