//! Core engine for rest-service declarative REST clients.
//!
//! This crate provides the building blocks used by `rest-service`:
//! - [`ServiceDeclaration`] - endpoint registry and type-level defaults
//! - [`Service`] and [`ServiceBuilder`] - client instances and the call pipeline
//! - [`Invocation`] - call-site headers, payload and parameters
//! - [`Serializer`] - response body decoding ([`JsonSerializer`], [`FnSerializer`])
//! - [`Transport`] - the HTTP seam, with [`TransportExt`] per-verb helpers
//! - [`Reply`] - success ([`Response`]) or failure ([`ResponseWithError`])
//! - [`PathTemplate`] - `:name` placeholder substitution
//! - [`Error`] and [`Result`] - error handling

mod body;
mod declaration;
mod endpoint;
mod error;
mod executor;
mod invocation;
mod merge;
mod method;
mod path_template;
pub mod prelude;
mod request;
mod response;
mod serializer;
mod service;
mod transport;

#[cfg(test)]
mod testing;

pub use body::{ContentType, Headers, Params, Payload, encode_payload, from_json, to_form, to_json};
pub use declaration::ServiceDeclaration;
pub use endpoint::{EndpointOptions, EndpointSpec};
pub use error::{Error, Result};
pub use executor::execute;
pub use invocation::Invocation;
pub use merge::{merge_headers, merge_params, merge_payload};
pub use method::Method;
pub use path_template::{PathTemplate, param_to_string};
pub use request::{Request, RequestBuilder};
pub use response::{RawResponse, Reply, Response, ResponseWithError};
pub use serializer::{FnSerializer, JsonSerializer, Serializer, SharedSerializer};
pub use service::{Service, ServiceBuilder};
pub use transport::{Transport, TransportExt, TransportFailure, TransportResult};

// Re-export http crate types for verbs and status codes
pub use http;
pub use http::StatusCode;
