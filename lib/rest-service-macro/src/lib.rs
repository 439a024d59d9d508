//! Procedural macros for rest-service declarative REST clients.
//!
//! This crate provides the `#[service]` attribute, which turns a trait of
//! operation signatures into a client type:
//! - the trait itself, without the verb attributes
//! - a client struct implementing it (e.g. `PhotoApiClient`)
//! - a builder struct for overriding the declared configuration (e.g. `PhotoApiClientBuilder`)
//!
//! Operations are declared with `#[get]`, `#[post]`, `#[put]`, `#[patch]`,
//! `#[delete]`, or `#[http("VERB /path")]` for any other verb.
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
//! }
//!
//! // Usage:
//! let client = PhotoApiClient::new();
//! let reply = client.find_photo(Invocation::new().arg("id", 1)).await?;
//! ```

mod attrs;
mod codegen;
mod expand;

use proc_macro::TokenStream;

/// Declare a REST client from a trait.
///
/// # Attributes
///
/// - `host = "..."`: host prefixed to every path
/// - `output = Type`: type produced by the serializers (default `serde_json::Value`)
/// - `serializer = expr`: client-level serializer
/// - `debug = bool`: trace every call
/// - `header("name", value)`, `param("name", value)`: defaults, repeatable
///
/// Every method is `async fn name(&self) -> Result<Reply<Output>>` or
/// `async fn name(&self, call: Invocation) -> Result<Reply<Output>>` and
/// carries exactly one verb attribute. The method name is the operation name.
///
/// Verb attributes take the path template first, then any of
/// `param("name", value)`, `header("name", value)`, `payload("name", value)`
/// and `serializer = expr`.
///
/// # Example
///
/// ```ignore
/// #[service(host = "https://jsonplaceholder.typicode.com", output = Record, serializer = RecordSerializer)]
/// pub trait PhotoApi {
///     #[get("/albums/:album_id/photos", param("album_id", 1))]
///     async fn album_photos(&self, call: Invocation) -> rest_service::Result<Reply<Record>>;
///
///     #[post("/posts", serializer = PostSerializer)]
///     async fn add_post(&self, call: Invocation) -> rest_service::Result<Reply<Record>>;
/// }
///
/// // Usage:
/// let client = PhotoApiClient::builder(HyperTransport::new())
///     .host("http://localhost:8080")
///     .build();
/// ```
#[proc_macro_attribute]
pub fn service(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand::expand_service_trait(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
