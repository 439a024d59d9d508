//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and the `#[service]`
//! macro for easy glob importing:
//!
//! ```
//! use rest_service::prelude::*;
//! ```

pub use crate::{
    ClientConfig, EndpointOptions, Error, FnSerializer, HyperTransport, Invocation,
    JsonSerializer, Reply, Response, ResponseWithError, Result, Serializer, Service,
    ServiceDeclaration, Transport, service,
};
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Value, json};
