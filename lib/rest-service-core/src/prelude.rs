//! Prelude module for convenient imports.
//!
//! ```
//! use rest_service_core::prelude::*;
//! ```

pub use crate::{
    EndpointOptions, Error, FnSerializer, Headers, Invocation, JsonSerializer, Params, Payload,
    Reply, Response, ResponseWithError, Result, Serializer, Service, ServiceDeclaration, Transport,
    TransportExt,
};
