//! Layered merging of params, headers and payload.
//!
//! Every layer overrides the ones before it. Keys keep the position of their
//! first appearance, so the merged params iterate instance defaults first,
//! then endpoint defaults, then call-site values.

use crate::{Headers, Params, Payload};

/// Merge params: instance defaults, endpoint defaults, overflow args, explicit `parameters`.
#[must_use]
pub fn merge_params(
    instance: &Params,
    endpoint: &Params,
    overflow: &Params,
    explicit: &Params,
) -> Params {
    let mut merged = instance.clone();
    for layer in [endpoint, overflow, explicit] {
        merged.extend(layer.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    merged
}

/// Merge headers: instance defaults, endpoint defaults, call headers.
#[must_use]
pub fn merge_headers(instance: &Headers, endpoint: &Headers, call: &Headers) -> Headers {
    let mut merged = instance.clone();
    for layer in [endpoint, call] {
        merged.extend(layer.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    merged
}

/// Merge payload: endpoint defaults, call payload. There is no instance-level payload.
#[must_use]
pub fn merge_payload(endpoint: &Payload, call: &Payload) -> Payload {
    let mut merged = endpoint.clone();
    merged.extend(call.iter().map(|(key, value)| (key.clone(), value.clone())));
    merged
}
