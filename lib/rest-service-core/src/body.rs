//! Configuration maps and body serialization utilities.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

use crate::Result;

/// Request or response headers, matched by exact name.
pub type Headers = HashMap<String, String>;

/// Named substitution values, in insertion order.
pub type Params = serde_json::Map<String, Value>;

/// Request payload fields, in insertion order.
pub type Payload = serde_json::Map<String, Value>;

/// Content type for request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    #[default]
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }

    /// Pick the payload encoding announced by a `Content-Type` header.
    ///
    /// Anything that does not mention JSON is sent form-encoded.
    #[must_use]
    pub fn from_headers(headers: &Headers) -> Self {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .filter(|(_, value)| value.to_ascii_lowercase().contains("json"))
            .map_or(Self::FormUrlEncoded, |_| Self::Json)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encode a payload with the given content type.
///
/// Form encoding flattens nested values into bracket notation
/// (`meta[a]=1`, `tags[]=x`) and sends `null` as an empty value.
pub fn encode_payload(payload: &Payload, content_type: ContentType) -> Result<Bytes> {
    match content_type {
        ContentType::Json => to_json(payload),
        ContentType::FormUrlEncoded => to_form(&form_pairs(payload)),
    }
}

/// Flatten a payload into form fields.
fn form_pairs(payload: &Payload) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(payload.len());
    for (name, value) in payload {
        push_form_field(name.clone(), value, &mut pairs);
    }
    pairs
}

fn push_form_field(name: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(fields) => {
            for (key, value) in fields {
                push_form_field(format!("{name}[{key}]"), value, pairs);
            }
        }
        Value::Array(items) => {
            for item in items {
                push_form_field(format!("{name}[]"), item, pairs);
            }
        }
        Value::Null => pairs.push((name, String::new())),
        Value::String(text) => pairs.push((name, text.clone())),
        Value::Bool(_) | Value::Number(_) => pairs.push((name, value.to_string())),
    }
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use rest_service_core::to_json;
/// use serde_json::json;
///
/// let bytes = to_json(&json!({"name": "Alice"})).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// # Example
///
/// ```
/// use rest_service_core::{Payload, to_form};
///
/// let mut payload = Payload::new();
/// payload.insert("albumId".to_string(), 1.into());
/// payload.insert("title".to_string(), "testing photo".into());
/// let bytes = to_form(&payload).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"albumId=1&title=testing+photo");
/// ```
pub fn to_form<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Example
///
/// ```
/// use rest_service_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Photo { id: u64 }
///
/// let photo: Photo = from_json(br#"{"id":1}"#).expect("deserialize");
/// assert_eq!(photo, Photo { id: 1 });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| crate::Error::serialization(e.path().to_string(), e.inner().to_string()))
}
