//! Response body serializers.
//!
//! A [`Serializer`] turns the raw body of a successful response into the
//! client's output type. [`JsonSerializer`] is used when nothing else is
//! declared; [`FnSerializer`] adapts a closure.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::Result;

/// Converts a raw response body into a domain value.
///
/// # Example
///
/// ```
/// use rest_service_core::{Result, Serializer, from_json};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Post {
///     id: u64,
///     #[serde(rename = "userId")]
///     user_id: u64,
/// }
///
/// struct PostSerializer;
///
/// impl Serializer for PostSerializer {
///     type Output = Post;
///
///     fn deserialize(&self, body: &str) -> Result<Post> {
///         from_json(body.as_bytes())
///     }
/// }
///
/// let post = PostSerializer.deserialize(r#"{"id":1,"userId":7}"#).expect("post");
/// assert_eq!(post.user_id, 7);
/// ```
pub trait Serializer: Send + Sync {
    /// The deserialized value.
    type Output;

    /// Decode the body.
    fn deserialize(&self, body: &str) -> Result<Self::Output>;
}

/// A serializer shared between a declaration, its endpoints and instances.
pub type SharedSerializer<O> = Arc<dyn Serializer<Output = O>>;

impl<S: Serializer + ?Sized> Serializer for Arc<S> {
    type Output = S::Output;

    fn deserialize(&self, body: &str) -> Result<Self::Output> {
        (**self).deserialize(body)
    }
}

/// Parses the body as JSON.
///
/// With the default `T = serde_json::Value` the result is a generic
/// mapping/sequence/scalar; any `DeserializeOwned` type can be used instead.
pub struct JsonSerializer<T = serde_json::Value>(PhantomData<fn() -> T>);

impl<T> JsonSerializer<T> {
    /// Create a JSON serializer.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonSerializer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonSerializer<T> {}

impl<T> fmt::Debug for JsonSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerializer")
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Serializer for JsonSerializer<T> {
    type Output = T;

    fn deserialize(&self, body: &str) -> Result<T> {
        crate::from_json(body.as_bytes())
    }
}

/// Serializer backed by a closure.
///
/// ```
/// use rest_service_core::{FnSerializer, Result, Serializer};
///
/// let length = FnSerializer::new(|body: &str| -> Result<usize> { Ok(body.len()) });
/// assert_eq!(length.deserialize("abc").expect("len"), 3);
/// ```
#[derive(Clone, Copy)]
pub struct FnSerializer<F>(F);

impl<F> FnSerializer<F> {
    /// Wrap a closure.
    #[must_use]
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> fmt::Debug for FnSerializer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSerializer").finish_non_exhaustive()
    }
}

impl<F, O> Serializer for FnSerializer<F>
where
    F: Fn(&str) -> Result<O> + Send + Sync,
{
    type Output = O;

    fn deserialize(&self, body: &str) -> Result<O> {
        (self.0)(body)
    }
}
