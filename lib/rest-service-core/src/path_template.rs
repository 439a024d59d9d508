//! Path templates with `:name` placeholders.

use serde_json::Value;

use crate::Params;

/// A path such as `/photos/:id` whose placeholders are filled from params.
///
/// Substitution is a flat find-and-replace: for each param, in the params'
/// insertion order, the first occurrence of `:key` is replaced by the value.
/// A template repeating the same placeholder only gets its first occurrence
/// filled, and a key that is a prefix of another placeholder (`:id` inside
/// `:identifier`) can match inside it when it comes first. Params without a
/// matching placeholder are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate(String);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Get the template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names of the `:name` placeholders, in template order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        self.0
            .split(':')
            .skip(1)
            .filter_map(|segment| {
                let len = segment
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(segment.len());
                segment.get(..len).filter(|name| !name.is_empty())
            })
            .collect()
    }

    /// Fill the placeholders from `params`.
    ///
    /// # Example
    ///
    /// ```
    /// use rest_service_core::{Params, PathTemplate};
    ///
    /// let mut params = Params::new();
    /// params.insert("id".to_string(), 1.into());
    /// params.insert("unused".to_string(), "dropped".into());
    ///
    /// let template = PathTemplate::new("/photos/:id");
    /// assert_eq!(template.substitute(&params), "/photos/1");
    /// ```
    #[must_use]
    pub fn substitute(&self, params: &Params) -> String {
        let mut path = self.0.clone();

        for (key, value) in params {
            let placeholder = format!(":{key}");
            if let Some(start) = path.find(&placeholder) {
                path.replace_range(start..start + placeholder.len(), &param_to_string(value));
            }
        }

        path
    }
}

/// String form of a param value: strings verbatim, `null` empty, JSON text otherwise.
#[must_use]
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for PathTemplate {
    fn from(template: String) -> Self {
        Self(template)
    }
}
