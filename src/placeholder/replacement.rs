//! Replacement payloads and the placeholders that carry them

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur when building a placeholder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    /// Key cannot be addressed by a tag
    #[error("invalid placeholder key {key:?}: expected one or more of [a-z0-9_-]")]
    InvalidKey { key: String },
}

/// Markup to be expanded again by the consumer before it is inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup(pub String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A type-erased substitution value
///
/// Cloning is cheap: clones share the same payload allocation, which [`Replacement::ptr_eq`]
/// can observe. Only the code that finally consumes a replacement recovers its concrete type.
#[derive(Clone)]
pub struct Replacement {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Replacement {
    /// Wrap an arbitrary payload
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Plain text, inserted verbatim
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(value.into())
    }

    /// Markup, expanded again before insertion
    pub fn markup(value: impl Into<String>) -> Self {
        Self::new(Markup(value.into()))
    }

    /// Borrow the payload if it is a `T`
    pub fn value<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Check whether the payload is a `T`
    pub fn is<T: Any>(&self) -> bool {
        (*self.value).is::<T>()
    }

    /// The payload as text, if it is a `String`
    pub fn as_text(&self) -> Option<&str> {
        self.value::<String>().map(String::as_str)
    }

    /// The payload as markup, if it is a [`Markup`]
    pub fn as_markup(&self) -> Option<&Markup> {
        self.value::<Markup>()
    }

    /// Name of the payload type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether both handles share the same payload allocation
    pub fn ptr_eq(&self, other: &Replacement) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Replacement");
        out.field("type", &self.type_name);
        if let Some(text) = self.as_text() {
            out.field("text", &text);
        } else if let Some(markup) = self.as_markup() {
            out.field("markup", &markup.as_str());
        }
        out.finish()
    }
}

/// Check that a key can be written as a `<key>` tag
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

/// A key paired with the replacement it stands for
///
/// Keys are restricted to `[a-z0-9_-]` so that every placeholder can be written as a `<key>`
/// tag. Resolvers built from an adopted [`PlaceholderMap`](super::PlaceholderMap) apply no such
/// restriction.
#[derive(Debug, Clone)]
pub struct Placeholder {
    key: String,
    replacement: Replacement,
}

impl Placeholder {
    /// Create a placeholder, rejecting keys no tag can address
    pub fn new(key: impl Into<String>, replacement: Replacement) -> Result<Self, PlaceholderError> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(PlaceholderError::InvalidKey { key });
        }
        Ok(Self { key, replacement })
    }

    /// Create a plain text placeholder
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Result<Self, PlaceholderError> {
        Self::new(key, Replacement::text(value))
    }

    /// Create a markup placeholder
    pub fn markup(
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, PlaceholderError> {
        Self::new(key, Replacement::markup(value))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    pub fn into_parts(self) -> (String, Replacement) {
        (self.key, self.replacement)
    }
}
