//! Property values: literals and deferred resolvers.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{BoxError, SearchSource};

/// Computes a property value when the owning chain is flattened.
///
/// Resolvers receive the search source that holds them. The value they
/// produce may itself be [`PropertyValue::Deferred`]; flattening keeps
/// resolving until a literal comes back.
///
/// Any closure `Fn(Arc<SearchSource>) -> impl Future<Output = Result<PropertyValue, BoxError>>`
/// implements this trait.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Produce the value for the property this resolver is bound to.
    ///
    /// # Errors
    ///
    /// Any error is reported to the caller of
    /// [`SearchSource::flatten`](crate::SearchSource::flatten) as
    /// [`crate::CourierError::Merge`].
    async fn resolve(&self, source: Arc<SearchSource>) -> Result<PropertyValue, BoxError>;
}

#[async_trait]
impl<F, Fut> Resolve for F
where
    F: Fn(Arc<SearchSource>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PropertyValue, BoxError>> + Send + 'static,
{
    async fn resolve(&self, source: Arc<SearchSource>) -> Result<PropertyValue, BoxError> {
        (self)(source).await
    }
}

/// Value bound to a property: either a literal or a deferred resolver.
///
/// A literal `null` is treated as absent and contributes nothing to a merge.
#[derive(Clone)]
pub enum PropertyValue {
    /// A JSON value used as-is.
    Literal(Value),
    /// A resolver invoked at flatten time.
    Deferred(Arc<dyn Resolve>),
}

impl PropertyValue {
    /// Wrap a closure as a deferred value.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::{BoxError, PropertyValue};
    /// use serde_json::json;
    ///
    /// let value = PropertyValue::deferred(|_source| async {
    ///     Ok::<_, BoxError>(PropertyValue::from(json!({"match_all": {}})))
    /// });
    /// assert!(value.is_deferred());
    /// ```
    #[must_use]
    pub fn deferred<F, Fut>(resolver: F) -> Self
    where
        F: Fn(Arc<SearchSource>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Self, BoxError>> + Send + 'static,
    {
        Self::Deferred(Arc::new(resolver))
    }

    /// Wrap an existing [`Resolve`] implementation as a deferred value.
    #[must_use]
    pub fn from_resolver(resolver: Arc<dyn Resolve>) -> Self {
        Self::Deferred(resolver)
    }

    /// Whether the value must be resolved before it can be merged.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Whether the value is a literal `null`.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Literal(Value::Null))
    }

    /// Borrow the literal value, if any.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Option<Value>> for PropertyValue {
    fn from(value: Option<Value>) -> Self {
        Self::Literal(value.unwrap_or(Value::Null))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Literal(Value::from(value))
    }
}
