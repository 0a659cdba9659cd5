//! Constructors for `CourierError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::{BoxError, CourierError};
use crate::property::PropertyName;

impl CourierError {
    /// Construct a metadata fetch error from the field mapper's failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::CourierError;
    /// let e = CourierError::metadata_fetch("mapping unavailable");
    /// assert!(matches!(e, CourierError::MetadataFetch { .. }));
    /// ```
    #[must_use]
    pub fn metadata_fetch(source: impl Into<BoxError>) -> Self {
        Self::MetadataFetch {
            source: source.into(),
        }
    }

    /// Construct a merge error for the deferred value bound to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::{CourierError, PropertyName};
    /// let e = CourierError::merge(PropertyName::Query, "boom");
    /// assert!(matches!(e, CourierError::Merge { key: PropertyName::Query, .. }));
    /// ```
    #[must_use]
    pub fn merge(key: PropertyName, source: impl Into<BoxError>) -> Self {
        Self::Merge {
            key,
            source: source.into(),
        }
    }

    /// Construct a configuration error from a [`figment::Error`].
    #[must_use]
    pub fn config(source: FigmentError) -> Self {
        Self::Config(Box::new(source))
    }

    /// Construct a merge error already wrapped in an [`Arc`].
    ///
    /// Flattening reports errors as `Arc<CourierError>`, so resolver failures
    /// go through this helper.
    #[must_use]
    pub fn merge_arc(key: PropertyName, source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::merge(key, source))
    }
}
