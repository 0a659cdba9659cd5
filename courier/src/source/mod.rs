//! Chainable search sources with parent inheritance.
//!
//! A [`SearchSource`] accumulates named property values and may inherit from
//! a single parent. [`SearchSource::flatten`] walks the chain from the root
//! ancestor down to the source and folds every property into a
//! [`crate::MergedState`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use courier::{BoxError, Courier, FieldMapper, FieldMapping, SearchSource};
//! use serde_json::json;
//!
//! struct NoMappings;
//!
//! #[async_trait]
//! impl FieldMapper for NoMappings {
//!     async fn get_fields(&self, _source: &SearchSource) -> Result<FieldMapping, BoxError> {
//!         Ok(FieldMapping::new())
//!     }
//! }
//!
//! let courier = Courier::new(Arc::new(NoMappings));
//! let base = courier.search_source();
//! base.index("logs-*").filter(json!({"term": {"env": "prod"}}));
//!
//! let view = courier.search_source();
//! view.set_parent(&base)
//!     .index("ignored-*")
//!     .filter(json!({"range": {"status": {"gte": 500}}}));
//!
//! let state = futures::executor::block_on(view.flatten())?;
//! assert_eq!(state.index(), Some(&json!("logs-*")));
//! assert_eq!(state.filters().len(), 2);
//! # Ok::<_, std::sync::Arc<courier::CourierError>>(())
//! ```

mod chain;
mod flatten;

pub use flatten::MAX_DEFERRED_NESTING;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::warn;

use crate::property::{PropertyName, PropertyValue};
use crate::{Courier, CourierError, CourierResult, FieldMapping};

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Kind reported by [`SearchSource::source_type`].
pub const SEARCH_SOURCE_TYPE: &str = "search";

#[derive(Default)]
struct SourceState {
    properties: Vec<(PropertyName, PropertyValue)>,
    parent: Option<Weak<SearchSource>>,
}

/// A composable set of search properties that may inherit from a parent.
///
/// Sources are always handled through [`Arc`]; setters take `&self` and
/// return `&Self` so calls chain.
pub struct SearchSource {
    id: u64,
    courier: Arc<Courier>,
    state: RwLock<SourceState>,
}

macro_rules! property_setters {
    ($($(#[$doc:meta])* $method:ident => $name:ident;)+) => {
        $(
            $(#[$doc])*
            pub fn $method(&self, value: impl Into<PropertyValue>) -> &Self {
                self.set(PropertyName::$name, value)
            }
        )+
    };
}

impl SearchSource {
    /// Create an empty source bound to `courier`.
    #[must_use]
    pub fn new(courier: Arc<Courier>) -> Arc<Self> {
        Self::with_properties(courier, std::iter::empty())
    }

    /// Create a source seeded with `properties`, applied in order.
    #[must_use]
    pub fn with_properties<I>(courier: Arc<Courier>, properties: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (PropertyName, PropertyValue)>,
    {
        let source = Arc::new(Self {
            id: NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed),
            courier,
            state: RwLock::new(SourceState::default()),
        });
        for (name, value) in properties {
            source.set(name, value);
        }
        source
    }

    /// Create a source seeded from a JSON object keyed by public property
    /// names.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::UnknownProperty`] for a key outside the
    /// recognised set.
    pub fn from_json(
        courier: Arc<Courier>,
        initial: Map<String, Value>,
    ) -> CourierResult<Arc<Self>> {
        let mut properties = Vec::with_capacity(initial.len());
        for (key, value) in initial {
            let name = key.parse::<PropertyName>().map_err(Arc::new)?;
            properties.push((name, PropertyValue::from(value)));
        }
        Ok(Self::with_properties(courier, properties))
    }

    /// Bind `value` to `name`.
    ///
    /// Re-setting a property replaces its value but keeps the position it
    /// was first set at, which fixes the order deferred values resolve in.
    pub fn set(&self, name: PropertyName, value: impl Into<PropertyValue>) -> &Self {
        let bound = value.into();
        let mut state = self.state.write();
        match state.properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = bound,
            None => state.properties.push((name, bound)),
        }
        drop(state);
        self
    }

    /// Bind `value` to the property called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::UnknownProperty`] when `name` is not a
    /// recognised property.
    pub fn set_named(&self, name: &str, value: impl Into<PropertyValue>) -> CourierResult<&Self> {
        match name.parse::<PropertyName>() {
            Ok(property) => Ok(self.set(property, value)),
            Err(err) => {
                warn!(source = %self, property = name, "rejected unknown search source property");
                Err(Arc::new(err))
            }
        }
    }

    /// Remove the value bound to `name`, returning it.
    pub fn unset(&self, name: PropertyName) -> Option<PropertyValue> {
        let mut state = self.state.write();
        let position = state
            .properties
            .iter()
            .position(|(existing, _)| *existing == name)?;
        Some(state.properties.remove(position).1)
    }

    /// Value bound to `name` on this source, ignoring the parent chain.
    #[must_use]
    pub fn get_own(&self, name: PropertyName) -> Option<PropertyValue> {
        self.state
            .read()
            .properties
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.clone())
    }

    property_setters! {
        /// Set the index pattern.
        index => Index;
        /// Set the index interval used with time-based patterns.
        index_interval => IndexInterval;
        /// Set the document type.
        type_name => Type;
        /// Set the document identifier.
        id => Id;
        /// Set the query clause.
        query => Query;
        /// Set this source's filter. Filters from every source in the chain apply.
        filter => Filter;
        /// Set the sort specification.
        sort => Sort;
        /// Set the highlight specification.
        highlight => Highlight;
        /// Set the aggregations.
        aggs => Aggs;
        /// Set the offset of the first hit.
        from => From;
        /// Set the number of hits to return.
        size => Size;
        /// Set source filtering.
        source => Source;
    }

    /// Inherit from `parent`.
    ///
    /// Only a weak reference is kept: dropping the last handle to the parent
    /// ends the chain at this source. Cycles are reported when the chain is
    /// flattened.
    pub fn set_parent(&self, parent: &Arc<Self>) -> &Self {
        self.state.write().parent = Some(Arc::downgrade(parent));
        self
    }

    /// Stop inheriting from any parent.
    pub fn clear_parent(&self) -> &Self {
        self.state.write().parent = None;
        self
    }

    /// The parent source, if one is set and still alive.
    #[must_use]
    pub fn parent(&self) -> Option<Arc<Self>> {
        self.state.read().parent.as_ref().and_then(Weak::upgrade)
    }

    /// Fetch the field mapping for this source from the courier's mapper.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::MetadataFetch`] wrapping the mapper's error.
    pub async fn get_fields(&self) -> CourierResult<FieldMapping> {
        self.courier
            .mapper()
            .get_fields(self)
            .await
            .map_err(|err| Arc::new(CourierError::metadata_fetch(err)))
    }

    /// The courier this source belongs to.
    #[must_use]
    pub const fn courier(&self) -> &Arc<Courier> {
        &self.courier
    }

    /// Kind of data source, always [`SEARCH_SOURCE_TYPE`].
    #[must_use]
    pub const fn source_type(&self) -> &'static str {
        SEARCH_SOURCE_TYPE
    }

    /// Literal properties set on this source as a JSON object.
    ///
    /// Deferred values and the parent chain are left out.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let state = self.state.read();
        let map: Map<String, Value> = state
            .properties
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_literal()
                    .map(|literal| (name.as_str().to_owned(), literal.clone()))
            })
            .collect();
        Value::Object(map)
    }

    fn has_parent_link(&self) -> bool {
        self.state.read().parent.is_some()
    }

    fn snapshot(&self) -> Vec<(PropertyName, PropertyValue)> {
        self.state.read().properties.clone()
    }
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search_source#{}", self.id)
    }
}

impl fmt::Debug for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("SearchSource")
            .field("id", &self.id)
            .field("properties", &state.properties)
            .field("has_parent", &state.parent.is_some())
            .finish_non_exhaustive()
    }
}
