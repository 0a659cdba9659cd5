//! Hierarchical search-source composition.
//!
//! A [`SearchSource`] accumulates named search properties, inherits defaults
//! from a single parent, and flattens the chain into a [`MergedState`] that a
//! request-execution layer can consume. Property values may be deferred:
//! resolvers run while the chain is flattened and may themselves yield
//! further deferred values.
//!
//! The crate also provides [`Embeddable`], a widget base whose render,
//! destroy and container-state hooks default to no-ops.

mod config;
mod courier;
pub mod embeddable;
mod error;
mod merge;
pub mod property;
mod request;
mod result_ext;
mod source;

use std::sync::Arc;

pub use config::{CourierConfig, DEFAULT_CONFIG_FILE, DEFAULT_MAX_CHAIN_DEPTH, ENV_PREFIX};
pub use courier::{Courier, FieldMapper, FieldMapping, FieldMetadata};
pub use embeddable::{Embeddable, EmbeddableConfig, EmbeddableMetadata, MountTarget};
pub use error::{BoxError, CourierError};
pub use merge::{Identity, MergedState};
pub use property::{MergeRule, PropertyName, PropertyValue, RESERVED_SOURCE_KEY, Resolve};
pub use request::SearchRequest;
pub use result_ext::{CourierResultExt, IntoFigmentError, ResultIntoFigment};
pub use source::{MAX_DEFERRED_NESTING, SEARCH_SOURCE_TYPE, SearchSource};

/// Result alias used throughout the crate.
///
/// Errors are shared through [`Arc`] so a single failure can be reported to
/// several observers without cloning the underlying error.
pub type CourierResult<T> = Result<T, Arc<CourierError>>;
