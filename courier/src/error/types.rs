//! Primary error enum for search-source composition.

use figment::Error as FigmentError;
use thiserror::Error;

use crate::property::PropertyName;

/// Boxed error reported by external collaborators such as field mappers and
/// deferred value resolvers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while composing or flattening search sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourierError {
    /// The field mapper rejected a metadata request.
    #[error("Failed to fetch field metadata: {source}")]
    MetadataFetch {
        /// Error reported by the field mapper, forwarded unchanged.
        #[source]
        source: BoxError,
    },

    /// A deferred property value failed while the chain was flattened.
    #[error("Failed to resolve deferred value for '{key}': {source}")]
    Merge {
        /// Property whose deferred value failed.
        key: PropertyName,
        /// Error reported by the resolver.
        #[source]
        source: BoxError,
    },

    /// The parent chain loops back onto a source already visited.
    #[error("cyclic parent chain detected: {cycle}")]
    CyclicChain {
        /// Chain of source labels participating in the cycle.
        cycle: String,
    },

    /// The parent chain is longer than the configured limit.
    #[error("parent chain exceeds the maximum depth of {limit}")]
    ChainTooDeep {
        /// Configured maximum number of sources in one chain.
        limit: usize,
    },

    /// A property name outside the recognised set was supplied.
    #[error("unknown search source property '{name}'")]
    UnknownProperty {
        /// The rejected property name.
        name: String,
    },

    /// Configuration could not be extracted from its providers.
    #[error("Failed to load courier configuration: {0}")]
    Config(#[from] Box<FigmentError>),
}
