//! The closed set of search source properties and their merge rules.
//!
//! Every property a [`crate::SearchSource`] accepts is listed in
//! [`PropertyName`]. Each name maps to exactly one [`MergeRule`], which
//! decides how its value is folded into a [`crate::MergedState`] when a chain
//! of sources is flattened.

mod value;

use std::fmt;
use std::str::FromStr;

use crate::CourierError;

pub use value::{PropertyValue, Resolve};

/// Body key used for the `source` property.
pub const RESERVED_SOURCE_KEY: &str = "_source";

/// Name of a property a search source can hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PropertyName {
    /// Index pattern to search.
    Index,
    /// Interval used to expand time-based index patterns.
    IndexInterval,
    /// Document type.
    Type,
    /// Document identifier.
    Id,
    /// Query clause.
    Query,
    /// Filter clause; filters accumulate across the chain.
    Filter,
    /// Sort specification.
    Sort,
    /// Highlight specification.
    Highlight,
    /// Aggregations.
    Aggs,
    /// Offset of the first hit.
    From,
    /// Number of hits to return.
    Size,
    /// Source filtering, stored under [`RESERVED_SOURCE_KEY`].
    Source,
}

/// Top-level identity slots of a merged state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdentityKey {
    /// The `index` slot.
    Index,
    /// The `type` slot.
    Type,
    /// The `id` slot.
    Id,
}

/// How a property value is folded into the merged state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeRule {
    /// Append to the merged filter sequence.
    Accumulate,
    /// Set a top-level identity slot unless an ancestor already set it.
    Identity(IdentityKey),
    /// Store under the given body key unless an ancestor already set it.
    Body(&'static str),
}

impl PropertyName {
    /// Every recognised property, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Index,
        Self::IndexInterval,
        Self::Type,
        Self::Id,
        Self::Query,
        Self::Filter,
        Self::Sort,
        Self::Highlight,
        Self::Aggs,
        Self::From,
        Self::Size,
        Self::Source,
    ];

    /// Public name of the property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::IndexInterval => "indexInterval",
            Self::Type => "type",
            Self::Id => "id",
            Self::Query => "query",
            Self::Filter => "filter",
            Self::Sort => "sort",
            Self::Highlight => "highlight",
            Self::Aggs => "aggs",
            Self::From => "from",
            Self::Size => "size",
            Self::Source => "source",
        }
    }

    /// Merge rule applied to values of this property.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::{MergeRule, PropertyName};
    /// assert_eq!(PropertyName::Filter.merge_rule(), MergeRule::Accumulate);
    /// assert_eq!(PropertyName::Source.merge_rule(), MergeRule::Body("_source"));
    /// ```
    #[must_use]
    pub const fn merge_rule(self) -> MergeRule {
        match self {
            Self::Filter => MergeRule::Accumulate,
            Self::Index => MergeRule::Identity(IdentityKey::Index),
            Self::Type => MergeRule::Identity(IdentityKey::Type),
            Self::Id => MergeRule::Identity(IdentityKey::Id),
            Self::Source => MergeRule::Body(RESERVED_SOURCE_KEY),
            Self::IndexInterval
            | Self::Query
            | Self::Sort
            | Self::Highlight
            | Self::Aggs
            | Self::From
            | Self::Size => MergeRule::Body(self.as_str()),
        }
    }

    /// Look up a property by its public name.
    ///
    /// `sourceFields` is accepted as an alias for [`PropertyName::Source`]
    /// and `aggregations` for [`PropertyName::Aggs`].
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::PropertyName;
    /// assert_eq!(PropertyName::lookup("aggregations"), Some(PropertyName::Aggs));
    /// assert_eq!(PropertyName::lookup("scroll"), None);
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "sourceFields" => return Some(Self::Source),
            "aggregations" => return Some(Self::Aggs),
            _ => {}
        }
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == name)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyName {
    type Err = CourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| CourierError::UnknownProperty { name: s.to_owned() })
    }
}
