//! Merged request state and the per-key merge policy.
//!
//! Flattening walks a chain of search sources from the root ancestor down to
//! the leaf and folds every resolved property into a [`MergedState`]. The
//! policy is first-writer-wins for everything except filters, which
//! accumulate, so ancestor values act as fixed defaults that descendants can
//! only extend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::property::{IdentityKey, MergeRule, PropertyName};

/// Flattened state of a search source chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<Value>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    type_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(default)]
    filters: Vec<Value>,
    #[serde(default)]
    body: Map<String, Value>,
}

impl MergedState {
    /// Create an empty state with no identity fields, filters, or body keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `value` into the state using the merge rule for `name`.
    ///
    /// Returns `true` when the value was recorded and `false` when it was
    /// absent or an earlier (more ancestral) value already occupies the slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use courier::{MergedState, PropertyName};
    /// use serde_json::json;
    ///
    /// let mut state = MergedState::new();
    /// assert!(state.merge_property(PropertyName::Index, json!("logs-*")));
    /// assert!(!state.merge_property(PropertyName::Index, json!("metrics-*")));
    /// assert!(state.merge_property(PropertyName::Filter, json!({"term": {"a": 1}})));
    /// assert!(state.merge_property(PropertyName::Filter, json!({"term": {"a": 1}})));
    ///
    /// assert_eq!(state.index(), Some(&json!("logs-*")));
    /// assert_eq!(state.filters().len(), 2);
    /// ```
    pub fn merge_property(&mut self, name: PropertyName, value: Value) -> bool {
        if value.is_null() {
            return false;
        }
        match name.merge_rule() {
            MergeRule::Accumulate => {
                self.filters.push(value);
                true
            }
            MergeRule::Identity(key) => set_if_absent(self.identity_slot(key), value),
            MergeRule::Body(key) => {
                if self.body.contains_key(key) {
                    return false;
                }
                self.body.insert(key.to_owned(), value);
                true
            }
        }
    }

    const fn identity_slot(&mut self, key: IdentityKey) -> &mut Option<Value> {
        match key {
            IdentityKey::Index => &mut self.index,
            IdentityKey::Type => &mut self.type_name,
            IdentityKey::Id => &mut self.id,
        }
    }

    /// Merged index, if any source set one.
    #[must_use]
    pub const fn index(&self) -> Option<&Value> {
        self.index.as_ref()
    }

    /// Merged document type, if any source set one.
    #[must_use]
    pub const fn type_name(&self) -> Option<&Value> {
        self.type_name.as_ref()
    }

    /// Merged document identifier, if any source set one.
    #[must_use]
    pub const fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// Filters from the whole chain, root first.
    #[must_use]
    pub fn filters(&self) -> &[Value] {
        &self.filters
    }

    /// Body keys collected from the chain.
    #[must_use]
    pub const fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Whether nothing has been merged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_none()
            && self.type_name.is_none()
            && self.id.is_none()
            && self.filters.is_empty()
            && self.body.is_empty()
    }

    /// Decompose the state into identity fields, filters and body.
    #[must_use]
    pub fn into_parts(self) -> (Identity, Vec<Value>, Map<String, Value>) {
        let identity = Identity {
            index: self.index,
            type_name: self.type_name,
            id: self.id,
        };
        (identity, self.filters, self.body)
    }
}

/// Identity fields taken out of a [`MergedState`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Identity {
    /// Merged index.
    pub index: Option<Value>,
    /// Merged document type.
    pub type_name: Option<Value>,
    /// Merged document identifier.
    pub id: Option<Value>,
}

fn set_if_absent(slot: &mut Option<Value>, value: Value) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}
