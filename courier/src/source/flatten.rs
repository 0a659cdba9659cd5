//! Flattening of a search source chain into a merged state.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{SearchSource, chain::ancestor_chain};
use crate::property::{PropertyName, PropertyValue};
use crate::{CourierError, CourierResult, MergedState, SearchRequest};

/// Number of times one property's resolvers may hand back another deferred
/// value before flattening gives up.
pub const MAX_DEFERRED_NESTING: usize = 32;

impl SearchSource {
    /// Merge this source and its ancestors into one state.
    ///
    /// Sources are processed root first and, within a source, in the order
    /// their properties were first set. Deferred values are awaited one at a
    /// time, each fully resolved before the next property is considered.
    /// Filters accumulate; every other key keeps the first value seen, so an
    /// ancestor's value is never replaced by a descendant's.
    ///
    /// The chain and each source's properties are captured before the first
    /// deferred value runs; changes made by resolvers apply to the next call.
    ///
    /// # Errors
    ///
    /// - [`CourierError::Merge`] when a deferred value fails, or keeps
    ///   resolving to further deferred values past [`MAX_DEFERRED_NESTING`]
    ///   levels; no partial state is returned.
    /// - [`CourierError::CyclicChain`] when the parent chain loops.
    /// - [`CourierError::ChainTooDeep`] when the chain exceeds the courier's
    ///   `max_chain_depth`.
    pub async fn flatten(self: &Arc<Self>) -> CourierResult<MergedState> {
        let limit = self.courier.config().max_chain_depth;
        let layers: Vec<_> = ancestor_chain(self, limit)?
            .into_iter()
            .map(|source| {
                let properties = source.snapshot();
                (source, properties)
            })
            .collect();

        let mut state = MergedState::new();
        for (source, properties) in layers {
            for (name, value) in properties {
                let resolved = resolve(&source, name, value).await?;
                let applied = state.merge_property(name, resolved);
                debug!(
                    target: "courier::flatten",
                    source = %source,
                    property = %name,
                    applied,
                    "merged property"
                );
            }
        }
        Ok(state)
    }

    /// Flatten the chain and assemble the request body for it.
    ///
    /// # Errors
    ///
    /// Returns any error reported by [`Self::flatten`].
    pub async fn to_request(self: &Arc<Self>) -> CourierResult<SearchRequest> {
        let state = self.flatten().await?;
        Ok(SearchRequest::from_state(state, self.courier.config()))
    }
}

/// Resolve `value` until a literal remains.
async fn resolve(
    source: &Arc<SearchSource>,
    name: PropertyName,
    value: PropertyValue,
) -> CourierResult<Value> {
    let mut pending = value;
    let mut depth = 0_usize;
    loop {
        match pending {
            PropertyValue::Literal(literal) => return Ok(literal),
            PropertyValue::Deferred(_) if depth == MAX_DEFERRED_NESTING => {
                return Err(CourierError::merge_arc(
                    name,
                    format!("deferred value still unresolved after {depth} levels"),
                ));
            }
            PropertyValue::Deferred(resolver) => {
                depth += 1;
                pending = resolver
                    .resolve(Arc::clone(source))
                    .await
                    .map_err(|err| CourierError::merge_arc(name, err))?;
            }
        }
    }
}
