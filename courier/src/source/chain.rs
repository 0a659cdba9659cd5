//! Ancestor chain construction with cycle detection.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::SearchSource;
use crate::{CourierError, CourierResult};

/// Collect `source` and its ancestors, ordered root first.
///
/// Sources are identified by pointer, so two distinct sources with equal
/// properties never collide. Revisiting a source fails with
/// [`CourierError::CyclicChain`]; a chain holding more than `limit` sources
/// fails with [`CourierError::ChainTooDeep`]. The limit only counts once an
/// ancestor is reached, so `source` alone is always accepted.
pub(super) fn ancestor_chain(
    source: &Arc<SearchSource>,
    limit: usize,
) -> CourierResult<Vec<Arc<SearchSource>>> {
    let mut visited: HashSet<*const SearchSource> = HashSet::new();
    let mut chain: Vec<Arc<SearchSource>> = Vec::new();
    let mut current = Some(Arc::clone(source));

    while let Some(node) = current {
        if !visited.insert(Arc::as_ptr(&node)) {
            let mut cycle: Vec<String> = chain.iter().map(ToString::to_string).collect();
            cycle.push(node.to_string());
            return Err(Arc::new(CourierError::CyclicChain {
                cycle: cycle.join(" -> "),
            }));
        }
        if !chain.is_empty() && chain.len() >= limit {
            return Err(Arc::new(CourierError::ChainTooDeep { limit }));
        }
        current = node.parent();
        if current.is_none() && node.has_parent_link() {
            debug!(
                target: "courier::flatten",
                source = %node,
                "parent was dropped; chain ends here"
            );
        }
        chain.push(node);
    }

    chain.reverse();
    debug!(
        target: "courier::flatten",
        leaf = %source,
        depth = chain.len(),
        "collected ancestor chain"
    );
    Ok(chain)
}
