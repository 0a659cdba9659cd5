//! Shared fixtures for the behavioural scenarios.

use std::sync::Arc;

use courier::{MergedState, SearchSource};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Sources under test and the outcome of flattening them.
#[derive(Debug, Default, ScenarioState)]
pub struct ChainContext {
    pub parent: Slot<Arc<SearchSource>>,
    pub child: Slot<Arc<SearchSource>>,
    pub merged: Slot<MergedState>,
    pub failure: Slot<String>,
}

/// Creates an empty chain context for each scenario.
#[fixture]
pub fn chain_context() -> ChainContext {
    ChainContext::default()
}
