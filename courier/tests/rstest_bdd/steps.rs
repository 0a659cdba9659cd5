//! Step definitions for the inheritance scenarios.

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use async_trait::async_trait;
use courier::{
    BoxError, Courier, CourierError, FieldMapper, FieldMapping, PropertyValue, SearchSource,
};
use futures::executor::block_on;
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

use crate::fixtures::ChainContext;

struct NoMappings;

#[async_trait]
impl FieldMapper for NoMappings {
    async fn get_fields(&self, _source: &SearchSource) -> Result<FieldMapping, BoxError> {
        Ok(FieldMapping::new())
    }
}

fn new_source() -> Arc<SearchSource> {
    Courier::new(Arc::new(NoMappings)).search_source()
}

/// Turn `field:value` into a term filter.
fn term_filter(spec: &str) -> Result<Value> {
    let (field, value) = spec
        .trim()
        .split_once(':')
        .ok_or_else(|| anyhow!("filter {spec} must look like field:value"))?;
    Ok(json!({"term": {field: value}}))
}

fn child_of_parent(chain_context: &ChainContext) -> Arc<SearchSource> {
    let child = new_source();
    if let Some(parent) = chain_context.parent.get() {
        child.set_parent(&parent);
    }
    chain_context.child.set(Arc::clone(&child));
    child
}

#[given("a parent search source with index {index}")]
fn parent_with_index(chain_context: &ChainContext, index: String) {
    let parent = new_source();
    parent.index(index);
    chain_context.parent.set(parent);
}

#[given("a parent search source with filter {filter}")]
fn parent_with_filter(chain_context: &ChainContext, filter: String) -> Result<()> {
    let parent = new_source();
    parent.filter(term_filter(&filter)?);
    chain_context.parent.set(parent);
    Ok(())
}

#[given("a child search source with index {index}")]
fn child_with_index(chain_context: &ChainContext, index: String) {
    child_of_parent(chain_context).index(index);
}

#[given("a child search source with size {size:u64}")]
fn child_with_size(chain_context: &ChainContext, size: u64) {
    child_of_parent(chain_context).size(size);
}

#[given("a child search source with filter {filter}")]
fn child_with_filter(chain_context: &ChainContext, filter: String) -> Result<()> {
    child_of_parent(chain_context).filter(term_filter(&filter)?);
    Ok(())
}

#[given("a child search source whose query resolver fails with {message}")]
fn child_with_failing_query(chain_context: &ChainContext, message: String) {
    child_of_parent(chain_context).query(PropertyValue::deferred(move |_source| {
        let reason = message.clone();
        async move { Err::<PropertyValue, BoxError>(reason.into()) }
    }));
}

#[when("the child chain is flattened")]
fn flatten_child(chain_context: &ChainContext) -> Result<()> {
    let child = chain_context
        .child
        .get()
        .ok_or_else(|| anyhow!("expected a child search source"))?;
    match block_on(child.flatten()) {
        Ok(state) => chain_context.merged.set(state),
        Err(err) => {
            ensure!(
                matches!(err.as_ref(), CourierError::Merge { .. }),
                "unexpected flatten error {err}"
            );
            chain_context.failure.set(err.to_string());
        }
    }
    Ok(())
}

fn merged(chain_context: &ChainContext) -> Result<courier::MergedState> {
    chain_context
        .merged
        .get()
        .ok_or_else(|| anyhow!("expected the chain to flatten successfully"))
}

#[then("the merged index is {expected}")]
fn merged_index_is(chain_context: &ChainContext, expected: String) -> Result<()> {
    let state = merged(chain_context)?;
    ensure!(
        state.index() == Some(&json!(expected)),
        "unexpected index {:?}",
        state.index()
    );
    Ok(())
}

#[then("the merged body size is {expected:u64}")]
fn merged_size_is(chain_context: &ChainContext, expected: u64) -> Result<()> {
    let state = merged(chain_context)?;
    ensure!(
        state.body().get("size") == Some(&json!(expected)),
        "unexpected size {:?}",
        state.body().get("size")
    );
    Ok(())
}

#[then("the merged filters are {expected}")]
fn merged_filters_are(chain_context: &ChainContext, expected: String) -> Result<()> {
    let state = merged(chain_context)?;
    let wanted = expected
        .split(',')
        .map(term_filter)
        .collect::<Result<Vec<_>>>()?;
    ensure!(
        state.filters() == wanted.as_slice(),
        "unexpected filters {:?}; expected {:?}",
        state.filters(),
        wanted
    );
    Ok(())
}

#[then("flattening fails with a merge error mentioning {message}")]
fn flatten_failed(chain_context: &ChainContext, message: String) -> Result<()> {
    let failure = chain_context
        .failure
        .get()
        .ok_or_else(|| anyhow!("expected the flatten to fail"))?;
    ensure!(
        failure.contains(&message),
        "failure {failure} does not mention {message}"
    );
    ensure!(chain_context.merged.is_empty(), "no partial state may be kept");
    Ok(())
}
