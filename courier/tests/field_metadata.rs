//! Field metadata lookups delegated to the courier's mapper.

mod common;

use std::error::Error as _;
use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use common::{RecordingMapper, handle, sample_mapping};
use courier::{Courier, CourierError};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn mapping_comes_from_the_mapper(handle: Arc<Courier>) -> Result<()> {
    let source = handle.search_source();
    source.index("logs-*");
    let mapping = source.get_fields().await.map_err(|err| anyhow!(err.to_string()))?;
    ensure!(mapping == sample_mapping(), "unexpected mapping {mapping:?}");
    ensure!(
        mapping.get("@timestamp").map(|field| field.field_type.as_str()) == Some("date"),
        "timestamp should be a date"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn mapper_receives_the_calling_source() -> Result<()> {
    let mapper = Arc::new(RecordingMapper::default());
    let courier = Courier::new(Arc::clone(&mapper) as Arc<dyn courier::FieldMapper>);
    let parent = courier.search_source();
    let child = courier.search_source();
    child.set_parent(&parent);

    child.get_fields().await.map_err(|err| anyhow!(err.to_string()))?;
    let callers = mapper.callers.lock().clone();
    ensure!(callers == vec![child.to_string()], "unexpected callers {callers:?}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn mapper_failures_are_wrapped_verbatim() -> Result<()> {
    let courier = Courier::new(Arc::new(RecordingMapper {
        fail_with: Some("no such index [logs-*]".to_owned()),
        ..RecordingMapper::default()
    }));
    let source = courier.search_source();

    let Err(err) = source.get_fields().await else {
        return Err(anyhow!("mapper failure should propagate"));
    };
    ensure!(
        matches!(err.as_ref(), CourierError::MetadataFetch { .. }),
        "unexpected error {err:?}"
    );
    let inner = err
        .source()
        .ok_or_else(|| anyhow!("metadata errors keep the mapper's error"))?;
    ensure!(
        inner.to_string() == "no such index [logs-*]",
        "mapper message changed: {inner}"
    );
    Ok(())
}
