//! Shared fixtures for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use courier::{BoxError, Courier, FieldMapper, FieldMapping, FieldMetadata, SearchSource};
use parking_lot::Mutex;
use rstest::fixture;

/// Mapper that returns a fixed mapping and records who asked for it.
#[derive(Default)]
pub struct RecordingMapper {
    pub mapping: FieldMapping,
    pub fail_with: Option<String>,
    pub callers: Mutex<Vec<String>>,
}

#[async_trait]
impl FieldMapper for RecordingMapper {
    async fn get_fields(&self, source: &SearchSource) -> Result<FieldMapping, BoxError> {
        self.callers.lock().push(source.to_string());
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(self.mapping.clone()),
        }
    }
}

/// Mapping with a keyword and a date field.
pub fn sample_mapping() -> FieldMapping {
    let mut mapping = FieldMapping::new();
    mapping.insert(
        "@timestamp".to_owned(),
        FieldMetadata {
            field_type: "date".to_owned(),
            indexed: true,
            analyzed: false,
            doc_values: true,
        },
    );
    mapping.insert(
        "message".to_owned(),
        FieldMetadata {
            field_type: "text".to_owned(),
            indexed: true,
            analyzed: true,
            doc_values: false,
        },
    );
    mapping
}

/// Courier backed by a mapper that never fails.
#[fixture]
pub fn handle() -> Arc<Courier> {
    Courier::new(Arc::new(RecordingMapper {
        mapping: sample_mapping(),
        ..RecordingMapper::default()
    }))
}
