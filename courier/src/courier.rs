//! The owning context shared by search sources.
//!
//! A [`Courier`] carries the collaborators a search source needs but does not
//! own: the [`FieldMapper`] that retrieves index mappings and the loaded
//! [`CourierConfig`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{BoxError, CourierConfig, SearchSource};

/// Metadata describing a single mapped field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Mapped field type, such as `keyword` or `date`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the field is indexed.
    #[serde(default)]
    pub indexed: bool,
    /// Whether the field is analysed.
    #[serde(default)]
    pub analyzed: bool,
    /// Whether the field has doc values.
    #[serde(default)]
    pub doc_values: bool,
}

/// Field metadata keyed by field name.
pub type FieldMapping = BTreeMap<String, FieldMetadata>;

/// Retrieves index mappings for search sources.
#[async_trait]
pub trait FieldMapper: Send + Sync {
    /// Fetch the field mapping for `source`.
    ///
    /// # Errors
    ///
    /// Implementations return any transport or lookup failure; the search
    /// source wraps it as [`crate::CourierError::MetadataFetch`].
    async fn get_fields(&self, source: &SearchSource) -> Result<FieldMapping, BoxError>;
}

/// Context handle shared by every search source it creates.
pub struct Courier {
    mapper: Arc<dyn FieldMapper>,
    config: CourierConfig,
}

impl Courier {
    /// Create a courier with default configuration.
    #[must_use]
    pub fn new(mapper: Arc<dyn FieldMapper>) -> Arc<Self> {
        Self::with_config(mapper, CourierConfig::default())
    }

    /// Create a courier with explicit configuration.
    #[must_use]
    pub fn with_config(mapper: Arc<dyn FieldMapper>, config: CourierConfig) -> Arc<Self> {
        Arc::new(Self { mapper, config })
    }

    /// Field mapper used for metadata lookups.
    #[must_use]
    pub fn mapper(&self) -> &dyn FieldMapper {
        self.mapper.as_ref()
    }

    /// Loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// Create an empty search source bound to this courier.
    #[must_use]
    pub fn search_source(self: &Arc<Self>) -> Arc<SearchSource> {
        SearchSource::new(Arc::clone(self))
    }
}

impl fmt::Debug for Courier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Courier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
