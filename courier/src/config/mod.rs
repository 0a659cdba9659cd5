//! Runtime configuration for couriers.
//!
//! Values are layered with Figment: serialised defaults first, then an
//! optional TOML file, then `COURIER_`-prefixed environment variables. Later
//! layers override earlier ones.

use std::sync::Arc;

use camino::Utf8Path;
use figment::{Error as FigmentError, Figment};
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CourierError, CourierResult, CourierResultExt};

/// Prefix for environment variables read by [`CourierConfig::load`].
pub const ENV_PREFIX: &str = "COURIER_";

/// File consulted by [`CourierConfig::load`] in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "courier.toml";

/// Default limit on the number of sources in one parent chain.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 64;

/// Settings shared by every search source created from one courier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Maximum number of sources a flattened chain may contain.
    ///
    /// Must be at least 1; a source without a parent always flattens.
    pub max_chain_depth: usize,
    /// Hit count applied to requests whose chain never sets `size`.
    pub default_size: Option<u64>,
    /// Ask the backend for an exact total hit count.
    pub track_total_hits: bool,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            default_size: None,
            track_total_hits: false,
        }
    }
}

impl CourierConfig {
    /// Load configuration from `courier.toml` and the environment.
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CourierError::Config`] when a layer holds a value of
    /// the wrong type.
    pub fn load() -> CourierResult<Self> {
        Self::load_from(Utf8Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from `path` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CourierError::Config`] when a layer holds a value of
    /// the wrong type or the loaded values fail [`Self::validate`].
    pub fn load_from(path: &Utf8Path) -> CourierResult<Self> {
        debug!(path = %path, prefix = ENV_PREFIX, "loading courier configuration");
        let config: Self = Self::figment(path).extract().into_courier()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialise cleanly but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CourierError::Config`] when `max_chain_depth` is zero.
    pub fn validate(&self) -> CourierResult<()> {
        if self.max_chain_depth == 0 {
            return Err(Arc::new(CourierError::config(FigmentError::from(
                "max_chain_depth must be at least 1".to_owned(),
            ))));
        }
        Ok(())
    }

    /// Build the layered Figment used by [`Self::load_from`].
    #[must_use]
    pub fn figment(path: &Utf8Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
