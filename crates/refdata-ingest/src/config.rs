//! Ingest configuration
//!
//! Values come from defaults, then a `.env` file and the process
//! environment. Command line flags override the result.

use refdata_common::{RefdataError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::line_source::Encoding;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default input encoding.
pub const DEFAULT_ENCODING: Encoding = Encoding::Utf8;

/// Default number of records between progress updates.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

pub const ENV_ENCODING: &str = "REFDATA_ENCODING";
pub const ENV_PARSE_LIMIT: &str = "REFDATA_PARSE_LIMIT";
pub const ENV_PROGRESS_INTERVAL: &str = "REFDATA_PROGRESS_INTERVAL";

/// Settings shared by every parse run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    pub encoding: Encoding,
    /// Stop after this many records; `None` parses the whole input
    pub parse_limit: Option<usize>,
    pub progress_interval: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING,
            parse_limit: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl IngestConfig {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        debug!(?config, "Loaded ingest configuration");
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ENCODING) {
            config.encoding = value.parse()?;
        }

        if let Some(value) = lookup(ENV_PARSE_LIMIT) {
            let limit = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                RefdataError::invalid_setting(ENV_PARSE_LIMIT, &value, e.to_string())
            })?;
            config.parse_limit = Some(limit);
        }

        if let Some(value) = lookup(ENV_PROGRESS_INTERVAL) {
            config.progress_interval =
                value.trim().parse().map_err(|e: std::num::ParseIntError| {
                    RefdataError::invalid_setting(ENV_PROGRESS_INTERVAL, &value, e.to_string())
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.parse_limit == Some(0) {
            return Err(RefdataError::invalid_setting(
                ENV_PARSE_LIMIT,
                "0",
                "limit must be at least 1",
            ));
        }

        if self.progress_interval == 0 {
            return Err(RefdataError::invalid_setting(
                ENV_PROGRESS_INTERVAL,
                "0",
                "interval must be at least 1",
            ));
        }

        Ok(())
    }
}
