//! Pipeline configuration.
//!
//! A pipeline configuration names the filters to apply, in order, and the log
//! level of the command line tool. It is read from JSON:
//!
//! ```json
//! {
//!   "log_level": "debug",
//!   "filters": {
//!     "countries": {"include": ["NO"]},
//!     "time_bounds": {"start_include": [["1997-01-01 00:00:00", "1998-01-01 00:00:00"]]}
//!   }
//! }
//! ```

use crate::app::services::filters::{FilterChain, FilterCollection, FilterFactory, Kwargs};
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Filters and logging for one pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Log level for the command line tool (`error` .. `trace`)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Filters in application order
    #[serde(default)]
    pub filters: FilterCollection,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            filters: FilterCollection::new(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::json("invalid pipeline configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_open(path, e))?;
        debug!("Loaded pipeline configuration from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Set the log level
    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    /// Append a filter
    pub fn with_filter(mut self, name: impl Into<String>, kwargs: Kwargs) -> Self {
        self.filters.push(name, kwargs);
        self
    }

    /// Replace all filters
    pub fn with_filters(mut self, filters: FilterCollection) -> Self {
        self.filters = filters;
        self
    }

    /// Check settings that serde cannot check
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(Error::configuration(format!(
                "Invalid log level '{}', expected one of {}",
                self.log_level,
                LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Build the configured filters
    pub fn resolve(&self, factory: &FilterFactory) -> Result<FilterChain> {
        self.filters.resolve(factory)
    }
}
