//! Configuration loading for bibsearch.
//!
//! Layered: built-in defaults -> optional TOML file -> environment
//! variables with the `BIBSEARCH_` prefix.

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for the bibsearch service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BibSearchConfig {
    /// Base URL of the remote search engine.
    #[serde(default = "default_engine_url")]
    pub engine_url: String,

    /// Name of the engine index holding all three document kinds.
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Default bulk batch size. 0 means unbounded: the whole input
    /// sequence is submitted as a single batch.
    #[serde(default)]
    pub batch_size: usize,

    /// Ask the engine to refresh after each bulk write so documents are
    /// immediately searchable. Slow; intended for tests and smoke runs.
    #[serde(default)]
    pub refresh_on_write: bool,

    /// Number of top facet terms requested per search.
    #[serde(default = "default_facet_size")]
    pub facet_size: usize,
}

fn default_engine_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_index_name() -> String {
    "biblio".to_string()
}

fn default_facet_size() -> usize {
    10
}

impl Default for BibSearchConfig {
    fn default() -> Self {
        Self {
            engine_url: default_engine_url(),
            index_name: default_index_name(),
            batch_size: 0,
            refresh_on_write: false,
            facet_size: default_facet_size(),
        }
    }
}

impl BibSearchConfig {
    /// Load configuration, layering defaults, an optional file, and
    /// `BIBSEARCH_*` environment variables (later sources win).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("BIBSEARCH"))
            .build()?;

        let config: BibSearchConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine_url.is_empty() {
            return Err(ConfigError::Invalid("engine_url must not be empty".into()));
        }
        if self.index_name.is_empty() {
            return Err(ConfigError::Invalid("index_name must not be empty".into()));
        }
        if self.facet_size == 0 {
            return Err(ConfigError::Invalid("facet_size must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BibSearchConfig::default();
        assert_eq!(config.engine_url, "http://localhost:9200");
        assert_eq!(config.index_name, "biblio");
        assert_eq!(config.batch_size, 0);
        assert!(!config.refresh_on_write);
        assert_eq!(config.facet_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_index_name() {
        let config = BibSearchConfig {
            index_name: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_facet_size() {
        let config = BibSearchConfig {
            facet_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BibSearchConfig =
            serde_json::from_str(r#"{"index_name": "cds", "batch_size": 500}"#).unwrap();
        assert_eq!(config.index_name, "cds");
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.engine_url, "http://localhost:9200");
    }
}
