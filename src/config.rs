//! Configuration System
//!
//! Hierarchical configuration for the transport endpoint and logging, loaded
//! from an optional TOML file with `GRAFT_*` environment variable overrides.
//! The composition core itself is configuration-free; only the ambient
//! concerns (where to send documents, how to log) live here.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraftConfig {
    /// GraphQL endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GraphQL endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Endpoint URL documents are posted to
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra headers sent with every request (e.g. authorization)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_url() -> String {
    "http://localhost:4000/graphql".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
        }
    }
}

impl GraftConfig {
    /// Load configuration from an optional TOML file plus environment
    ///
    /// Precedence, lowest to highest: built-in defaults, the file (if given),
    /// then `GRAFT_*` environment variables with `__` as the section
    /// separator (`GRAFT_ENDPOINT__URL`, `GRAFT_LOGGING__LEVEL`, ...).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("GRAFT")
                .separator("__")
                .try_parsing(true),
        );

        let loaded = builder.build()?;
        Ok(loaded.try_deserialize()?)
    }
}
