//! Logging System
//!
//! Structured logging via the `tracing` crate. Render and visibility
//! transitions are traced at debug level; transport activity at info/debug.
//! The filter comes from `GRAFT_LOG` when set, otherwise from configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest): `GRAFT_LOG` environment variable,
/// configuration, defaults. Fails if a subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ConfigError> {
    let filter = build_env_filter(config)?;
    let base_subscriber = Registry::default().with(filter);

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let result = if format == "json" {
        base_subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        base_subscriber
            .with(fmt::layer().with_target(true).with_ansi(use_color))
            .try_init()
    };

    result.map_err(|e| ConfigError::Logging(e.to_string()))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("GRAFT_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    let level_filter: tracing_subscriber::filter::LevelFilter = level
        .parse()
        .map_err(|e| ConfigError::Logging(format!("Invalid log level '{}': {}", level, e)))?;

    let mut filter = EnvFilter::default().add_directive(level_filter.into());

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level)
                .parse()
                .map_err(|e| {
                    ConfigError::Logging(format!(
                        "Invalid log directive for module '{}': {}",
                        module, e
                    ))
                })?;
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}
