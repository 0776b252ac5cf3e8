// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for logging.

use crate::config::{Config, ConfigError};
use crate::logging::structured::{LogFormat, LoggerConfig};
use crate::severity::Severity;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logging configuration, read from the `logging` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to use structured logging
    #[serde(default)]
    pub structured: bool,

    /// Log format (terminal or json)
    #[serde(default = "default_format")]
    pub format: String,

    /// Log level
    #[serde(default = "default_level")]
    pub level: String,

    /// Static fields to include in all structured logs
    #[serde(default)]
    pub static_fields: BTreeMap<String, String>,
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            structured: false,
            format: default_format(),
            level: default_level(),
            static_fields: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Load from `logging`, then apply individual `logging.*` overrides.
    ///
    /// Flat keys let environment variables such as `VARLIST_LOGGING_LEVEL`
    /// override a table coming from a file.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut logging = config.get::<LoggingConfig>("logging")?.unwrap_or_default();
        if let Some(structured) = config.get::<bool>("logging.structured")? {
            logging.structured = structured;
        }
        if let Some(format) = config.get::<String>("logging.format")? {
            logging.format = format;
        }
        if let Some(level) = config.get::<String>("logging.level")? {
            logging.level = level;
        }
        Ok(logging)
    }

    /// Effective slog level. Unknown names fall back to `Info`.
    pub fn slog_level(&self) -> slog::Level {
        parse_level(&self.level).unwrap_or_else(|| {
            crate::warn_fmt!("Logging", "unknown level '{}', using info", self.level);
            slog::Level::Info
        })
    }

    /// Effective `log` level filter, derived from [`Self::slog_level`].
    pub fn level_filter(&self) -> LevelFilter {
        match self.slog_level() {
            slog::Level::Critical | slog::Level::Error => LevelFilter::Error,
            slog::Level::Warning => LevelFilter::Warn,
            slog::Level::Info => LevelFilter::Info,
            slog::Level::Debug => LevelFilter::Debug,
            slog::Level::Trace => LevelFilter::Trace,
        }
    }

    /// Convert to logger config
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: match self.format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Terminal,
            },
            level: self.slog_level(),
            static_fields: self
                .static_fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Parse a level name. Accepts `trace` plus every [`Severity`] spelling,
/// so `warn`/`warning` and `crit`/`critical` agree.
pub fn parse_level(name: &str) -> Option<slog::Level> {
    if name.trim().eq_ignore_ascii_case("trace") {
        return Some(slog::Level::Trace);
    }
    name.trim()
        .parse::<Severity>()
        .ok()
        .map(Severity::to_slog_level)
}
