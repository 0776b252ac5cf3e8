// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-severity log dispatch.
//!
//! A [`Dispatcher`] fixes a subsystem name and a sink. Each severity method
//! prepares the message for HTML output with the extra variables appended,
//! then hands the record to the sink.
//!
//! ```
//! use varlist::{Dispatcher, MemorySink, vars};
//!
//! let dispatcher = Dispatcher::new("cron", MemorySink::new());
//! dispatcher
//!     .warning("Run took @secs seconds", &vars! { "@secs" => 42, "queue" => "mail" })
//!     .unwrap();
//! assert_eq!(dispatcher.sink().len(), 1);
//! ```


use crate::config::{Config, ConfigError};
use crate::error::Error;
use crate::logging::log_error;
use crate::prepare::prepare;
use crate::severity::Severity;
use crate::sink::{LogRecord, LogSink};
use crate::variables::Variables;
use serde::{Deserialize, Serialize};

/// Subsystem name used when none is configured.
pub const DEFAULT_SUBSYSTEM: &str = "varlist";

/// Dispatcher settings, read from the `dispatch` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    #[serde(default = "default_subsystem")]
    pub subsystem: String,
}

fn default_subsystem() -> String {
    DEFAULT_SUBSYSTEM.to_string()
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            subsystem: default_subsystem(),
        }
    }
}

impl DispatchSettings {
    /// Load from `dispatch`, letting a flat `dispatch.subsystem` override it.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut settings = config
            .get::<DispatchSettings>("dispatch")?
            .unwrap_or_default();
        if let Some(subsystem) = config.get::<String>("dispatch.subsystem")? {
            settings.subsystem = subsystem;
        }
        if settings.subsystem.is_empty() {
            return Err(ConfigError::ParseError(
                "dispatch.subsystem must not be empty".to_string(),
            ));
        }
        Ok(settings)
    }
}

/// Sends prepared messages for one subsystem to a sink.
#[derive(Debug)]
pub struct Dispatcher<S> {
    subsystem: String,
    sink: S,
}

impl<S: LogSink> Dispatcher<S> {
    pub fn new(subsystem: impl Into<String>, sink: S) -> Self {
        Self {
            subsystem: subsystem.into(),
            sink,
        }
    }

    pub fn from_settings(settings: DispatchSettings, sink: S) -> Self {
        Self::new(settings.subsystem, sink)
    }

    /// Build a dispatcher from the `dispatch` configuration.
    pub fn from_config(config: &Config, sink: S) -> Result<Self, ConfigError> {
        let settings = DispatchSettings::from_config(config)?;
        crate::debug_fmt!("Dispatcher", "dispatching for subsystem '{}'", settings.subsystem);
        Ok(Self::from_settings(settings, sink))
    }

    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Prepare `message` and forward it to the sink at `severity`.
    pub fn log(&self, severity: Severity, message: &str, vars: &Variables) -> Result<(), Error> {
        let prepared = prepare(message, vars, true, true)?;
        let record = LogRecord::new(self.subsystem.as_str(), prepared, severity);
        self.sink
            .log(&record)
            .map_err(|e| log_error(&self.subsystem, e))
    }

    pub fn debug(&self, message: &str, vars: &Variables) -> Result<(), Error> {
        self.log(Severity::Debug, message, vars)
    }

    pub fn info(&self, message: &str, vars: &Variables) -> Result<(), Error> {
        self.log(Severity::Info, message, vars)
    }

    pub fn notice(&self, message: &str, vars: &Variables) -> Result<(), Error> {
        self.log(Severity::Notice, message, vars)
    }

    pub fn warning(&self, message: &str, vars: &Variables) -> Result<(), Error> {
        self.log(Severity::Warning, message, vars)
    }

    pub fn error(&self, message: &str, vars: &Variables) -> Result<(), Error> {
        self.log(Severity::Error, message, vars)
    }
}
