// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Log sinks – where dispatched records end up.
//!
//! A [`LogSink`] receives a fully prepared [`LogRecord`]. Three sinks ship
//! with the crate:
//!
//! - [`FacadeSink`] renders the record and writes it through the `log` facade
//! - [`SlogSink`] writes it to an `slog::Logger` with key-value context
//! - [`MemorySink`] keeps records in memory for inspection in tests


use crate::error::Error;
use crate::format::{PlaceholderSubstitute, Substitute};
use crate::prepare::Prepared;
use crate::severity::Severity;
use crate::variables::Variables;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A prepared message on its way to a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Name of the subsystem that emitted the record
    pub subsystem: String,
    /// Prepared message template
    pub message: String,
    /// Embedded variables for the template
    pub vars: Variables,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Build a record stamped with the current time.
    pub fn new(subsystem: impl Into<String>, prepared: Prepared, severity: Severity) -> Self {
        let (message, vars) = prepared.into_parts();
        Self {
            subsystem: subsystem.into(),
            message,
            vars,
            severity,
            timestamp: Utc::now(),
        }
    }

    /// Substitute the embedded variables into the message.
    pub fn render<S: Substitute + ?Sized>(&self, substitute: &S) -> Result<String, Error> {
        substitute.substitute(&self.message, &self.vars)
    }
}

/// Destination for dispatched records.
pub trait LogSink: Send + Sync {
    fn log(&self, record: &LogRecord) -> Result<(), Error>;
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        (**self).log(record)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        (**self).log(record)
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        (**self).log(record)
    }
}

/// Writes rendered records through the `log` facade.
///
/// The subsystem becomes the log target.
#[derive(Debug, Clone, Default)]
pub struct FacadeSink<F = PlaceholderSubstitute> {
    substitute: F,
}

impl FacadeSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: Substitute + Send + Sync> FacadeSink<F> {
    /// Use a custom substituter to render messages.
    pub fn with_substitute(substitute: F) -> Self {
        Self { substitute }
    }
}

impl<F: Substitute + Send + Sync> LogSink for FacadeSink<F> {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let text = record.render(&self.substitute)?;
        log::log!(
            target: record.subsystem.as_str(),
            record.severity.to_log_level(),
            "{}",
            text
        );
        Ok(())
    }
}

/// Writes rendered records to an slog logger.
///
/// The subsystem, severity, raw template and embedded variables travel as
/// key-values alongside the rendered message.
#[derive(Debug, Clone)]
pub struct SlogSink<F = PlaceholderSubstitute> {
    logger: slog::Logger,
    substitute: F,
}

impl SlogSink {
    pub fn new(logger: slog::Logger) -> Self {
        Self {
            logger,
            substitute: PlaceholderSubstitute,
        }
    }

    /// Use the current `slog_scope` global logger.
    pub fn from_global() -> Self {
        Self::new(slog_scope::logger())
    }
}

impl<F: Substitute + Send + Sync> SlogSink<F> {
    pub fn with_substitute(logger: slog::Logger, substitute: F) -> Self {
        Self { logger, substitute }
    }
}

impl<F: Substitute + Send + Sync> LogSink for SlogSink<F> {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let text = record.render(&self.substitute)?;
        let vars = serde_json::to_string(&record.vars).map_err(Error::sink)?;
        let logger = self.logger.new(slog::o!(
            "subsystem" => record.subsystem.clone(),
            "severity" => record.severity.as_str(),
            "template" => record.message.clone(),
            "vars" => vars,
            "timestamp" => record.timestamp.to_rfc3339(),
        ));

        // slog levels are resolved at compile time per call site
        match record.severity.to_slog_level() {
            slog::Level::Critical => slog::crit!(logger, "{}", text),
            slog::Level::Error => slog::error!(logger, "{}", text),
            slog::Level::Warning => slog::warn!(logger, "{}", text),
            slog::Level::Info => slog::info!(logger, "{}", text),
            slog::Level::Debug => slog::debug!(logger, "{}", text),
            slog::Level::Trace => slog::trace!(logger, "{}", text),
        }
        Ok(())
    }
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the Vec half-written
    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all records received so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Drain all records received so far.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.lock().push(record.clone());
        Ok(())
    }
}
