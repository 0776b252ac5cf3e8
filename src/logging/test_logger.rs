// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! slog helpers for tests.

use once_cell::sync::OnceCell;
use slog::{Discard, Logger, o};
use slog_scope::GlobalLoggerGuard;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Install a discarding global slog logger for the whole test binary.
/// Safe to call from every test – the logger is installed exactly once.
pub fn init_test_logger() {
    static GUARD: OnceCell<GlobalLoggerGuard> = OnceCell::new();

    GUARD.get_or_init(|| {
        let logger = Logger::root(Discard, o!());
        slog_scope::set_global_logger(logger)
    });
}

/// A record seen by [`CaptureDrain`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub level: slog::Level,
    pub message: String,
    /// Logger context followed by record key-values, all stringified
    pub kv: Vec<(String, String)>,
}

impl CapturedRecord {
    /// First value stored under `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.kv
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Drain that keeps every record in memory. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct CaptureDrain(Arc<Mutex<Vec<CapturedRecord>>>);

impl CaptureDrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records captured so far.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

struct KvCollector(Vec<(String, String)>);

impl slog::Serializer for KvCollector {
    fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments) -> slog::Result {
        self.0.push((key.to_string(), val.to_string()));
        Ok(())
    }
}

impl slog::Drain for CaptureDrain {
    type Ok = ();
    type Err = slog::Never;

    fn log(
        &self,
        record: &slog::Record,
        values: &slog::OwnedKVList,
    ) -> Result<Self::Ok, Self::Err> {
        use slog::KV;

        let mut collector = KvCollector(Vec::new());
        let _ = values.serialize(record, &mut collector);
        let _ = record.kv().serialize(record, &mut collector);
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedRecord {
                level: record.level(),
                message: record.msg().to_string(),
                kv: collector.0,
            });
        Ok(())
    }
}
