// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide logger setup.
//!
//! The crate itself only talks to the `log` facade. These helpers install a
//! backend for it: plain `env_logger`, or a structured slog root with
//! `slog_stdlog` bridging facade records into it.

pub mod config;
pub mod structured;
pub mod test_logger;
pub mod wrapper;

#[cfg(test)]
mod tests;

use crate::logging::config::LoggingConfig;
use crate::logging::structured::LoggerGuard;
use log::LevelFilter;
use once_cell::sync::OnceCell;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

static INIT: Once = Once::new();
static USING_STRUCTURED: AtomicBool = AtomicBool::new(false);
static STRUCTURED_GUARD: OnceCell<LoggerGuard> = OnceCell::new();

/// Initialize `env_logger` at the given level, honouring `RUST_LOG`.
///
/// Only the first call in a process has any effect.
pub fn init(level: Option<LevelFilter>) {
    install(level.unwrap_or(LevelFilter::Info), &LoggingConfig::default());
}

/// Initialize logging from a [`LoggingConfig`], at the level it names.
///
/// Only the first call in a process has any effect.
pub fn init_with_config(config: &LoggingConfig) {
    install(config.level_filter(), config);
}

fn install(level: LevelFilter, config: &LoggingConfig) {
    INIT.call_once(|| {
        if config.structured {
            let guard = structured::init_global_logger(&config.to_logger_config());
            let _ = STRUCTURED_GUARD.set(guard);

            let bridge_level = level.to_level().unwrap_or(log::Level::Error);
            match slog_stdlog::init_with_level(bridge_level) {
                Ok(()) => {
                    log::set_max_level(level);
                    USING_STRUCTURED.store(true, Ordering::SeqCst);
                }
                Err(e) => eprintln!("varlist: failed to bridge log facade into slog: {e}"),
            }
        } else {
            let env = env_logger::Env::default().filter_or("RUST_LOG", level_name(level));
            let _ = env_logger::Builder::from_env(env)
                .format_timestamp_millis()
                .format_target(true)
                .try_init();
        }

        log::info!("Logging initialized at level: {}", log::max_level());
    });
}

/// Whether the structured slog backend is active.
pub fn is_structured_logging() -> bool {
    USING_STRUCTURED.load(Ordering::SeqCst)
}

fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::Trace => "trace",
        LevelFilter::Debug => "debug",
        LevelFilter::Info => "info",
        LevelFilter::Warn => "warn",
        LevelFilter::Error => "error",
        LevelFilter::Off => "off",
    }
}

/// Log an error with context and return the error.
pub fn log_error<E: std::fmt::Display>(context: &str, err: E) -> E {
    crate::error_fmt!(context, "{}", err);
    err
}
