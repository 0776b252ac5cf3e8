// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured logging setup. Lives in its own binary because logger
//! installation happens once per process.

use log::LevelFilter;
use serial_test::serial;
use varlist::logging::is_structured_logging;
use varlist::logging::test_logger::CaptureDrain;
use varlist::{Dispatcher, FacadeSink, vars};

mod common;
use common::init_structured_logging;

/// Run `f` with `slog_scope` pointed at a capturing logger on this thread.
fn capture<F: FnOnce()>(f: F) -> CaptureDrain {
    let drain = CaptureDrain::new();
    let logger = slog::Logger::root(drain.clone(), slog::o!());
    slog_scope::scope(&logger, f);
    drain
}

#[test]
#[serial]
fn structured_config_bridges_log_facade() {
    init_structured_logging();
    assert!(is_structured_logging());
    assert_eq!(log::max_level(), LevelFilter::Warn);

    let drain = capture(|| {
        log::info!("below the configured level");
        log::warn!("bridged {}", 1);
    });

    let records = drain.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, slog::Level::Warning);
    assert_eq!(records[0].message, "bridged 1");
}

#[test]
#[serial]
fn facade_sink_reaches_structured_backend() {
    init_structured_logging();
    let dispatcher = Dispatcher::new("cron", FacadeSink::new());

    let drain = capture(|| {
        dispatcher.info("Tick @n", &vars! { "@n" => 1 }).unwrap();
        dispatcher
            .error("Tick @n failed", &vars! { "@n" => 2, "host" => "db1" })
            .unwrap();
    });

    let records = drain.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, slog::Level::Error);
    assert_eq!(records[0].message, "Tick 2 failed\n<pre>host: db1\n</pre>");
}
