// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end dispatch through configuration, sinks and formatting.

use serde_json::json;
use serial_test::serial;
use std::io::Write;
use std::sync::Arc;
use varlist::{
    Config, Dispatcher, Error, LogRecord, LogSink, LoggingConfig, MemorySink,
    PlaceholderSubstitute, Severity, Value, Variables, vars,
};

mod common;
use common::TestConfigProvider;

/// Sink that renders records straight away, like a database-backed logger.
#[derive(Debug, Default)]
struct RenderingSink {
    lines: std::sync::Mutex<Vec<String>>,
}

impl LogSink for RenderingSink {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let text = record.render(&PlaceholderSubstitute)?;
        self.lines
            .lock()
            .map_err(|e| Error::sink(e.to_string()))?
            .push(format!("[{}] {}: {}", record.severity, record.subsystem, text));
        Ok(())
    }
}

#[test]
fn dispatcher_from_config_uses_configured_subsystem() {
    let config = Config::builder()
        .with_provider(TestConfigProvider::new().with_value("dispatch.subsystem", json!("node")))
        .build();

    let sink = Arc::new(MemorySink::new());
    let dispatcher = Dispatcher::from_config(&config, Arc::clone(&sink)).unwrap();
    dispatcher
        .info("Saved @title", &vars! { "@title" => "About", "nid" => 3 })
        .unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subsystem, "node");
    assert_eq!(records[0].severity, Severity::Info);
    assert_eq!(
        records[0].vars.get("@var_list"),
        Some(&Value::from("nid: 3\n"))
    );
}

#[test]
fn rendering_sink_produces_final_text() {
    let dispatcher = Dispatcher::new("user", RenderingSink::default());
    dispatcher
        .warning(
            "Login failed for %name",
            &vars! { "%name" => "bob", "ip" => "10.0.0.1" },
        )
        .unwrap();
    dispatcher.error("Session store down", &Variables::new()).unwrap();

    let lines = dispatcher.sink().lines.lock().unwrap().clone();
    assert_eq!(
        lines,
        vec![
            "[warning] user: Login failed for <em class=\"placeholder\">bob</em>\n<pre>ip: 10.0.0.1\n</pre>"
                .to_string(),
            "[error] user: Session store down".to_string(),
        ]
    );
}

#[test]
#[serial]
fn configuration_file_drives_logging_and_dispatch() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"dispatch:\n  subsystem: search\nlogging:\n  level: debug\n  format: json\n")
        .unwrap();

    let config = Config::from_file_and_env(file.path()).unwrap();
    let logging = LoggingConfig::from_config(&config).unwrap();
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.format, "json");
    assert!(!logging.structured);

    let dispatcher = Dispatcher::from_config(&config, MemorySink::new()).unwrap();
    assert_eq!(dispatcher.subsystem(), "search");
}

#[test]
fn dispatcher_is_shareable_across_threads() {
    let dispatcher = Arc::new(Dispatcher::new("queue", MemorySink::new()));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                dispatcher
                    .debug("Worker @id done", &vars! { "@id" => worker, "items" => worker * 10 })
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(dispatcher.sink().len(), 4);
}
