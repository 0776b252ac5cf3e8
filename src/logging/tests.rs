// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests {
    use crate::config::{Config, ConfigError, ConfigProvider};
    use crate::logging::config::{LoggingConfig, parse_level};
    use crate::logging::structured::{
        LogFormat, LoggerConfig, create_logger_with_drain, with_static_fields,
    };
    use crate::logging::test_logger::CaptureDrain;
    use crate::logging::{init, init_with_config, is_structured_logging, log_error};
    use log::LevelFilter;
    use serde_json::{Value, json};
    use serial_test::serial;
    use std::collections::BTreeMap;

    #[derive(Debug)]
    struct StaticProvider(serde_json::Map<String, Value>);

    impl ConfigProvider for StaticProvider {
        fn has(&self, key: &str) -> bool {
            self.0.contains_key(key)
        }

        fn provider_name(&self) -> &str {
            "static"
        }

        fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
            Ok(self.0.get(key).cloned())
        }
    }

    #[test]
    fn test_default_logging_config() {
        let config = LoggingConfig::default();
        assert!(!config.structured);
        assert_eq!(config.format, "terminal");
        assert_eq!(config.level, "info");
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: LoggingConfig = serde_json::from_value(json!({"level": "debug"})).unwrap();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.format, "terminal");
        assert!(config.static_fields.is_empty());
    }

    #[test]
    fn test_to_logger_config() {
        let mut static_fields = BTreeMap::new();
        static_fields.insert("site".to_string(), "example".to_string());
        let config = LoggingConfig {
            structured: true,
            format: "JSON".to_string(),
            level: "warning".to_string(),
            static_fields,
        };

        let logger_config = config.to_logger_config();
        assert_eq!(logger_config.format, LogFormat::Json);
        assert_eq!(logger_config.level, slog::Level::Warning);
        assert_eq!(
            logger_config.static_fields,
            vec![("site".to_string(), "example".to_string())]
        );
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
        assert_eq!(config.to_logger_config().level, slog::Level::Info);
    }

    #[test]
    fn test_from_config_flat_keys_override_table() {
        let mut values = serde_json::Map::new();
        values.insert(
            "logging".to_string(),
            json!({"structured": false, "format": "json", "level": "info"}),
        );
        values.insert("logging.level".to_string(), json!("trace"));
        let config = Config::builder().with_provider(StaticProvider(values)).build();

        let logging = LoggingConfig::from_config(&config).unwrap();
        assert_eq!(logging.format, "json");
        assert_eq!(logging.level, "trace");
    }

    #[test]
    fn test_from_config_missing_uses_defaults() {
        let logging = LoggingConfig::from_config(&Config::default()).unwrap();
        assert_eq!(logging, LoggingConfig::default());
    }

    #[test]
    fn test_logger_with_drain_filters_level_and_adds_fields() {
        let drain = CaptureDrain::new();
        let config = LoggerConfig {
            format: LogFormat::Json,
            level: slog::Level::Warning,
            static_fields: vec![("app".to_string(), "varlist".to_string())],
        };
        let logger = create_logger_with_drain(drain.clone(), &config);

        slog::info!(logger, "filtered out");
        slog::warn!(logger, "kept"; "uid" => 7);

        let records = drain.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, slog::Level::Warning);
        assert_eq!(records[0].message, "kept");
        assert_eq!(records[0].value("app"), Some("varlist"));
        assert_eq!(records[0].value("uid"), Some("7"));
    }

    #[test]
    fn test_with_static_fields_adds_context() {
        let drain = CaptureDrain::new();
        let root = slog::Logger::root(drain.clone(), slog::o!());
        let logger = with_static_fields(
            root,
            &[
                ("site".to_string(), "example".to_string()),
                ("env".to_string(), "test".to_string()),
            ],
        );
        slog::info!(logger, "with static context");

        let records = drain.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value("site"), Some("example"));
        assert_eq!(records[0].value("env"), Some("test"));
    }

    #[test]
    fn test_level_names_agree_between_backends() {
        let cases = [
            ("warning", LevelFilter::Warn, slog::Level::Warning),
            ("WARN", LevelFilter::Warn, slog::Level::Warning),
            ("critical", LevelFilter::Error, slog::Level::Critical),
            ("error", LevelFilter::Error, slog::Level::Error),
            ("notice", LevelFilter::Info, slog::Level::Info),
            ("trace", LevelFilter::Trace, slog::Level::Trace),
        ];
        for (name, filter, level) in cases {
            let config = LoggingConfig {
                level: name.to_string(),
                ..LoggingConfig::default()
            };
            assert_eq!(config.level_filter(), filter, "filter for {name}");
            assert_eq!(config.to_logger_config().level, level, "slog level for {name}");
        }
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    #[serial]
    fn test_init_is_idempotent() {
        init(Some(LevelFilter::Debug));
        init_with_config(&LoggingConfig {
            level: "trace".to_string(),
            ..LoggingConfig::default()
        });
        // A second initialization never switches backends
        let before = is_structured_logging();
        init(None);
        assert_eq!(is_structured_logging(), before);
    }

    #[test]
    fn test_log_error_returns_error() {
        let returned = log_error("Dispatcher", "sink unavailable");
        assert_eq!(returned, "sink unavailable");
    }
}
