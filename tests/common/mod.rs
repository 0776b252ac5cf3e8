// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared helpers for varlist integration tests.

use serde_json::Value;
use std::collections::HashMap;
use varlist::LoggingConfig;
use varlist::config::{ConfigError, ConfigProvider};

/// In-memory configuration provider with flat dotted keys.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct TestConfigProvider {
    values: HashMap<String, Value>,
}

#[allow(dead_code)]
impl TestConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl ConfigProvider for TestConfigProvider {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn provider_name(&self) -> &str {
        "test"
    }

    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }
}

/// Install structured logging at `warning` once for the test binary.
#[allow(dead_code)]
pub fn init_structured_logging() {
    varlist::logging::init_with_config(&LoggingConfig {
        structured: true,
        level: "warning".to_string(),
        ..LoggingConfig::default()
    });
}
