// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layered configuration.
//!
//! A [`Config`] is built from an ordered list of [`ConfigProvider`]s; later
//! providers override earlier ones. The usual stack is:
//!
//! 1. `FileConfigProvider` – `varlist.{toml,json,yaml}`
//! 2. `EnvConfigProvider`  – `VARLIST_DISPATCH_SUBSYSTEM=node`
//!
//! Recognised keys:
//!
//! | key | type | default | description |
//! |-----|------|---------|-------------|
//! | `dispatch.subsystem`  | string | `"varlist"`  | Subsystem name attached to every record |
//! | `logging.structured`  | bool   | `false`      | Route the `log` facade through slog |
//! | `logging.format`      | string | `"terminal"` | `terminal` or `json` |
//! | `logging.level`       | string | `"info"`     | Minimum level for the process logger |
//! | `logging.static_fields` | table | – | Extra key-values on every structured line |

mod env;
pub mod error;
mod file;


pub use env::EnvConfigProvider;
pub use error::ConfigError;
pub use file::{FileConfigProvider, FileFormat};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

/// Core configuration provider trait that all configuration sources must implement.
/// This trait is object-safe since it doesn't contain generic methods.
pub trait ConfigProvider: Debug + Send + Sync {
    /// Check if the configuration provider has a value for the given key.
    fn has(&self, key: &str) -> bool;

    /// Get the name of the configuration provider for debugging purposes.
    fn provider_name(&self) -> &str;

    /// Get a raw configuration value by key.
    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError>;
}

/// Typed access on top of [`ConfigProvider`].
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a configuration value by key and deserialize it to the specified type.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        deserialize(key, self.get_raw(key)?)
    }
}

impl<T: ConfigProvider> ConfigProviderExt for T {}

fn deserialize<T: DeserializeOwned>(key: &str, raw: Option<Value>) -> Result<Option<T>, ConfigError> {
    match raw {
        Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
            ConfigError::ParseError(format!("failed to deserialize '{key}': {e}"))
        }),
        None => Ok(None),
    }
}

/// Builder for the configuration system.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration provider. Later providers take precedence.
    pub fn with_provider<P: ConfigProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn build(self) -> Config {
        Config {
            providers: self.providers,
        }
    }
}

/// Holds all providers and resolves values across them.
#[derive(Debug, Clone, Default)]
pub struct Config {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        // Later providers override earlier ones
        for provider in self.providers.iter().rev() {
            if provider.has(key) {
                return provider.get_raw(key);
            }
        }
        Ok(None)
    }

    /// Get a configuration value from the highest-priority provider that has it.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        deserialize(key, self.get_raw(key)?)
    }

    /// Get a configuration value by key with a default fallback value.
    pub fn get_or_default<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, ConfigError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Names of the configured providers, lowest priority first.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// File provider overlaid with `VARLIST_` environment variables.
    pub fn from_file_and_env<P: AsRef<Path>>(file_path: P) -> Result<Self, ConfigError> {
        let provider = FileConfigProvider::new(file_path)?;
        Ok(Self::builder()
            .with_provider(provider)
            .with_provider(EnvConfigProvider::default())
            .build())
    }
}
