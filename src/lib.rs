// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! varlist - log message preparation and severity dispatch
//!
//! A log call carries a message template and a set of named variables.
//! Variables whose label starts with a placeholder sigil (`@`, `%`, `!`,
//! `:`) are substituted into the template by the host's formatter. Every
//! other variable is debug context: varlist renders it into a readable
//! `label: value` block and splices that block into the message through a
//! synthetic `@var_list` / `!var_list` placeholder.
//!
//! # Core Pieces
//!
//! - **Preparation**: [`prepare`] turns `(message, vars)` into the message
//!   and embedded variables handed to the formatter and the log sink.
//! - **Formatting**: [`format_string`] composes a final string through any
//!   [`Substitute`] implementation, such as [`PlaceholderSubstitute`].
//! - **Dispatch**: [`Dispatcher`] offers `debug`/`info`/`notice`/`warning`/
//!   `error` and forwards records to an injected [`LogSink`].
//!
//! ```rust
//! use varlist::{PlaceholderSubstitute, format_string, vars};
//!
//! let text = format_string(
//!     &PlaceholderSubstitute,
//!     "Deleted @type",
//!     &vars! { "@type" => "page", "nid" => 12 },
//!     false,
//!     true,
//! )
//! .unwrap();
//! assert_eq!(text, "Deleted page\n\nnid: 12\n\n");
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logging;
pub mod prepare;
pub mod severity;
pub mod sigil;
pub mod sink;
pub mod value;
pub mod variables;

// Re-export key types at the crate root for convenience
pub use config::{Config, ConfigError, ConfigProvider, ConfigProviderExt};
pub use dispatch::{DispatchSettings, Dispatcher};
pub use error::Error;
pub use format::{PlaceholderSubstitute, Substitute, format_string};
pub use logging::config::LoggingConfig;
pub use prepare::{HTML_VAR_LIST, Prepared, TEXT_VAR_LIST, prepare};
pub use severity::{ParseSeverityError, Severity};
pub use sigil::Sigil;
pub use sink::{FacadeSink, LogRecord, LogSink, MemorySink, SlogSink};
pub use value::{ExceptionInfo, Number, Value};
pub use variables::Variables;
