// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Message preparation.
//!
//! [`prepare`] splits caller variables into two groups. Labels that start
//! with a [`Sigil`] are placeholders and pass straight through. Every other
//! variable is rendered into a readable `label: value` block which is
//! spliced into the message through a single synthetic placeholder.

use crate::error::Error;
use crate::sigil::Sigil;
use crate::value::Value;
use crate::variables::Variables;

/// Synthetic placeholder used when preparing for HTML output.
pub const HTML_VAR_LIST: &str = "@var_list";

/// Synthetic placeholder used when preparing for plain text output.
pub const TEXT_VAR_LIST: &str = "!var_list";

/// A prepared message and the variables to embed into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub message: String,
    pub vars: Variables,
}

impl Prepared {
    /// Split into `(message, vars)`.
    pub fn into_parts(self) -> (String, Variables) {
        (self.message, self.vars)
    }
}

/// Prepare `message` and `vars` for substitution and logging.
///
/// With `append_extra_vars` set, non-placeholder variables are appended to
/// the message as a block under [`HTML_VAR_LIST`] (wrapped in `<pre>`) or
/// [`TEXT_VAR_LIST`]. Without it they are dropped. An empty `vars` returns
/// the message untouched whatever the flags.
///
/// # Errors
///
/// [`Error::InvalidLabel`] if any label is empty.
pub fn prepare(
    message: &str,
    vars: &Variables,
    html: bool,
    append_extra_vars: bool,
) -> Result<Prepared, Error> {
    if vars.is_empty() {
        return Ok(Prepared {
            message: message.to_string(),
            vars: Variables::new(),
        });
    }

    let mut message = message.to_string();
    let list_key = if append_extra_vars {
        if html {
            message.push_str("\n<pre>");
            message.push_str(HTML_VAR_LIST);
            message.push_str("</pre>");
            Some(HTML_VAR_LIST)
        } else {
            message.push_str("\n\n");
            message.push_str(TEXT_VAR_LIST);
            message.push('\n');
            Some(TEXT_VAR_LIST)
        }
    } else {
        None
    };

    let mut embedded = Variables::new();
    let mut block = String::new();
    for (label, value) in vars.iter() {
        if Sigil::of(label)?.is_some() {
            embedded.insert(label, value.clone());
        } else if list_key.is_some() {
            block.push_str(label);
            block.push_str(": ");
            block.push_str(&value.render_debug());
            block.push('\n');
        }
    }

    if let Some(key) = list_key {
        embedded.insert(key, Value::Text(block));
    }

    Ok(Prepared {
        message,
        vars: embedded,
    })
}
