// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Variable values and their human-readable debug rendering.
//!
//! A [`Value`] is exactly one of five kinds. The kind decides how the value
//! is rendered when it ends up in the appended variable block:
//!
//! | kind | rendering |
//! |------|-----------|
//! | [`Value::Text`] | verbatim |
//! | [`Value::Number`] | natural decimal form |
//! | [`Value::Bool`] | `true` / `false` |
//! | [`Value::Exception`] | `class: message`, then the trace |
//! | [`Value::Structured`] | recursive `print_r`-style dump |

use serde::Serialize;
use std::fmt;

/// A numeric variable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed integer
    Int(i64),
    /// Unsigned integer too large for `i64`
    UInt(u64),
    /// Floating point
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::UInt(n) => write!(f, "{n}"),
            Number::Float(n) => write!(f, "{n}"),
        }
    }
}

/// An error captured as a renderable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionInfo {
    /// Short type name of the error
    pub class: String,
    /// The error's display message
    pub message: String,
    /// Optional trace, one frame or cause per line
    pub trace: Option<String>,
}

impl ExceptionInfo {
    /// Create exception info without a trace.
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
            trace: None,
        }
    }

    /// Attach a trace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Capture an error, using its `source()` chain as the trace.
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        let full_name = std::any::type_name::<E>();
        let class = full_name
            .split('<')
            .next()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or(full_name);

        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        let info = Self::new(class, err.to_string());
        if causes.is_empty() {
            info
        } else {
            info.with_trace(causes.join("\n"))
        }
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class, self.message)?;
        if let Some(trace) = &self.trace {
            write!(f, "\n{trace}")?;
        }
        Ok(())
    }
}

/// A variable value supplied alongside a log message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Plain text
    Text(String),
    /// A number
    Number(Number),
    /// A boolean
    Bool(bool),
    /// An error with a message and optional trace
    Exception(ExceptionInfo),
    /// Any other shape: sequences, mappings, null
    Structured(serde_json::Value),
}

impl Value {
    /// Capture an error value.
    pub fn exception<E: std::error::Error>(err: &E) -> Self {
        Value::Exception(ExceptionInfo::from_error(err))
    }

    /// Serialize any value into its structured form.
    ///
    /// Scalars collapse onto the matching flat kind, so `structured(&5)` is
    /// a [`Value::Number`].
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Value::from)
    }

    /// Render the value for the appended variable block.
    pub fn render_debug(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Exception(info) => info.to_string(),
            Value::Structured(tree) => dump(tree),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_debug())
    }
}

/// Recursive, deterministic dump of a structured value.
///
/// Containers follow the `print_r` layout: a header line, an opening
/// parenthesis, one `[key] => value` row per entry and a closing
/// parenthesis. Nested containers are indented eight columns deeper.
pub fn dump(value: &serde_json::Value) -> String {
    let mut out = String::new();
    dump_into(value, 0, &mut out);
    out
}

fn dump_into(value: &serde_json::Value, indent: usize, out: &mut String) {
    use serde_json::Value as Json;

    match value {
        Json::Null => out.push_str("NULL"),
        Json::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Json::Number(number) => out.push_str(&number.to_string()),
        Json::String(text) => out.push_str(text),
        Json::Array(items) => dump_container(
            "Array",
            items.iter().enumerate().map(|(i, v)| (i.to_string(), v)),
            indent,
            out,
        ),
        Json::Object(map) => dump_container(
            "Object",
            map.iter().map(|(k, v)| (k.clone(), v)),
            indent,
            out,
        ),
    }
}

fn dump_container<'a, I>(header: &str, rows: I, indent: usize, out: &mut String)
where
    I: Iterator<Item = (String, &'a serde_json::Value)>,
{
    let pad = " ".repeat(indent);
    out.push_str(header);
    out.push('\n');
    out.push_str(&pad);
    out.push_str("(\n");
    for (key, child) in rows {
        out.push_str(&pad);
        out.push_str("    [");
        out.push_str(&key);
        out.push_str("] => ");
        dump_into(child, indent + 8, out);
        out.push('\n');
    }
    out.push_str(&pad);
    out.push_str(")\n");
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Number(Number::Int(value as i64))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                let wide = value as u64;
                match i64::try_from(wide) {
                    Ok(n) => Value::Number(Number::Int(n)),
                    Err(_) => Value::Number(Number::UInt(wide)),
                }
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<ExceptionInfo> for Value {
    fn from(value: ExceptionInfo) -> Self {
        Value::Exception(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::String(text) => Value::Text(text),
            Json::Bool(flag) => Value::Bool(flag),
            Json::Number(number) => {
                if let Some(n) = number.as_i64() {
                    Value::Number(Number::Int(n))
                } else if let Some(n) = number.as_u64() {
                    Value::Number(Number::UInt(n))
                } else {
                    Value::Number(Number::Float(number.as_f64().unwrap_or(f64::NAN)))
                }
            }
            other => Value::Structured(other),
        }
    }
}
