// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Final string composition.
//!
//! [`format_string`] runs [`prepare`] and hands the result to a
//! [`Substitute`] implementation exactly once. The host framework normally
//! supplies the substituter; [`PlaceholderSubstitute`] is a self-contained
//! one that follows the usual sigil conventions:
//!
//! | sigil | replacement |
//! |-------|-------------|
//! | `@` | HTML-escaped |
//! | `%` | HTML-escaped, wrapped in `<em class="placeholder">` |
//! | `!` | verbatim |
//! | `:` | dangerous URL schemes stripped, then HTML-escaped |

use crate::error::Error;
use crate::prepare::prepare;
use crate::sigil::Sigil;
use crate::variables::Variables;

/// Placeholder substitution collaborator.
pub trait Substitute {
    /// Replace placeholders in `template` with the values from `vars`.
    fn substitute(&self, template: &str, vars: &Variables) -> Result<String, Error>;
}

impl<F> Substitute for F
where
    F: Fn(&str, &Variables) -> Result<String, Error>,
{
    fn substitute(&self, template: &str, vars: &Variables) -> Result<String, Error> {
        self(template, vars)
    }
}

/// Prepare `message` and `vars`, then substitute them into a final string.
pub fn format_string<S: Substitute + ?Sized>(
    substitute: &S,
    message: &str,
    vars: &Variables,
    html: bool,
    append_extra_vars: bool,
) -> Result<String, Error> {
    let prepared = prepare(message, vars, html, append_extra_vars)?;
    substitute.substitute(&prepared.message, &prepared.vars)
}

/// URL schemes kept by the `:` placeholder.
const ALLOWED_SCHEMES: &[&str] = &[
    "ftp", "http", "https", "irc", "mailto", "news", "nntp", "rtsp", "sftp", "ssh", "tel",
    "telnet", "webcal",
];

/// Built-in substituter implementing the standard sigil escaping rules.
///
/// Keys are matched longest first in a single left-to-right pass, so
/// `@var_list` wins over `@var` and replacement text is never rescanned.
/// Labels without a sigil are replaced with their raw value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSubstitute;

impl PlaceholderSubstitute {
    pub fn new() -> Self {
        Self
    }
}

impl Substitute for PlaceholderSubstitute {
    fn substitute(&self, template: &str, vars: &Variables) -> Result<String, Error> {
        let mut replacements = Vec::with_capacity(vars.len());
        for (label, value) in vars.iter() {
            let raw = value.render_debug();
            let replacement = match Sigil::of(label)? {
                Some(Sigil::At) => escape_html(&raw),
                Some(Sigil::Percent) => {
                    format!("<em class=\"placeholder\">{}</em>", escape_html(&raw))
                }
                Some(Sigil::Colon) => escape_html(&strip_dangerous_protocols(&raw)),
                Some(Sigil::Bang) | None => raw,
            };
            replacements.push((label, replacement));
        }
        // Stable sort keeps insertion order between equal-length keys.
        replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        'scan: while !rest.is_empty() {
            for (key, replacement) in &replacements {
                if let Some(tail) = rest.strip_prefix(*key) {
                    out.push_str(replacement);
                    rest = tail;
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
        Ok(out)
    }
}

/// Escape the five HTML special characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove URL schemes outside the allow-list, repeatedly, so nested
/// prefixes such as `javascript:javascript:` are also removed.
pub fn strip_dangerous_protocols(uri: &str) -> String {
    let mut current = uri;
    loop {
        let Some(colon) = current.find(':') else {
            break;
        };
        let scheme = &current[..colon];
        if scheme.contains(|c: char| matches!(c, '/' | '?' | '#')) {
            break;
        }
        let lowered = scheme.to_ascii_lowercase();
        if ALLOWED_SCHEMES.contains(&lowered.as_str()) {
            break;
        }
        current = &current[colon + 1..];
    }
    current.to_string()
}
