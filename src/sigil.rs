// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placeholder sigils.

use crate::error::Error;
use std::fmt;

/// Leading character that marks a label as a template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `@` – HTML-escaped substitution
    At,
    /// `%` – escaped and emphasised as a placeholder
    Percent,
    /// `!` – inserted verbatim
    Bang,
    /// `:` – escaped and URL-filtered
    Colon,
}

impl Sigil {
    /// Every recognised sigil.
    pub const ALL: [Sigil; 4] = [Sigil::At, Sigil::Percent, Sigil::Bang, Sigil::Colon];

    /// Map a character onto a sigil.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '@' => Some(Sigil::At),
            '%' => Some(Sigil::Percent),
            '!' => Some(Sigil::Bang),
            ':' => Some(Sigil::Colon),
            _ => None,
        }
    }

    /// Detect the sigil of a variable label.
    ///
    /// Returns `Ok(None)` for a plain label and [`Error::InvalidLabel`] for
    /// an empty one.
    pub fn of(label: &str) -> Result<Option<Self>, Error> {
        label
            .chars()
            .next()
            .map(Self::from_char)
            .ok_or(Error::InvalidLabel)
    }

    /// The sigil character.
    pub fn as_char(self) -> char {
        match self {
            Sigil::At => '@',
            Sigil::Percent => '%',
            Sigil::Bang => '!',
            Sigil::Colon => ':',
        }
    }
}

impl fmt::Display for Sigil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
