// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for message preparation and dispatch.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while preparing, formatting or dispatching a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A variable label was empty, so its sigil could not be inspected.
    #[error("invalid variable label: labels must not be empty")]
    InvalidLabel,

    /// The log sink rejected or failed to write a record.
    #[error("log sink error: {0}")]
    Sink(String),

    /// The substitution collaborator failed to produce a final string.
    #[error("substitution error: {0}")]
    Substitution(String),
}

impl Error {
    /// Create a new sink error.
    pub fn sink<M: fmt::Display>(message: M) -> Self {
        Self::Sink(message.to_string())
    }

    /// Create a new substitution error.
    pub fn substitution<M: fmt::Display>(message: M) -> Self {
        Self::Substitution(message.to_string())
    }
}
