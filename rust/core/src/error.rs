// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for OBJ scanning.
//!
//! Line numbers are 1-based and refer to the physical line on which the
//! offending logical line started.

use std::fmt;

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Slot within a `V/T/N` coordinate reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordSlot {
    Vertex,
    TexCoord,
    Normal,
}

impl fmt::Display for CoordSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordSlot::Vertex => "vertex",
            CoordSlot::TexCoord => "texture coordinate",
            CoordSlot::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while scanning an OBJ stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter expected to be a float is not a valid literal.
    #[error("line {line}: parameter {index} is not a valid number: {text:?}")]
    MalformedNumber {
        line: usize,
        index: usize,
        text: String,
    },

    /// A non-empty slot of a coordinate reference is not an integer.
    #[error("line {line}: parameter {index} has a malformed {slot} index: {text:?}")]
    MalformedIndex {
        line: usize,
        index: usize,
        slot: CoordSlot,
        text: String,
    },

    /// Parameter access past the end of the parameter list.
    #[error("line {line}: parameter {index} requested but only {count} present")]
    ParameterOutOfRange {
        line: usize,
        index: usize,
        count: usize,
    },

    /// Parameter access on a blank, comment or end-of-stream record.
    #[error("line {line}: record is not a command")]
    NotACommand { line: usize },

    /// A recognised command has the wrong number of parameters.
    #[error("line {line}: '{command}' expects {expected} parameters, found {found}")]
    InvalidArity {
        line: usize,
        command: &'static str,
        expected: &'static str,
        found: usize,
    },

    /// A physical line exceeded the configured length limit.
    #[error("line {line}: physical line exceeds {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    /// A handler callback rejected a record.
    #[error("handler error: {0}")]
    Handler(String),
}

impl Error {
    /// Create a handler error from any displayable message.
    pub fn handler(msg: impl Into<String>) -> Self {
        Error::Handler(msg.into())
    }

    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedNumber { line, .. }
            | Error::MalformedIndex { line, .. }
            | Error::ParameterOutOfRange { line, .. }
            | Error::NotACommand { line }
            | Error::InvalidArity { line, .. }
            | Error::LineTooLong { line, .. } => Some(*line),
            Error::Io(_) | Error::Handler(_) => None,
        }
    }
}
