//! Error types for lexing, tree building and tree access.
//!
//! Every failure is fatal for the parse that raised it: there is no partial
//! result and no resynchronization.

use thiserror::Error;

use crate::span::Location;
use crate::token::TokenKind;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes, one per `Error` variant.
///
/// Cheap to copy and compare; used by the test fixtures to name expected
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// Input byte that starts no token
    UnexpectedCharacter = 0,
    /// `}` with no open scope
    UnbalancedBraces,
    /// Statement or list with the wrong number of words
    MalformedStatement,
    /// `{` or `}` inside a comma-separated list
    UnexpectedTokenInList,
    /// End of input inside a comma-separated list
    UnterminatedList,
    /// End of input with scopes still open (strict mode)
    UnterminatedScope,
    /// Path component collides with the reserved `_value` key
    ReservedName,
    /// Accessor lookup miss
    NoSuchChild,
    /// Reading the input failed
    IoFailure,
}

impl ErrorCode {
    /// Get a human-readable message for this error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnbalancedBraces => "unbalanced braces",
            Self::MalformedStatement => "malformed statement",
            Self::UnexpectedTokenInList => "unexpected token in list",
            Self::UnterminatedList => "unterminated list",
            Self::UnterminatedScope => "unterminated scope",
            Self::ReservedName => "reserved name",
            Self::NoSuchChild => "no such child",
            Self::IoFailure => "i/o failure",
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected character {ch:?} at {location}")]
    UnexpectedCharacter { ch: char, location: Location },

    #[error("unbalanced braces: '}}' at {location} closes no open scope")]
    UnbalancedBraces { location: Location },

    /// `words` were available where at least `width` (plus a path, for
    /// lists) were needed.
    #[error("malformed statement at {location}: {words} word(s) for values of width {width}")]
    MalformedStatement {
        location: Location,
        words: usize,
        width: usize,
    },

    #[error("unexpected {found} in comma-separated list at {location}")]
    UnexpectedTokenInList { found: TokenKind, location: Location },

    #[error("comma-separated list starting at {location} is never terminated by ';'")]
    UnterminatedList { location: Location },

    #[error("end of input with {depth} scope(s) still open")]
    UnterminatedScope { depth: usize },

    #[error("'_value' at {location} is reserved and cannot name a scope")]
    ReservedName { location: Location },

    #[error("no such child: {name:?}")]
    NoSuchChild { name: String },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnexpectedCharacter { .. } => ErrorCode::UnexpectedCharacter,
            Self::UnbalancedBraces { .. } => ErrorCode::UnbalancedBraces,
            Self::MalformedStatement { .. } => ErrorCode::MalformedStatement,
            Self::UnexpectedTokenInList { .. } => ErrorCode::UnexpectedTokenInList,
            Self::UnterminatedList { .. } => ErrorCode::UnterminatedList,
            Self::UnterminatedScope { .. } => ErrorCode::UnterminatedScope,
            Self::ReservedName { .. } => ErrorCode::ReservedName,
            Self::NoSuchChild { .. } => ErrorCode::NoSuchChild,
            Self::Io(_) => ErrorCode::IoFailure,
        }
    }

    /// Source location of the error, when it points into the input.
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::UnexpectedCharacter { location, .. }
            | Self::UnbalancedBraces { location }
            | Self::MalformedStatement { location, .. }
            | Self::UnexpectedTokenInList { location, .. }
            | Self::UnterminatedList { location }
            | Self::ReservedName { location } => Some(*location),
            Self::UnterminatedScope { .. } | Self::NoSuchChild { .. } | Self::Io(_) => None,
        }
    }
}
