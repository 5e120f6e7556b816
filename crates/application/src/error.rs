//! Application error types

use std::fmt;

use apitest_domain::{AssertionFailure, DomainError, Format};
use thiserror::Error;

use crate::matcher::MatcherSyntaxError;
use crate::ports::FixtureStoreError;

/// Where in the input a decoder gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based line and column.
    LineColumn {
        /// Line number.
        line: usize,
        /// Column number.
        column: usize,
    },
    /// Byte offset from the start of the input.
    Offset(u64),
    /// The decoder did not report a position.
    Unknown,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineColumn { line, column } => write!(f, "line {line}, column {column}"),
            Self::Offset(offset) => write!(f, "byte {offset}"),
            Self::Unknown => f.write_str("unknown position"),
        }
    }
}

/// Bytes that are not well-formed for their declared format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed {format} at {location}: {cause}")]
pub struct DecodeError {
    /// Declared format.
    pub format: Format,
    /// Position of the failure.
    pub location: Location,
    /// Decoder message.
    pub cause: String,
}

impl DecodeError {
    /// Creates a decode error.
    pub fn new(format: Format, location: Location, cause: impl Into<String>) -> Self {
        Self {
            format,
            location,
            cause: cause.into(),
        }
    }
}

/// A document that cannot be written in the requested format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot encode document as {format}: {cause}")]
pub struct EncodeError {
    /// Requested format.
    pub format: Format,
    /// Reason.
    pub cause: String,
}

impl EncodeError {
    /// Creates an encode error.
    pub fn new(format: Format, cause: impl Into<String>) -> Self {
        Self {
            format,
            cause: cause.into(),
        }
    }
}

/// Application-level errors.
///
/// Everything except [`ApplicationError::Assertion`] is a test-setup bug
/// (malformed fixture, missing file, missing codec); `Assertion` means the
/// response itself was wrong.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A document could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// No codec is registered for the format.
    #[error("no codec registered for format {format}")]
    UnsupportedFormat {
        /// Requested format.
        format: Format,
    },

    /// The fixture does not exist in the requested format.
    #[error("fixture not found: {name} ({format})")]
    FixtureNotFound {
        /// Fixture name.
        name: String,
        /// Requested format.
        format: Format,
    },

    /// A fixture uses matcher syntax with an unknown type.
    #[error(transparent)]
    MatcherSyntax(#[from] MatcherSyntaxError),

    /// The fixture store failed for a reason other than absence.
    #[error("storage error: {0}")]
    Storage(#[source] FixtureStoreError),

    /// The actual response does not match the fixture.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
}

impl ApplicationError {
    /// True if the response was wrong, false if the test setup was.
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// Returns the assertion failure, if this is one.
    #[must_use]
    pub const fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Assertion(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
