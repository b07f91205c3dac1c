//! Error types for rnos.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RnosError`] - Top-level error type for all rnos operations
//! - [`InvokeError`] - Errors while resolving or invoking a path
//! - [`CallError`] - Errors raised by a callable itself
//! - [`PathError`] - Errors while building or parsing a path

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all rnos operations.
#[derive(Error, Debug)]
pub enum RnosError {
    /// Resolving or invoking a path failed.
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    /// A path could not be built.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Errors that can occur while resolving and invoking a path.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// A segment after the first did not resolve on the current cursor.
    ///
    /// `snapshot` is a JSON rendering of the cursor at the point of failure.
    #[error("I can't find property {segment} on object {snapshot}")]
    PropertyNotFound {
        /// The segment that failed to resolve.
        segment: String,
        /// The cursor the segment was looked up on.
        snapshot: String,
    },

    /// The fully resolved value is not callable.
    #[error("`{path}` resolved to a value of type {found}, which is not callable")]
    NotCallable {
        /// The rendered path.
        path: String,
        /// Type name of the resolved value.
        found: &'static str,
    },

    /// The resolved callable returned an error.
    #[error(transparent)]
    Call(#[from] CallError),
}

impl InvokeError {
    /// The missing segment, if this is a resolution failure.
    pub fn missing_segment(&self) -> Option<&str> {
        match self {
            InvokeError::PropertyNotFound { segment, .. } => Some(segment),
            _ => None,
        }
    }
}

/// Errors raised while a callable runs.
#[derive(Error, Debug)]
pub enum CallError {
    /// A positional argument could not be converted to the expected type.
    #[error("argument {index}: expected {expected}, found {found}")]
    Argument {
        /// Zero-based argument position.
        index: usize,
        /// Expected type description.
        expected: &'static str,
        /// Type name of the supplied value.
        found: &'static str,
    },

    /// The callable itself failed.
    #[error(transparent)]
    Thrown(BoxError),
}

impl CallError {
    /// Wrap any error raised by user code.
    pub fn thrown(err: impl Into<BoxError>) -> Self {
        CallError::Thrown(err.into())
    }
}

impl From<BoxError> for CallError {
    fn from(err: BoxError) -> Self {
        CallError::Thrown(err)
    }
}

/// Errors that can occur while building a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path needs at least the registry key.
    #[error("path must contain at least one segment")]
    Empty,

    /// A segment between separators was empty.
    #[error("empty segment at position {position}")]
    EmptySegment {
        /// Byte offset in the parsed input.
        position: usize,
    },

    /// A `[` was never closed, or a quoted key never terminated.
    #[error("unclosed bracket starting at position {position}")]
    Unclosed {
        /// Byte offset of the opening bracket.
        position: usize,
    },

    /// A closing `]` was followed by something other than `.` or `[`.
    #[error("unexpected character at position {position}")]
    Unexpected {
        /// Byte offset of the offending character.
        position: usize,
    },
}
