#![forbid(unsafe_code)]

use std::fmt;

use thiserror::Error;

use crate::query::CompareOp;

/// Structured errors emitted while translating a filter.
///
/// Callers can match on the variant or forward [`TranslateError::code`] to
/// clients that only need a stable identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A between bound used an operator other than gt/gte/lt/lte.
    #[error("between() on '{field}' cannot use operator '{op}' as a bound")]
    InvalidOperator {
        /// Field the between condition targets.
        field: String,
        /// Rejected operator.
        op: CompareOp,
    },
    /// Operator text did not name any known comparison.
    #[error("unknown comparison operator '{op}'")]
    UnknownOperator {
        /// Text supplied by the caller.
        op: String,
    },
    /// Grouping produced a field with no conditions attached.
    #[error("field group '{field}' produced no conditions")]
    InternalConsistency {
        /// Field whose group came out empty.
        field: String,
    },
}

impl TranslateError {
    /// Returns a machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            TranslateError::InvalidOperator { .. } => "InvalidOperator",
            TranslateError::UnknownOperator { .. } => "UnknownOperator",
            TranslateError::InternalConsistency { .. } => "InternalConsistency",
        }
    }
}

/// Errors raised while encoding an expression into the store's JSON syntax.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Float literal is NaN/∞ and has no JSON representation.
    #[error("float literal for '{path}' must be finite")]
    NonFiniteFloat {
        /// Storage path the literal was bound to.
        path: String,
    },
    /// Datetime literal does not fit the store's 64-bit millisecond range.
    #[error("datetime literal for '{path}' must fit within signed 64-bit milliseconds")]
    DateTimeOutOfRange {
        /// Storage path the literal was bound to.
        path: String,
    },
}

impl WireError {
    /// Returns a machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            WireError::NonFiniteFloat { .. } => "NonFiniteFloat",
            WireError::DateTimeOutOfRange { .. } => "DateTimeOutOfRange",
        }
    }
}

/// Umbrella error for the one-shot translate-and-encode path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Translation rejected the filter.
    #[error(transparent)]
    Translate(#[from] TranslateError),
    /// Encoding rejected a literal in the translated expression.
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl QueryError {
    /// Returns the code of the wrapped error.
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Translate(err) => err.code(),
            QueryError::Wire(err) => err.code(),
        }
    }
}

/// Convenience wrapper that formats errors with their codes.
pub struct ErrorWithCode<'a>(pub &'a QueryError);

impl fmt::Display for ErrorWithCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.0.code(), self.0)
    }
}
