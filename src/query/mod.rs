#![forbid(unsafe_code)]

//! Filter translation into document-store query expressions.
//!
//! The pipeline is deliberately short: a caller-built [`Filter`] goes through
//! [`QueryTranslator::translate`] to produce a [`QueryExpr`], which the
//! persistence layer either walks itself or hands to [`wire::encode`] for the
//! store's JSON syntax.

/// Structured translation, encoding, and umbrella errors.
pub mod errors;

/// Output expression tree.
pub mod expr;

/// Filter model read by the translator.
pub mod filter;

/// Field-name to storage-path mapping.
pub mod path;

/// Grouping and composition of conditions.
pub mod translator;

/// Scalar literals.
pub mod value;

/// JSON query document encoding.
pub mod wire;

pub use errors::{QueryError, TranslateError, WireError};
pub use expr::QueryExpr;
pub use filter::{CompareOp, ConditionValue, Filter, FilterCondition};
pub use path::{FieldPathMapper, PathKind};
pub use translator::{QueryTranslator, TranslateResult};
pub use value::Value;
