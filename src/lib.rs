//! Translation of structure-agnostic filters into document-store queries.
//!
//! ```
//! use docfilter::{CompareOp, Filter, FilterCondition, QueryTranslator};
//!
//! let filter = Filter::new()
//!     .with(FilterCondition::eq("format", "pdf"))
//!     .with(FilterCondition::between("size", (CompareOp::Gte, 10), (CompareOp::Lt, 100)));
//! let doc = QueryTranslator::default()
//!     .translate_to_document(Some(&filter))
//!     .unwrap();
//! assert_eq!(
//!     doc.to_string(),
//!     r#"{"$and":[{"metadata.format.value":"pdf"},{"$and":[{"metadata.size.value":{"$gte":10}},{"metadata.size.value":{"$lt":100}}]}]}"#
//! );
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod query;

pub use config::{ConfigError, TranslatorConfig};
pub use query::{
    CompareOp, ConditionValue, FieldPathMapper, Filter, FilterCondition, PathKind, QueryError,
    QueryExpr, QueryTranslator, TranslateError, Value, WireError,
};
