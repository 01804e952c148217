//! Store-agnostic query expression tree produced by translation.

use std::fmt;

use crate::query::{CompareOp, Value};

/// Boolean query tree whose leaves reference storage paths.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryExpr {
    /// Matches every record; produced for absent or empty filters.
    MatchAll,
    /// Conjunction.
    And(Vec<QueryExpr>),
    /// Disjunction.
    Or(Vec<QueryExpr>),
    /// Comparison of the value at `path` against a literal.
    FieldOp {
        /// Storage path of the compared attribute.
        path: String,
        /// Comparison operator.
        op: CompareOp,
        /// Literal passed through from the filter.
        value: Value,
    },
    /// The attribute at `path` is set.
    FieldExists {
        /// Storage path of the attribute.
        path: String,
    },
}

impl QueryExpr {
    /// Builds a comparison leaf.
    pub fn field_op(path: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        QueryExpr::FieldOp {
            path: path.into(),
            op,
            value: value.into(),
        }
    }

    /// Builds a presence leaf.
    pub fn field_exists(path: impl Into<String>) -> Self {
        QueryExpr::FieldExists { path: path.into() }
    }

    /// Returns `true` for the match-all expression.
    pub fn is_match_all(&self) -> bool {
        matches!(self, QueryExpr::MatchAll)
    }

    /// Number of nodes in the tree, the root included.
    pub fn node_count(&self) -> usize {
        match self {
            QueryExpr::And(children) | QueryExpr::Or(children) => {
                1 + children.iter().map(QueryExpr::node_count).sum::<usize>()
            }
            _ => 1,
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpr::MatchAll => write!(f, "*"),
            QueryExpr::And(children) => write_group(f, "AND", children),
            QueryExpr::Or(children) => write_group(f, "OR", children),
            QueryExpr::FieldOp { path, op, value } => write!(f, "{path} {op} {value}"),
            QueryExpr::FieldExists { path } => write!(f, "{path} exists"),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, joiner: &str, children: &[QueryExpr]) -> fmt::Result {
    write!(f, "(")?;
    for (idx, child) in children.iter().enumerate() {
        if idx > 0 {
            write!(f, " {joiner} ")?;
        }
        write!(f, "{child}")?;
    }
    write!(f, ")")
}
