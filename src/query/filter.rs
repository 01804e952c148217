//! Filter model handed to the translator by the query-building layer.
//!
//! A [`Filter`] is an ordered list of [`FilterCondition`]s. The translator only
//! reads these values; it never mutates or validates them beyond what
//! translation itself requires.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::query::{errors::TranslateError, Value};

/// Comparison operator attached to a query leaf.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    /// Equality.
    Eq,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl CompareOp {
    /// Whether the operator may bound one side of a between condition.
    pub fn is_bound(self) -> bool {
        !matches!(self, CompareOp::Eq)
    }

    /// Canonical text form.
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => "gt",
            CompareOp::Gte => "gte",
            CompareOp::Lt => "lt",
            CompareOp::Lte => "lte",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Ok(CompareOp::Eq),
            ">" | "gt" => Ok(CompareOp::Gt),
            ">=" | "gte" => Ok(CompareOp::Gte),
            "<" | "lt" => Ok(CompareOp::Lt),
            "<=" | "lte" => Ok(CompareOp::Lte),
            _ => Err(TranslateError::UnknownOperator { op: s.to_owned() }),
        }
    }
}

/// Value slot of an equality condition.
///
/// `Absent` asks whether the field is set at all; `Present(Value::Null)` asks
/// for an explicit null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "Option<Value>")]
pub enum ConditionValue {
    /// No value supplied: presence check.
    #[default]
    Absent,
    /// Equality against this value.
    Present(Value),
}

impl From<Option<Value>> for ConditionValue {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => ConditionValue::Present(v),
            None => ConditionValue::Absent,
        }
    }
}

impl From<ConditionValue> for Option<Value> {
    fn from(value: ConditionValue) -> Self {
        match value {
            ConditionValue::Present(v) => Some(v),
            ConditionValue::Absent => None,
        }
    }
}

/// A single test against one field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterCondition {
    /// Equality or presence test.
    Eq {
        /// Field name as the caller knows it.
        field: String,
        /// Expected value, or `Absent` for a presence check.
        #[serde(default, skip_serializing_if = "ConditionValue::is_absent")]
        value: ConditionValue,
    },
    /// Range test with independent low and high operators.
    Between {
        /// Field name as the caller knows it.
        field: String,
        /// Operator applied to `low_value`.
        low_op: CompareOp,
        /// Lower bound literal.
        low_value: Value,
        /// Operator applied to `high_value`.
        high_op: CompareOp,
        /// Upper bound literal.
        high_value: Value,
    },
}

impl ConditionValue {
    /// Returns `true` for a presence check.
    pub fn is_absent(&self) -> bool {
        matches!(self, ConditionValue::Absent)
    }
}

impl FilterCondition {
    /// Equality condition against `value`.
    pub fn eq<F, V>(field: F, value: V) -> Self
    where
        F: Into<String>,
        V: Into<Value>,
    {
        FilterCondition::Eq {
            field: field.into(),
            value: ConditionValue::Present(value.into()),
        }
    }

    /// Presence condition: the field must be set.
    pub fn exists<F>(field: F) -> Self
    where
        F: Into<String>,
    {
        FilterCondition::Eq {
            field: field.into(),
            value: ConditionValue::Absent,
        }
    }

    /// Range condition with explicit operators on both bounds.
    pub fn between<F, L, H>(field: F, low: (CompareOp, L), high: (CompareOp, H)) -> Self
    where
        F: Into<String>,
        L: Into<Value>,
        H: Into<Value>,
    {
        FilterCondition::Between {
            field: field.into(),
            low_op: low.0,
            low_value: low.1.into(),
            high_op: high.0,
            high_value: high.1.into(),
        }
    }

    /// Field the condition targets.
    pub fn field(&self) -> &str {
        match self {
            FilterCondition::Eq { field, .. } | FilterCondition::Between { field, .. } => field,
        }
    }
}

/// Ordered set of conditions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Conditions in caller order.
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
}

impl Filter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a condition and returns the filter.
    pub fn with(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Conditions in caller order.
    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl FromIterator<FilterCondition> for Filter {
    fn from_iter<I: IntoIterator<Item = FilterCondition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}
