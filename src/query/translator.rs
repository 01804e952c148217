#![forbid(unsafe_code)]

//! Filter to query-expression translation.
//!
//! Conditions are grouped by field in the order fields first appear. A group
//! with one condition contributes that condition directly; larger groups are
//! OR-combined. Every group then becomes one child of a top-level AND, so the
//! output shape depends only on the input sequence and never on hash order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::TranslatorConfig;
use crate::query::{
    errors::{QueryError, TranslateError},
    expr::QueryExpr,
    filter::{CompareOp, ConditionValue, Filter, FilterCondition},
    path::{FieldPathMapper, PathKind},
    wire, Value,
};

/// Convenience alias for translation results.
pub type TranslateResult<T> = std::result::Result<T, TranslateError>;

type FieldGroup<'a> = SmallVec<[&'a FilterCondition; 2]>;

/// Stateless translator from [`Filter`] to [`QueryExpr`].
///
/// Holds only the immutable path mapping, so one instance can be shared by
/// reference across threads.
#[derive(Clone, Debug, Default)]
pub struct QueryTranslator {
    paths: FieldPathMapper,
}

impl QueryTranslator {
    /// Creates a translator using the supplied configuration.
    pub fn new(config: &TranslatorConfig) -> Self {
        Self::with_mapper(FieldPathMapper::new(config))
    }

    /// Creates a translator around an existing path mapper.
    pub fn with_mapper(paths: FieldPathMapper) -> Self {
        Self { paths }
    }

    /// Path mapper used for leaves.
    pub fn paths(&self) -> &FieldPathMapper {
        &self.paths
    }

    /// Translates an optional filter. `None` yields [`QueryExpr::MatchAll`].
    pub fn translate(&self, filter: Option<&Filter>) -> TranslateResult<QueryExpr> {
        match filter {
            Some(filter) => self.translate_conditions(filter.conditions()),
            None => Ok(QueryExpr::MatchAll),
        }
    }

    /// Translates a borrowed condition sequence.
    pub fn translate_conditions(
        &self,
        conditions: &[FilterCondition],
    ) -> TranslateResult<QueryExpr> {
        let groups = group_by_field(conditions);
        if groups.is_empty() {
            return Ok(QueryExpr::MatchAll);
        }
        let mut and = Vec::with_capacity(groups.len());
        for (field, group) in &groups {
            trace!(field, conditions = group.len(), "translating field group");
            and.push(self.translate_group(field, group)?);
        }
        debug!(
            conditions = conditions.len(),
            fields = groups.len(),
            "translated filter"
        );
        Ok(QueryExpr::And(and))
    }

    /// Translates and encodes into the store's JSON query document.
    pub fn translate_to_document(
        &self,
        filter: Option<&Filter>,
    ) -> Result<serde_json::Value, QueryError> {
        let expr = self.translate(filter)?;
        Ok(wire::encode(&expr)?)
    }

    fn translate_group(&self, field: &str, group: &[&FilterCondition]) -> TranslateResult<QueryExpr> {
        match group {
            [] => {
                warn!(field, "field group came out empty");
                Err(TranslateError::InternalConsistency {
                    field: field.to_owned(),
                })
            }
            [single] => self.translate_condition(single),
            many => many
                .iter()
                .map(|cond| self.translate_condition(cond))
                .collect::<TranslateResult<Vec<_>>>()
                .map(QueryExpr::Or),
        }
    }

    fn translate_condition(&self, condition: &FilterCondition) -> TranslateResult<QueryExpr> {
        match condition {
            FilterCondition::Eq {
                field,
                value: ConditionValue::Present(value),
            } => Ok(QueryExpr::FieldOp {
                path: self.paths.path(field, PathKind::Value),
                op: CompareOp::Eq,
                value: value.clone(),
            }),
            FilterCondition::Eq {
                field,
                value: ConditionValue::Absent,
            } => Ok(QueryExpr::FieldExists {
                path: self.paths.path(field, PathKind::Presence),
            }),
            FilterCondition::Between {
                field,
                low_op,
                low_value,
                high_op,
                high_value,
            } => {
                let path = self.paths.path(field, PathKind::Value);
                let low = bound(field, &path, *low_op, low_value)?;
                let high = bound(field, &path, *high_op, high_value)?;
                Ok(QueryExpr::And(vec![low, high]))
            }
        }
    }
}

fn bound(field: &str, path: &str, op: CompareOp, value: &Value) -> TranslateResult<QueryExpr> {
    if !op.is_bound() {
        warn!(field, %op, "rejecting between bound operator");
        return Err(TranslateError::InvalidOperator {
            field: field.to_owned(),
            op,
        });
    }
    Ok(QueryExpr::FieldOp {
        path: path.to_owned(),
        op,
        value: value.clone(),
    })
}

/// Groups conditions by field, keeping first-seen field order.
fn group_by_field(conditions: &[FilterCondition]) -> Vec<(&str, FieldGroup<'_>)> {
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(&str, FieldGroup<'_>)> = Vec::new();
    for cond in conditions {
        let field = cond.field();
        let slot = *slots.entry(field).or_insert_with(|| {
            groups.push((field, SmallVec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(cond);
    }
    groups
}
