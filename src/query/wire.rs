//! Encoding of [`QueryExpr`] into the document store's JSON query syntax.
//!
//! Groups become `$and`/`$or` arrays, equality is written as a bare
//! `{path: value}` pair, range bounds use `$gt`/`$gte`/`$lt`/`$lte`, and
//! presence checks use `{"$exists": true}`. [`QueryExpr::MatchAll`] is the
//! empty document.

use serde_json::{Map, Number, Value as Json};

use crate::query::{errors::WireError, expr::QueryExpr, CompareOp, Value};

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Convenience alias for wire encoding results.
pub type WireResult<T> = std::result::Result<T, WireError>;

/// Encodes `expr` into a JSON query document.
pub fn encode(expr: &QueryExpr) -> WireResult<Json> {
    Ok(match expr {
        QueryExpr::MatchAll => Json::Object(Map::new()),
        QueryExpr::And(children) => group("$and", children)?,
        QueryExpr::Or(children) => group("$or", children)?,
        QueryExpr::FieldOp { path, op, value } => {
            let literal = literal_to_json(path, value)?;
            let condition = match operator_key(*op) {
                Some(key) => single(key, literal),
                None => literal,
            };
            single(path, condition)
        }
        QueryExpr::FieldExists { path } => single(path, single("$exists", Json::Bool(true))),
    })
}

/// Operator key for non-equality comparisons.
pub fn operator_key(op: CompareOp) -> Option<&'static str> {
    match op {
        CompareOp::Eq => None,
        CompareOp::Gt => Some("$gt"),
        CompareOp::Gte => Some("$gte"),
        CompareOp::Lt => Some("$lt"),
        CompareOp::Lte => Some("$lte"),
    }
}

fn group(key: &str, children: &[QueryExpr]) -> WireResult<Json> {
    let encoded = children.iter().map(encode).collect::<WireResult<Vec<_>>>()?;
    Ok(single(key, Json::Array(encoded)))
}

fn single(key: &str, value: Json) -> Json {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_owned(), value);
    Json::Object(map)
}

fn literal_to_json(path: &str, value: &Value) -> WireResult<Json> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(v) => Json::Bool(*v),
        Value::Int(v) => Json::Number((*v).into()),
        Value::Float(v) => Number::from_f64(*v)
            .map(Json::Number)
            .ok_or_else(|| WireError::NonFiniteFloat {
                path: path.to_owned(),
            })?,
        Value::String(v) => Json::String(v.clone()),
        Value::DateTime(ns) => {
            let millis = i64::try_from(ns.div_euclid(NANOS_PER_MILLI)).map_err(|_| {
                WireError::DateTimeOutOfRange {
                    path: path.to_owned(),
                }
            })?;
            single("$date", single("$numberLong", Json::String(millis.to_string())))
        }
    })
}
