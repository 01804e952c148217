use docfilter::{
    query::wire, CompareOp, Filter, FilterCondition, QueryError, QueryExpr, QueryTranslator,
    TranslateError, Value, WireError,
};
use serde_json::json;

fn document(filter: Option<&Filter>) -> serde_json::Value {
    QueryTranslator::default()
        .translate_to_document(filter)
        .expect("filter should encode")
}

#[test]
fn absent_filter_is_empty_document() {
    assert_eq!(document(None), json!({}));
}

#[test]
fn equality_and_presence_documents() {
    let filter = Filter::new()
        .with(FilterCondition::eq("size", 5))
        .with(FilterCondition::exists("checksum"));
    assert_eq!(
        document(Some(&filter)),
        json!({"$and": [
            {"metadata.size.value": 5},
            {"metadata.checksum": {"$exists": true}}
        ]})
    );
}

#[test]
fn same_field_values_become_or_array() {
    let filter = Filter::new()
        .with(FilterCondition::eq("fmt", "pdf"))
        .with(FilterCondition::eq("fmt", "doc"));
    assert_eq!(
        document(Some(&filter)),
        json!({"$and": [{"$or": [
            {"metadata.fmt.value": "pdf"},
            {"metadata.fmt.value": "doc"}
        ]}]})
    );
}

#[test]
fn between_document_uses_range_operators() {
    let filter = Filter::new().with(FilterCondition::between(
        "size",
        (CompareOp::Gte, 10),
        (CompareOp::Lt, 100),
    ));
    assert_eq!(
        document(Some(&filter)),
        json!({"$and": [{"$and": [
            {"metadata.size.value": {"$gte": 10}},
            {"metadata.size.value": {"$lt": 100}}
        ]}]})
    );
}

#[test]
fn reserved_field_and_null_literal() {
    let filter = Filter::new()
        .with(FilterCondition::eq("uid", 7))
        .with(FilterCondition::eq("format", Value::Null));
    assert_eq!(
        document(Some(&filter)),
        json!({"$and": [
            {"uid": 7},
            {"metadata.format.value": null}
        ]})
    );
}

#[test]
fn filter_decoded_from_json_encodes() {
    let filter: Filter = serde_json::from_value(json!({"conditions": [
        {"kind": "eq", "field": "mimetype", "value": {"t": "String", "v": "application/pdf"}},
        {"kind": "between", "field": "pages",
         "low_op": "gt", "low_value": {"t": "Int", "v": 1},
         "high_op": "lte", "high_value": {"t": "Float", "v": 20.5}},
        {"kind": "eq", "field": "valid"}
    ]}))
    .expect("filter json");
    assert_eq!(
        document(Some(&filter)),
        json!({"$and": [
            {"metadata.mimetype.value": "application/pdf"},
            {"$and": [
                {"metadata.pages.value": {"$gt": 1}},
                {"metadata.pages.value": {"$lte": 20.5}}
            ]},
            {"metadata.valid": {"$exists": true}}
        ]})
    );
}

#[test]
fn errors_surface_with_codes() {
    let translator = QueryTranslator::default();
    let bad_bound = Filter::new().with(FilterCondition::between(
        "size",
        (CompareOp::Gt, 1),
        (CompareOp::Eq, 2),
    ));
    let err = translator
        .translate_to_document(Some(&bad_bound))
        .expect_err("eq bound");
    assert!(matches!(
        err,
        QueryError::Translate(TranslateError::InvalidOperator { .. })
    ));
    assert_eq!(err.code(), "InvalidOperator");

    let infinite = Filter::new().with(FilterCondition::eq("ratio", f64::INFINITY));
    let err = translator
        .translate_to_document(Some(&infinite))
        .expect_err("infinite float");
    assert_eq!(
        err,
        QueryError::Wire(WireError::NonFiniteFloat {
            path: "metadata.ratio.value".into()
        })
    );
}

#[test]
fn operator_keys_cover_bounds_only() {
    assert_eq!(wire::operator_key(CompareOp::Eq), None);
    assert_eq!(wire::operator_key(CompareOp::Gt), Some("$gt"));
    assert_eq!(wire::operator_key(CompareOp::Gte), Some("$gte"));
    assert_eq!(wire::operator_key(CompareOp::Lt), Some("$lt"));
    assert_eq!(wire::operator_key(CompareOp::Lte), Some("$lte"));
    assert_eq!(wire::encode(&QueryExpr::Or(vec![])).unwrap(), json!({"$or": []}));
}
