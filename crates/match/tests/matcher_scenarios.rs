//! End-to-end matcher scenarios driven by dataset JSON, the way a test
//! author writes expected files.

use docunit_core::{CodecConfig, Dataset, DocUnitError};
use docunit_interchange::parse_dataset;
use docunit_match::assert_matches;
use serde_json::json;

fn dataset(value: serde_json::Value) -> Dataset {
    parse_dataset(&value.to_string(), &CodecConfig::default()).unwrap()
}

fn people(age_value: serde_json::Value) -> serde_json::Value {
    json!([{
        "collectionName": "people",
        "documents": [{"age": age_value}]
    }])
}

#[test]
fn greater_than_scenarios() {
    let expected = dataset(people(json!({"$$": 5, "comparator": ">"})));
    // expected 5 > actual: holds for 3, not for 5 or 7.
    assert!(assert_matches(&expected, &dataset(people(json!(3)))).unwrap().ok);
    assert!(!assert_matches(&expected, &dataset(people(json!(5)))).unwrap().ok);
    assert!(!assert_matches(&expected, &dataset(people(json!(7)))).unwrap().ok);
}

#[test]
fn less_than_or_equal_scenarios() {
    let expected = dataset(people(json!({"$$": 5, "comparator": "<="})));
    assert!(assert_matches(&expected, &dataset(people(json!(5)))).unwrap().ok);
    assert!(assert_matches(&expected, &dataset(people(json!(6)))).unwrap().ok);
    assert!(!assert_matches(&expected, &dataset(people(json!(4)))).unwrap().ok);
}

#[test]
fn null_equality_scenarios() {
    let expected = dataset(people(json!(null)));
    assert!(assert_matches(&expected, &dataset(people(json!(null)))).unwrap().ok);
    assert!(!assert_matches(&expected, &dataset(people(json!(1)))).unwrap().ok);
}

#[test]
fn null_with_relational_operator_raises() {
    let expected = dataset(people(json!({"$$": null, "comparator": ">"})));
    for actual in [json!(1), json!(null)] {
        match assert_matches(&expected, &dataset(people(actual))) {
            Err(DocUnitError::Comparator(_)) => {}
            other => panic!("expected Comparator error, got {:?}", other),
        }
    }
}

#[test]
fn collection_count_end_to_end() {
    let expected = dataset(json!([
        {"collectionName": "a", "documents": []},
        {"collectionName": "b", "documents": []}
    ]));
    let actual = dataset(json!([
        {"collectionName": "a", "documents": []},
        {"collectionName": "b", "documents": []},
        {"collectionName": "c", "documents": []}
    ]));
    let result = assert_matches(&expected, &actual).unwrap();
    assert!(!result.ok);
    assert_eq!(result.message, "Expected 2 collections, but found 3.");
}

#[test]
fn document_count_end_to_end() {
    let expected = dataset(json!([
        {"collectionName": "col1", "documents": [{"a": 1}, {"a": 2}]}
    ]));
    let actual = dataset(json!([
        {"collectionName": "col1", "documents": [{"a": 1}]}
    ]));
    let result = assert_matches(&expected, &actual).unwrap();
    assert!(!result.ok);
    assert!(
        result
            .message
            .contains("Expected 2 documents in collection 'col1' but got 1."),
        "got: {}",
        result.message
    );
}

#[test]
fn typed_expected_field_checks_detected_kind() {
    // The expected side demands an INT64; the actual side is untyped JSON,
    // which never carries a detected kind, so the match must fail.
    let expected = dataset(people(json!({"$$INT64": 5})));
    let result = assert_matches(&expected, &dataset(people(json!(5)))).unwrap();
    assert!(!result.ok);
    assert!(result.message.contains("INT64"), "got: {}", result.message);
}

#[test]
fn subset_match_with_nested_structures() {
    let expected = dataset(json!([{
        "collectionName": "users",
        "documents": [{
            "name": "ada",
            "langs": ["en", "fr"],
            "addr": {"city": "london"}
        }]
    }]));
    let actual = dataset(json!([{
        "collectionName": "users",
        "documents": [{
            "name": "ada",
            "langs": ["en", "fr"],
            "addr": {"city": "london", "zip": "n1"},
            "extra": true
        }]
    }]));
    assert!(assert_matches(&expected, &actual).unwrap().ok);
}
