//! The structural matcher: expected-subset comparison of two datasets.
//!
//! Walk order is collections (by name), documents (by index), fields (by
//! expected field name), values (recursively). The first divergence wins;
//! its diagnostic is path-qualified with the collection name, document
//! index, and field name leading to it. A failed match is data
//! (`MatchResult { ok: false }`), not an error; errors are reserved for
//! malformed expectations (unknown operators, incomparable shapes).

use std::collections::HashMap;

use docunit_core::{Collection, Dataset, DocUnitError, Document, RawValue, TypedValue, ValueKind};

use crate::compare::compare_scalars;

/// The outcome of a dataset assertion. When `ok` is false, `message` reads
/// as a test-failure explanation pointing at the first divergence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub ok: bool,
    pub message: String,
}

impl MatchResult {
    pub(crate) fn matched(message: impl Into<String>) -> Self {
        MatchResult {
            ok: true,
            message: message.into(),
        }
    }

    pub(crate) fn failed(message: impl Into<String>) -> Self {
        MatchResult {
            ok: false,
            message: message.into(),
        }
    }
}

/// Assert that `actual` matches `expected` under subset semantics.
///
/// Fields absent from an expected document are not checked; collections and
/// documents must correspond exactly in count, documents by position.
pub fn assert_matches(
    expected: &Dataset,
    actual: &Dataset,
) -> Result<MatchResult, DocUnitError> {
    if expected.len() != actual.len() {
        return Ok(MatchResult::failed(format!(
            "Expected {} collections, but found {}.",
            expected.len(),
            actual.len()
        )));
    }

    let actual_by_name: HashMap<&str, &Collection> =
        actual.iter().map(|c| (c.name.as_str(), c)).collect();

    for expected_collection in expected {
        let name = expected_collection.name.as_str();
        let Some(actual_collection) = actual_by_name.get(name) else {
            return Ok(MatchResult::failed(format!(
                "Expected collection {name} to be present."
            )));
        };

        let result = match_collection(expected_collection, actual_collection)
            .map_err(|e| e.context(format!("Collection '{name}'")))?;
        if !result.ok {
            return Ok(MatchResult::failed(format!(
                "Collection '{name}': {}",
                result.message
            )));
        }
    }

    Ok(MatchResult::matched("Store state matches."))
}

fn match_collection(
    expected: &Collection,
    actual: &Collection,
) -> Result<MatchResult, DocUnitError> {
    if expected.documents.len() != actual.documents.len() {
        return Ok(MatchResult::failed(format!(
            "Expected {} documents in collection '{}' but got {}.",
            expected.documents.len(),
            expected.name,
            actual.documents.len()
        )));
    }

    for (index, (expected_doc, actual_doc)) in expected
        .documents
        .iter()
        .zip(actual.documents.iter())
        .enumerate()
    {
        let result = match_document(expected_doc, actual_doc)
            .map_err(|e| e.context(format!("Document array index of '{index}'")))?;
        if !result.ok {
            return Ok(MatchResult::failed(format!(
                "Document array index of '{index}': {}",
                result.message
            )));
        }
    }

    Ok(MatchResult::matched("Collections match."))
}

fn match_document(
    expected: &Document,
    actual: &Document,
) -> Result<MatchResult, DocUnitError> {
    for (field_name, expected_value) in expected.iter() {
        let Some(actual_value) = actual.get(field_name) else {
            return Ok(MatchResult::failed(format!(
                "Expected field name '{field_name}' to be present."
            )));
        };

        let result = match_value(expected_value, actual_value)
            .map_err(|e| e.context(format!("Field name '{field_name}'")))?;
        if !result.ok {
            return Ok(MatchResult::failed(format!(
                "Field name '{field_name}': {}",
                result.message
            )));
        }
    }

    Ok(MatchResult::matched("Documents match."))
}

fn match_value(
    expected: &TypedValue,
    actual: &TypedValue,
) -> Result<MatchResult, DocUnitError> {
    // Container shape is dictated by the expected side: an explicit
    // Document/Array kind or a container raw shape.
    let expected_is_document = expected.kind == Some(ValueKind::Document)
        || matches!(expected.raw, RawValue::Document(_));
    let expected_is_array =
        expected.kind == Some(ValueKind::Array) || matches!(expected.raw, RawValue::Array(_));

    if expected_is_document {
        let (RawValue::Document(expected_doc), RawValue::Document(actual_doc)) =
            (&expected.raw, &actual.raw)
        else {
            return Ok(MatchResult::failed(format!(
                "Expected a document but got '{}'.",
                actual.raw
            )));
        };
        return match_document(expected_doc, actual_doc);
    }

    if expected_is_array {
        let (RawValue::Array(expected_items), RawValue::Array(actual_items)) =
            (&expected.raw, &actual.raw)
        else {
            return Ok(MatchResult::failed(format!(
                "Expected an array but got '{}'.",
                actual.raw
            )));
        };
        return match_array(expected_items, actual_items);
    }

    compare_scalars(expected, actual)
}

fn match_array(
    expected: &[TypedValue],
    actual: &[TypedValue],
) -> Result<MatchResult, DocUnitError> {
    if expected.len() != actual.len() {
        return Ok(MatchResult::failed(format!(
            "Expected array size of '{}' but got '{}'.",
            expected.len(),
            actual.len()
        )));
    }

    for (expected_item, actual_item) in expected.iter().zip(actual.iter()) {
        let result = match_value(expected_item, actual_item)?;
        if !result.ok {
            return Ok(result);
        }
    }

    Ok(MatchResult::matched("Arrays match."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docunit_core::Operator;

    fn doc(fields: &[(&str, TypedValue)]) -> Document {
        fields
            .iter()
            .map(|(n, v)| (n.to_string(), v.clone()))
            .collect()
    }

    fn int(v: i64) -> TypedValue {
        TypedValue::untyped(RawValue::Int(v))
    }

    fn dataset(name: &str, documents: Vec<Document>) -> Dataset {
        vec![Collection {
            name: name.to_string(),
            documents,
        }]
    }

    #[test]
    fn empty_expected_document_matches_anything() {
        let expected = dataset("c", vec![Document::new()]);
        let actual = dataset("c", vec![doc(&[("x", int(1))])]);
        assert!(assert_matches(&expected, &actual).unwrap().ok);
    }

    #[test]
    fn subset_semantics_are_asymmetric() {
        let actual = dataset("c", vec![doc(&[("a", int(1)), ("b", int(2))])]);

        let expected = dataset("c", vec![doc(&[("a", int(1))])]);
        assert!(assert_matches(&expected, &actual).unwrap().ok);

        let expected = dataset("c", vec![doc(&[("a", int(1)), ("c", int(3))])]);
        let result = assert_matches(&expected, &actual).unwrap();
        assert!(!result.ok);
        assert!(
            result.message.contains("Expected field name 'c' to be present."),
            "got: {}",
            result.message
        );
    }

    #[test]
    fn collection_count_mismatch_message() {
        let expected = vec![
            Collection::new("a"),
            Collection::new("b"),
        ];
        let actual = vec![
            Collection::new("a"),
            Collection::new("b"),
            Collection::new("c"),
        ];
        let result = assert_matches(&expected, &actual).unwrap();
        assert!(!result.ok);
        assert_eq!(result.message, "Expected 2 collections, but found 3.");
    }

    #[test]
    fn missing_collection_name_fails() {
        let expected = dataset("users", vec![]);
        let actual = dataset("orders", vec![]);
        let result = assert_matches(&expected, &actual).unwrap();
        assert!(!result.ok);
        assert_eq!(result.message, "Expected collection users to be present.");
    }

    #[test]
    fn document_count_mismatch_cites_collection() {
        let expected = dataset("col1", vec![Document::new(), Document::new()]);
        let actual = dataset("col1", vec![Document::new()]);
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
    fn documents_compare_by_position() {
        let expected = dataset("c", vec![doc(&[("x", int(1))]), doc(&[("x", int(2))])]);
        let actual = dataset("c", vec![doc(&[("x", int(2))]), doc(&[("x", int(1))])]);
        let result = assert_matches(&expected, &actual).unwrap();
        assert!(!result.ok, "position swap must not match");
    }

    #[test]
    fn failure_message_is_path_qualified() {
        let expected = dataset("users", vec![doc(&[("age", int(30))])]);
        let actual = dataset("users", vec![doc(&[("age", int(31))])]);
        let result = assert_matches(&expected, &actual).unwrap();
        assert!(!result.ok);
        assert_eq!(
            result.message,
            "Collection 'users': Document array index of '0': Field name 'age': \
             Expected '30' but got '31'."
        );
    }

    #[test]
    fn nested_documents_recurse_with_subset_semantics() {
        let expected_inner = doc(&[("city", TypedValue::untyped(RawValue::String("berlin".into())))]);
        let actual_inner = doc(&[
            ("city", TypedValue::untyped(RawValue::String("berlin".into()))),
            ("zip", int(10115)),
        ]);
        let expected = dataset(
            "c",
            vec![doc(&[("addr", TypedValue::untyped(RawValue::Document(expected_inner)))])],
        );
        let actual = dataset(
            "c",
            vec![doc(&[("addr", TypedValue::untyped(RawValue::Document(actual_inner)))])],
        );
        assert!(assert_matches(&expected, &actual).unwrap().ok);
    }

    #[test]
    fn document_shape_mismatch() {
        let expected = dataset(
            "c",
            vec![doc(&[(
                "addr",
                TypedValue::untyped(RawValue::Document(Document::new())),
            )])],
        );
        let actual = dataset("c", vec![doc(&[("addr", int(5))])]);
        let result = assert_matches(&expected, &actual).unwrap();
        assert!(!result.ok);
        assert!(
            result.message.contains("Expected a document but got '5'."),
            "got: {}",
            result.message
        );
    }

    #[test]
    fn arrays_require_exact_length_then_align() {
        let expected = dataset(
            "c",
            vec![doc(&[(
                "tags",
                TypedValue::untyped(RawValue::Array(vec![int(1), int(2)])),
            )])],
        );
        let actual_short = dataset(
            "c",
            vec![doc(&[(
                "tags",
                TypedValue::untyped(RawValue::Array(vec![int(1)])),
            )])],
        );
        let result = assert_matches(&expected, &actual_short).unwrap();
        assert!(!result.ok);
        assert!(
            result.message.contains("Expected array size of '2' but got '1'."),
            "got: {}",
            result.message
        );
    }

    #[test]
    fn comparator_error_propagates_with_path_context() {
        let expected = dataset(
            "c",
            vec![doc(&[(
                "age",
                TypedValue::untyped(RawValue::Null).with_comparator(Operator::GreaterThan),
            )])],
        );
        let actual = dataset("c", vec![doc(&[("age", int(1))])]);
        match assert_matches(&expected, &actual) {
            Err(DocUnitError::Comparator(m)) => {
                assert!(m.contains("Collection 'c'"), "got: {m}");
                assert!(m.contains("Field name 'age'"), "got: {m}");
            }
            other => panic!("expected Comparator error, got {:?}", other),
        }
    }
}
