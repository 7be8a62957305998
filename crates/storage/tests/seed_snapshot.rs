//! End-to-end seed/snapshot flows through the in-memory store.

use std::collections::BTreeSet;

use docunit_core::{CodecConfig, DocUnitError, RawValue, ValueKind};
use docunit_interchange::parse_dataset;
use docunit_match::assert_matches;
use docunit_storage::{
    clear_store, export, seed, snapshot, MemoryStore, StoreHandle, WireValue,
};
use serde_json::json;

fn config() -> CodecConfig {
    CodecConfig::default()
}

fn parse(value: serde_json::Value) -> docunit_core::Dataset {
    parse_dataset(&value.to_string(), &config()).unwrap()
}

#[test]
fn seed_then_snapshot_then_assert_round_trip() {
    let dataset = parse(json!([{
        "collectionName": "users",
        "documents": [
            {"name": "ada", "age": 36, "active": true},
            {"name": "lin", "age": 29, "active": false}
        ]
    }, {
        "collectionName": "orders",
        "documents": [
            {"sku": "A-1", "qty": 2}
        ]
    }]));

    let mut store = MemoryStore::new();
    seed(&dataset, &mut store).unwrap();

    let actual = snapshot(&store, None).unwrap();
    let result = assert_matches(&dataset, &actual).unwrap();
    assert!(result.ok, "round trip must match: {}", result.message);
}

#[test]
fn snapshot_restriction_selects_named_collections() {
    let dataset = parse(json!([
        {"collectionName": "a", "documents": [{"x": 1}]},
        {"collectionName": "b", "documents": [{"y": 2}]}
    ]));
    let mut store = MemoryStore::new();
    seed(&dataset, &mut store).unwrap();

    let only_b: BTreeSet<String> = ["b".to_string()].into();
    let actual = snapshot(&store, Some(&only_b)).unwrap();
    assert_eq!(actual.len(), 1);
    assert_eq!(actual[0].name, "b");
}

#[test]
fn snapshot_of_unknown_collection_is_configuration_error() {
    let store = MemoryStore::new();
    let missing: BTreeSet<String> = ["ghost".to_string()].into();
    match snapshot(&store, Some(&missing)) {
        Err(DocUnitError::Configuration(m)) => {
            assert!(m.contains("'ghost'"), "got: {m}");
        }
        other => panic!("expected Configuration error, got {:?}", other),
    }
}

#[test]
fn seeding_a_bad_date_fails_before_any_insert_of_that_collection() {
    let dataset = parse(json!([{
        "collectionName": "events",
        "documents": [
            {"when": {"$$DATE_TIME": "2019-09-21T17:45:23.418Z"}},
            {"when": {"$$DATE_TIME": "yesterday"}}
        ]
    }]));
    let mut store = MemoryStore::new();
    match seed(&dataset, &mut store) {
        Err(DocUnitError::TypeConversion(m)) => {
            assert!(m.contains("Collection 'events'"), "got: {m}");
            assert!(m.contains("Document array index of '1'"), "got: {m}");
            assert!(m.contains("Field name 'when'"), "got: {m}");
        }
        other => panic!("expected TypeConversion, got {:?}", other),
    }
    // The collection with the bad document was never created.
    assert!(store.list_collection_names().unwrap().is_empty());
}

#[test]
fn clear_store_drops_everything() {
    let dataset = parse(json!([
        {"collectionName": "a", "documents": [{"x": 1}]},
        {"collectionName": "b", "documents": []}
    ]));
    let mut store = MemoryStore::new();
    seed(&dataset, &mut store).unwrap();
    clear_store(&mut store).unwrap();
    assert!(store.list_collection_names().unwrap().is_empty());
}

#[test]
fn export_preserves_object_id_and_date_time_tags() {
    let mut store = MemoryStore::new();
    store
        .insert_many(
            "events",
            vec![vec![
                (
                    "_id".to_string(),
                    WireValue::ObjectId([
                        0x5d, 0x86, 0x66, 0x59, 0x71, 0x4f, 0xd2, 0xbc, 0x95, 0xa6, 0x8e, 0xd2,
                    ]),
                ),
                ("when".to_string(), WireValue::DateTime(1_569_087_923_418)),
                ("count".to_string(), WireValue::Int64(3)),
            ]],
        )
        .unwrap();

    let text = export(&store, None, &config()).unwrap();
    assert!(text.contains("\"$$OBJECT_ID\""), "got: {text}");
    assert!(text.contains("5d866659714fd2bc95a68ed2"), "got: {text}");
    assert!(text.contains("\"$$DATE_TIME\""), "got: {text}");
    assert!(text.contains("2019-09-21T17:45:23.418Z"), "got: {text}");
    // Int64 is not in the default preserve set; it exports as a plain number.
    assert!(!text.contains("$$INT64"), "got: {text}");

    // The exported dataset matches a fresh snapshot of the same store.
    let expected = parse_dataset(&text, &config()).unwrap();
    let actual = snapshot(&store, None).unwrap();
    let result = assert_matches(&expected, &actual).unwrap();
    assert!(result.ok, "export must match its source: {}", result.message);
}

#[test]
fn export_then_reseed_reproduces_the_store() {
    let mut store = MemoryStore::new();
    store
        .insert_many(
            "events",
            vec![vec![
                ("when".to_string(), WireValue::DateTime(1_569_087_923_418)),
                ("tag".to_string(), WireValue::String("first".to_string())),
            ]],
        )
        .unwrap();

    let text = export(&store, None, &config()).unwrap();
    let dataset = parse_dataset(&text, &config()).unwrap();

    let mut fresh = MemoryStore::new();
    seed(&dataset, &mut fresh).unwrap();
    assert_eq!(
        fresh.find_all("events").unwrap(),
        store.find_all("events").unwrap()
    );
}

#[test]
fn typed_snapshot_kinds_survive_into_matching() {
    let mut store = MemoryStore::new();
    store
        .insert_many(
            "nums",
            vec![vec![("n".to_string(), WireValue::Int32(7))]],
        )
        .unwrap();

    let actual = snapshot(&store, None).unwrap();
    assert_eq!(actual[0].documents[0].get("n").unwrap().kind, Some(ValueKind::Int32));
    assert_eq!(actual[0].documents[0].get("n").unwrap().raw, RawValue::Int(7));

    // An expected INT64 tag must NOT match an actual INT32.
    let expected = parse(json!([{
        "collectionName": "nums",
        "documents": [{"n": {"$$INT64": 7}}]
    }]));
    let result = assert_matches(&expected, &actual).unwrap();
    assert!(!result.ok);

    // The untyped expectation matches on value alone.
    let expected = parse(json!([{
        "collectionName": "nums",
        "documents": [{"n": 7}]
    }]));
    assert!(assert_matches(&expected, &actual).unwrap().ok);
}
