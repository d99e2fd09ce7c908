//! Schema-scoped merge tests.

use crate::common::{doc, fixtures, init_logging};
use docschema::{Field, SchemaBuilder};
use serde_json::json;

#[test]
fn test_nested_schema_merges_recursively() {
    init_logging();
    let inner = SchemaBuilder::new("Inner")
        .field("b", Field::integer())
        .field("c", Field::integer())
        .build()
        .expect("Failed to build Inner");
    let nested = SchemaBuilder::new("Nested")
        .field("a", Field::nested(&inner))
        .build()
        .expect("Failed to build Nested");

    let mut document = doc(json!({"a": {"b": 1}}));
    nested.merge(&mut document, &doc(json!({"a": {"c": 2}})));
    assert_eq!(document, doc(json!({"a": {"b": 1, "c": 2}})));
}

#[test]
fn test_plain_map_merges_one_level() {
    let plain = SchemaBuilder::new("Plain")
        .field("a", Field::map())
        .build()
        .expect("Failed to build Plain");

    let mut document = doc(json!({"a": {"b": 1}}));
    plain.merge(&mut document, &doc(json!({"a": {"c": 2}})));
    assert_eq!(document, doc(json!({"a": {"b": 1, "c": 2}})));

    let mut document = doc(json!({"a": {"b": {"x": 1}}}));
    plain.merge(&mut document, &doc(json!({"a": {"b": {"y": 2}}})));
    assert_eq!(document, doc(json!({"a": {"b": {"y": 2}}})));
}

#[test]
fn test_deep_nested_schema_merge() {
    let schema = fixtures::customer();
    let mut document = doc(json!({
        "name": "Ada",
        "address": {"city": "London", "street": "St James's Square"},
        "settings": {"theme": "dark"}
    }));
    let patch = doc(json!({
        "address": {"city": "Oslo", "planet": "Earth"},
        "settings": {"lang": "en"},
        "age": 36
    }));
    schema.merge(&mut document, &patch);

    assert_eq!(
        document,
        doc(json!({
            "name": "Ada",
            "age": 36,
            "address": {"city": "Oslo", "street": "St James's Square"},
            "settings": {"theme": "dark", "lang": "en"}
        }))
    );
}

#[test]
fn test_undeclared_patch_keys_are_ignored() {
    let schema = fixtures::person();
    let mut document = doc(json!({"name": "Ada", "legacy": true}));
    schema.merge(&mut document, &doc(json!({"legacy": false, "unknown": 1})));
    assert_eq!(document, doc(json!({"name": "Ada", "legacy": true})));
}

#[test]
fn test_null_existing_value_is_replaced() {
    let schema = fixtures::customer();
    let mut document = doc(json!({"name": "Ada", "address": null}));
    schema.merge(&mut document, &doc(json!({"address": {"city": "Oslo"}})));
    assert_eq!(document, doc(json!({"name": "Ada", "address": {"city": "Oslo"}})));
}

#[test]
fn test_scalars_and_lists_are_overwritten() {
    let schema = fixtures::person();
    let mut document = doc(json!({"name": "Ada", "tags": ["a", "b"]}));
    schema.merge(&mut document, &doc(json!({"name": "Grace", "tags": ["c"]})));
    assert_eq!(document, doc(json!({"name": "Grace", "tags": ["c"]})));
}
