//! In-place normalization tests.

use crate::common::{builders::PersonBuilder, doc, fixtures, init_logging};
use docschema::document::{Document, Value};
use docschema::{CleanOptions, Field, SchemaBuilder};
use serde_json::json;

#[test]
fn test_clean_fills_defaults() {
    init_logging();
    let schema = SchemaBuilder::new("Named")
        .field("name", Field::text().default_value("anon"))
        .build()
        .expect("Failed to build schema");

    let mut document = Document::new();
    schema.clean(&mut document, CleanOptions::default());
    assert_eq!(document, doc(json!({"name": "anon"})));
}

#[test]
fn test_clean_keeps_existing_values_over_defaults() {
    let schema = fixtures::customer();
    let mut document = PersonBuilder::new().with_field("tier", "g").build();
    schema.clean(&mut document, CleanOptions::default());

    assert_eq!(document["tier"], Value::from("g"));
    assert_eq!(document["active"], Value::Bool(true));
    assert_eq!(document["address"], Value::from(json!({"country": "NO"})));
}

#[test]
fn test_clean_removes_undefined() {
    let schema = fixtures::person();
    let mut document = doc(json!({"extra": 1}));
    schema.clean(&mut document, CleanOptions::default());
    assert_eq!(document, Document::new());
}

#[test]
fn test_clean_none_handling() {
    let schema = SchemaBuilder::new("Nullable")
        .field("x", Field::integer())
        .build()
        .expect("Failed to build schema");

    let mut removed = doc(json!({"x": null}));
    schema.clean(&mut removed, CleanOptions::default().allow_none(false));
    assert_eq!(removed, Document::new());

    let mut kept = doc(json!({"x": null}));
    schema.clean(&mut kept, CleanOptions::default().allow_none(true));
    assert_eq!(kept, doc(json!({"x": null})));
}

#[test]
fn test_clean_populate_none() {
    let schema = fixtures::person();
    let mut document = Document::new();
    schema.clean(&mut document, CleanOptions::new().populate_none(true));
    assert_eq!(
        document,
        doc(json!({"name": null, "age": null, "tags": null}))
    );
}

#[test]
fn test_nested_clean_ignores_caller_options() {
    let schema = fixtures::customer();
    let mut document = doc(json!({
        "name": "Ada",
        "address": {"city": "Oslo", "street": null, "floor": 3},
        "nickname": "ada"
    }));

    let options = CleanOptions::new()
        .set_default(false)
        .remove_undefined(false)
        .allow_none(true);
    schema.clean(&mut document, options);

    assert_eq!(
        document,
        doc(json!({
            "name": "Ada",
            "address": {"city": "Oslo", "country": "NO"},
            "nickname": "ada"
        }))
    );
}

#[test]
fn test_clean_leaves_non_map_nested_value_alone() {
    let schema = fixtures::customer();
    let mut document = doc(json!({"name": "Ada", "address": "Oslo"}));
    schema.clean(&mut document, CleanOptions::new().set_default(false));
    assert_eq!(document, doc(json!({"name": "Ada", "address": "Oslo"})));
}

#[test]
fn test_clean_of_default_document_is_idempotent() {
    let schema = fixtures::customer();
    let mut once = schema.build_default();
    schema.clean(&mut once, CleanOptions::default());
    let mut twice = once.clone();
    schema.clean(&mut twice, CleanOptions::default());
    assert_eq!(once, twice);
}
