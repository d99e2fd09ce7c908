//! Nested schema and inheritance validation tests.

use crate::common::{builders::PersonBuilder, doc, fixtures};
use docschema::document::Value;
use docschema::schema::{FieldKind, SchemaRegistry};
use docschema::{ErrorKind, Field, SchemaBuilder, SchemaError};
use serde_json::json;

#[test]
fn test_nested_errors_are_prefixed_with_parent_path() {
    let schema = fixtures::customer();
    let document = PersonBuilder::new()
        .with_field("address", Value::from(json!({"postcode": "x"})))
        .build();

    let errors = schema.document_errors(&document);
    assert_has_error!(errors, "address.city", ErrorKind::Required);
    assert_has_error!(errors, "address.postcode", ErrorKind::Value);
    assert_no_error_at!(errors, "city");
}

#[test]
fn test_deeply_nested_paths() {
    let mut registry = SchemaRegistry::new();
    let leaf = registry
        .define(SchemaBuilder::new("Leaf").field("value", Field::integer().required()))
        .expect("Failed to define Leaf");
    let middle = registry
        .define(SchemaBuilder::new("Middle").field("leaf", Field::nested(&leaf)))
        .expect("Failed to define Middle");
    let root = registry
        .define(SchemaBuilder::new("Root").field("middle", Field::nested(&middle)))
        .expect("Failed to define Root");

    let errors = root.document_errors(&doc(json!({"middle": {"leaf": {}}})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "middle.leaf.value");
    assert_eq!(errors[0].kind, ErrorKind::Required);

    let errors = root.document_errors(&doc(json!({"middle": {"leaf": {"value": "1"}}})));
    assert_eq!(errors[0].path, "middle.leaf.value");
    assert_eq!(errors[0].kind, ErrorKind::Type);
}

#[test]
fn test_nested_field_own_error_precedes_nested_errors() {
    let inner = SchemaBuilder::new("Inner")
        .field("x", Field::integer().required())
        .build()
        .expect("Failed to build Inner");
    let outer = SchemaBuilder::new("Outer")
        .field("inner", Field::nested(&inner).choices([Value::from(json!({"x": 1}))]))
        .field("after", Field::text().required())
        .build()
        .expect("Failed to build Outer");

    let errors = outer.document_errors(&doc(json!({"inner": {"y": 2}})));
    let paths: Vec<_> = errors.iter().map(|e| (e.path.as_str(), e.kind)).collect();
    assert_eq!(
        paths,
        [
            ("inner", ErrorKind::Value),
            ("inner.x", ErrorKind::Required),
            ("after", ErrorKind::Required),
        ]
    );
}

#[test]
fn test_inherited_fields_are_validated() {
    let schema = fixtures::customer();
    let errors = schema.document_errors(&doc(json!({"tier": "s"})));
    assert_has_error!(errors, "name", ErrorKind::Required);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_later_base_overrides_earlier_base() {
    let strict = SchemaBuilder::new("Strict")
        .field("code", Field::text().required())
        .build()
        .expect("Failed to build Strict");
    let loose = SchemaBuilder::new("Loose")
        .field("code", Field::integer())
        .build()
        .expect("Failed to build Loose");

    let strict_then_loose = SchemaBuilder::new("A")
        .extends(&strict)
        .extends(&loose)
        .build()
        .expect("Failed to build A");
    assert!(strict_then_loose.is_valid(&doc(json!({}))));
    assert!(matches!(
        strict_then_loose.field("code").map(|f| f.kind()),
        Some(FieldKind::Integer { .. })
    ));

    let loose_then_strict = SchemaBuilder::new("B")
        .extends(&loose)
        .extends(&strict)
        .build()
        .expect("Failed to build B");
    assert!(!loose_then_strict.is_valid(&doc(json!({}))));
}

#[test]
fn test_local_field_overrides_inherited_one() {
    let base = fixtures::person();
    let relaxed = SchemaBuilder::new("Anonymous")
        .extends(&base)
        .field("name", Field::text())
        .build()
        .expect("Failed to build Anonymous");

    assert!(relaxed.is_valid(&doc(json!({}))));
    assert!(!base.is_valid(&doc(json!({}))));
    assert_eq!(
        relaxed.fields().names().collect::<Vec<_>>(),
        ["name", "age", "tags"]
    );
}

#[test]
fn test_registry_rejects_redefinition() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(fixtures::person())
        .expect("Failed to register Person");
    let error = registry
        .register(fixtures::person())
        .expect_err("Redefinition must fail");
    assert!(matches!(error, SchemaError::DuplicateSchema { ref name } if name == "Person"));
    assert_eq!(registry.len(), 1);
}
