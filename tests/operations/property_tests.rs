//! Property-based tests for the document operations.
//!
//! Uses proptest to generate numbers and documents and checks the
//! invariants that must hold for any input.

use crate::common::fixtures;
use docschema::document::{Document, Value};
use docschema::{CleanOptions, ErrorKind, Field, SchemaBuilder};
use proptest::prelude::*;

/// Strategy for flat documents mixing declared and undeclared keys
fn document_strategy() -> impl Strategy<Value = Document> {
    let key = prop::sample::select(vec!["name", "age", "tags", "extra", "other"]);
    let value = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        "[a-z]{0,8}".prop_map(Value::Text),
        prop::collection::vec("[a-z]{1,4}".prop_map(Value::Text), 0..3).prop_map(Value::List),
    ];
    prop::collection::btree_map(key.prop_map(str::to_string), value, 0..5)
}

proptest! {
    #[test]
    fn prop_range_is_half_open(min in -1000i64..1000, width in 1i64..1000, value in -3000i64..3000) {
        let max = min + width;
        let field = Field::integer().min(min).max(max).build().unwrap();
        let error = field.get_error(&Value::Integer(value));
        if value >= min && value < max {
            prop_assert!(error.is_none());
        } else {
            prop_assert_eq!(error.map(|e| e.kind), Some(ErrorKind::ValueOutOfRange));
        }
    }

    #[test]
    fn prop_clean_is_idempotent(document in document_strategy()) {
        let schema = fixtures::person();
        let mut once = document.clone();
        schema.clean(&mut once, CleanOptions::default());
        let mut twice = once.clone();
        schema.clean(&mut twice, CleanOptions::default());
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.keys().all(|key| schema.fields().contains(key)));
        prop_assert!(once.values().all(|value| !value.is_null()));
    }

    #[test]
    fn prop_merge_never_touches_undeclared_keys(
        document in document_strategy(),
        patch in document_strategy(),
    ) {
        let schema = fixtures::person();
        let mut merged = document.clone();
        schema.merge(&mut merged, &patch);
        for key in ["extra", "other"] {
            prop_assert_eq!(merged.get(key), document.get(key));
        }
    }

    #[test]
    fn prop_is_valid_agrees_with_error_list(document in document_strategy()) {
        let schema = fixtures::person();
        prop_assert_eq!(schema.is_valid(&document), schema.document_errors(&document).is_empty());
    }

    #[test]
    fn prop_validation_is_restartable(document in document_strategy()) {
        let schema = SchemaBuilder::new("Loose")
            .field("age", Field::integer().max(100))
            .field("name", Field::text().regex("[a-m]"))
            .build()
            .unwrap();
        let first: Vec<_> = schema.validate_errors(&document).collect();
        let second: Vec<_> = schema.validate_errors(&document).collect();
        prop_assert_eq!(first, second);
    }
}
