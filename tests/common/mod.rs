//! Common test utilities for schema and document testing.
//!
//! This module provides macros, builders, and fixtures shared by the
//! integration tests.

use docschema::document::{Document, Value};
use std::sync::Once;

pub mod fixtures;

static LOGGING: Once = Once::new();

/// Route `log` output through env_logger, honouring `RUST_LOG`
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .is_test(true)
            .try_init();
    });
}

/// Build a document from a JSON literal
pub fn doc(value: serde_json::Value) -> Document {
    match Value::from(value) {
        Value::Map(map) => map,
        other => panic!("Expected a JSON object, got {}", other.type_name()),
    }
}

/// Assert that an error list contains an error of `kind` at `path`
#[macro_export]
macro_rules! assert_has_error {
    ($errors:expr, $path:expr, $kind:expr) => {
        assert!(
            $errors.iter().any(|e| e.path == $path && e.kind == $kind),
            "Expected {:?} error at '{}', got: {:?}",
            $kind,
            $path,
            $errors
        );
    };
}

/// Assert that an error list contains no error at `path`
#[macro_export]
macro_rules! assert_no_error_at {
    ($errors:expr, $path:expr) => {
        assert!(
            !$errors.iter().any(|e| e.path == $path),
            "Expected no error at '{}', got: {:?}",
            $path,
            $errors
        );
    };
}
