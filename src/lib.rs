//! Declarative schemas for nested documents.
//!
//! Declare the expected shape of a document once, then validate instances
//! against it, build default-filled instances, clean instances to match the
//! schema, and merge patches into existing instances under the schema's
//! guidance. Everything is synchronous and in-memory.
//!
//! # Core Components
//!
//! - [`Schema`] - Immutable field table plus the document operations
//! - [`SchemaBuilder`] / [`Field`] - Declaration surface
//! - [`SchemaRegistry`] - Catalogue of named schemas
//! - [`document`] - The generic document shape and schema-unaware utilities
//!
//! # Quick Start
//!
//! ```rust
//! use docschema::{ErrorKind, Field, SchemaBuilder};
//! use docschema::document::Value;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), docschema::SchemaError> {
//! let person = SchemaBuilder::new("Person")
//!     .field("name", Field::text().required())
//!     .field("age", Field::integer().min(0).max(150))
//!     .field("tags", Field::list_of(Field::text()))
//!     .build()?;
//!
//! let doc = Value::from(json!({"age": 200})).into_map().unwrap();
//! assert!(!person.is_valid(&doc));
//!
//! let errors = person.document_errors(&doc);
//! assert_eq!(errors[0].path, "name");
//! assert_eq!(errors[0].kind, ErrorKind::Required);
//! assert_eq!(errors[1].kind, ErrorKind::ValueOutOfRange);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod schema;

// Re-export commonly used types for convenience
pub use document::{Document, Value};
pub use error::{ErrorKind, FieldError, SchemaError, SchemaResult, ValidationError};
pub use schema::{
    CleanOptions, Field, FieldDefinition, Schema, SchemaBuilder, SchemaExtension, SchemaRegistry,
};
