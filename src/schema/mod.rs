//! Schema definitions and the document operations that consume them.
//!
//! This module provides field definitions, schema construction with
//! inheritance and extensions, the schema registry, and the four document
//! operations: validation, default building, cleaning and merging.
//!
//! # Key Types
//!
//! - [`Field`] / [`FieldBuilder`] - Declaring individual fields
//! - [`FieldDefinition`] - Validation and default contract of one field
//! - [`Schema`] / [`SchemaBuilder`] - Immutable field tables and their construction
//! - [`SchemaExtension`] - Cross-cutting augmentation applied at construction
//! - [`SchemaRegistry`] - Catalogue of named schemas
//!
//! # Examples
//!
//! ```rust
//! use docschema::schema::{CleanOptions, Field, SchemaBuilder};
//! use docschema::document::Value;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), docschema::SchemaError> {
//! let profile = SchemaBuilder::new("Profile")
//!     .field("name", Field::text().default_value("anon"))
//!     .field("age", Field::integer().min(0).max(150))
//!     .build()?;
//!
//! let mut doc = Value::from(json!({"extra": 1})).into_map().unwrap();
//! profile.clean(&mut doc, CleanOptions::default());
//! assert_eq!(Value::Map(doc), Value::from(json!({"name": "anon"})));
//! # Ok(())
//! # }
//! ```

pub mod definition;
pub mod extension;
pub mod field;
pub mod operations;
pub mod registry;
pub mod types;
pub mod validation;


// Re-export the main types for convenience
pub use definition::{Annotations, FieldTable, Schema, SchemaBuilder};
pub use extension::{ExtensionContext, SchemaExtension};
pub use field::{Field, FieldBuilder, IntoFieldDefinition};
pub use operations::CleanOptions;
pub use registry::SchemaRegistry;
pub use types::{
    Choices, DefaultGenerator, DefaultValue, FieldDefinition, FieldKind, Number, NumericRange,
};
pub use validation::ValidationErrors;
