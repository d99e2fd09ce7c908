//! Extension hook for cross-cutting schema augmentation.
//!
//! An extension provider is handed to [`SchemaBuilder`] and applied exactly
//! once to every schema built with it, after the field table is final.
//! Schemas derived from an extended schema inherit its providers, so a
//! provider also runs for each derived schema. Providers are applied in
//! order: inherited ones first (in base order), then those added directly,
//! each provider at most once per schema.
//!
//! ```rust
//! use docschema::schema::{ExtensionContext, Field, SchemaBuilder, SchemaExtension};
//! use docschema::SchemaResult;
//!
//! struct Timestamps;
//!
//! impl SchemaExtension for Timestamps {
//!     fn name(&self) -> &str {
//!         "timestamps"
//!     }
//!
//!     fn apply(&self, context: &mut ExtensionContext<'_>) -> SchemaResult<()> {
//!         context.insert_field("created_at", Field::timestamp())?;
//!         context.annotate("created_at", "managed", true)
//!     }
//! }
//!
//! # fn main() -> Result<(), docschema::SchemaError> {
//! let note = SchemaBuilder::new("Note")
//!     .field("body", Field::text())
//!     .extension(Timestamps)
//!     .build()?;
//! assert!(note.field("created_at").is_some());
//! # Ok(())
//! # }
//! ```
//!
//! [`SchemaBuilder`]: super::definition::SchemaBuilder

use super::definition::{FieldTable, Schema};
use super::field::IntoFieldDefinition;
use crate::document::Value;
use crate::error::{SchemaError, SchemaResult};
use std::sync::Arc;

/// A cross-cutting augmentation applied when a schema is constructed.
pub trait SchemaExtension: Send + Sync {
    /// Name used in diagnostics and by [`Schema::has_extension`]
    fn name(&self) -> &str;

    /// Augment the schema under construction.
    ///
    /// Returning an error aborts construction of the schema.
    fn apply(&self, context: &mut ExtensionContext<'_>) -> SchemaResult<()>;
}

/// The schema under construction, as seen by an extension.
pub struct ExtensionContext<'a> {
    schema: &'a mut Schema,
    bases: &'a [Arc<Schema>],
    declared: &'a FieldTable,
}

impl<'a> ExtensionContext<'a> {
    pub(crate) fn new(
        schema: &'a mut Schema,
        bases: &'a [Arc<Schema>],
        declared: &'a FieldTable,
    ) -> Self {
        Self {
            schema,
            bases,
            declared,
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn bases(&self) -> &[Arc<Schema>] {
        self.bases
    }

    /// Fields declared directly on the schema, without inherited ones
    pub fn declared_fields(&self) -> &FieldTable {
        self.declared
    }

    /// The finalized field table, including anything added by earlier
    /// extensions
    pub fn fields(&self) -> &FieldTable {
        &self.schema.fields
    }

    /// Add a field, or replace a same-named one
    pub fn insert_field(
        &mut self,
        name: impl Into<String>,
        field: impl IntoFieldDefinition,
    ) -> SchemaResult<()> {
        self.schema
            .fields
            .insert(name.into(), field.into_field_definition()?);
        Ok(())
    }

    /// Attach metadata to an existing field
    pub fn annotate(
        &mut self,
        field: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> SchemaResult<()> {
        let field = field.into();
        if !self.schema.fields.contains(&field) {
            return Err(SchemaError::unknown_field(&self.schema.name, field));
        }
        self.schema
            .annotations
            .entry(field)
            .or_default()
            .insert(key.into(), value.into());
        Ok(())
    }

    pub fn annotation(&self, field: &str, key: &str) -> Option<&Value> {
        self.schema.annotation(field, key)
    }
}
