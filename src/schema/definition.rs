//! Schema definitions and their one-time construction.
//!
//! A [`Schema`] is built once by [`SchemaBuilder::build`] and then shared
//! behind an [`Arc`]. Construction merges the field tables of the base
//! schemas in declaration order (a later base overrides an earlier one on a
//! name collision), overlays the locally declared fields, and finally runs
//! the extension providers in order.

use super::extension::{ExtensionContext, SchemaExtension};
use super::field::IntoFieldDefinition;
use super::types::FieldDefinition;
use crate::document::Value;
use crate::error::{SchemaError, SchemaResult};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Ordered mapping from field name to definition.
///
/// Iteration follows declaration order: inherited fields first, in the order
/// they were first declared, then new local fields. Overriding a field keeps
/// its original position.
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    entries: Vec<(String, FieldDefinition)>,
    index: HashMap<String, usize>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any same-named field in place
    pub fn insert(&mut self, name: impl Into<String>, definition: FieldDefinition) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = definition,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, definition));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldDefinition)> {
        self.entries.iter().map(|(name, definition)| (name, definition))
    }

    pub(crate) fn entry_at(&self, position: usize) -> Option<(&str, &FieldDefinition)> {
        self.entries
            .get(position)
            .map(|(name, definition)| (name.as_str(), definition))
    }
}

/// Per-field metadata attached by declarations or extensions.
pub type Annotations = BTreeMap<String, BTreeMap<String, Value>>;

/// An immutable document schema.
///
/// Holds the finalized field table, the names of the schemas it was derived
/// from, the extensions applied while it was built, and the annotation side
/// table extensions use for extra per-field metadata.
pub struct Schema {
    pub(crate) name: String,
    pub(crate) fields: FieldTable,
    pub(crate) bases: Vec<String>,
    pub(crate) extensions: Vec<Arc<dyn SchemaExtension>>,
    pub(crate) annotations: Annotations,
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Names of the direct base schemas, in declaration order
    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    /// Extensions applied to this schema, in application order
    pub fn extensions(&self) -> &[Arc<dyn SchemaExtension>] {
        &self.extensions
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|extension| extension.name() == name)
    }

    pub fn annotations(&self, field: &str) -> Option<&BTreeMap<String, Value>> {
        self.annotations.get(field)
    }

    pub fn annotation(&self, field: &str, key: &str) -> Option<&Value> {
        self.annotations.get(field).and_then(|entries| entries.get(key))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extensions: Vec<&str> = self.extensions.iter().map(|e| e.name()).collect();
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields.names().collect::<Vec<_>>())
            .field("bases", &self.bases)
            .field("extensions", &extensions)
            .finish()
    }
}

/// Builder for a [`Schema`].
///
/// ```rust
/// use docschema::schema::{Field, SchemaBuilder};
///
/// # fn main() -> Result<(), docschema::SchemaError> {
/// let named = SchemaBuilder::new("Named")
///     .field("name", Field::text().required())
///     .build()?;
/// let person = SchemaBuilder::new("Person")
///     .extends(&named)
///     .field("age", Field::integer().min(0).max(150))
///     .build()?;
/// assert_eq!(person.fields().names().collect::<Vec<_>>(), ["name", "age"]);
/// # Ok(())
/// # }
/// ```
pub struct SchemaBuilder {
    name: String,
    bases: Vec<Arc<Schema>>,
    fields: Vec<(String, SchemaResult<FieldDefinition>)>,
    extensions: Vec<Arc<dyn SchemaExtension>>,
    annotations: Vec<(String, String, Value)>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
            extensions: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Inherit the fields and extensions of `base`
    pub fn extends(mut self, base: &Arc<Schema>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    /// Declare a field on this schema
    pub fn field(mut self, name: impl Into<String>, field: impl IntoFieldDefinition) -> Self {
        self.fields.push((name.into(), field.into_field_definition()));
        self
    }

    pub fn extension(self, extension: impl SchemaExtension + 'static) -> Self {
        self.shared_extension(Arc::new(extension))
    }

    /// Add an extension provider that may be shared with other schemas
    pub fn shared_extension(mut self, extension: Arc<dyn SchemaExtension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Attach metadata to a field of the finished schema
    pub fn annotate(
        mut self,
        field: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.annotations
            .push((field.into(), key.into(), value.into()));
        self
    }

    pub fn build(self) -> SchemaResult<Arc<Schema>> {
        debug!(
            "Building schema '{}' from {} base(s) and {} declared field(s)",
            self.name,
            self.bases.len(),
            self.fields.len()
        );

        let mut declared = FieldTable::new();
        for (name, definition) in self.fields {
            declared.insert(name, definition?);
        }

        let mut fields = FieldTable::new();
        let mut annotations = Annotations::new();
        for base in &self.bases {
            for (name, definition) in base.fields.iter() {
                fields.insert(name.clone(), definition.clone());
            }
            for (field, entries) in &base.annotations {
                annotations
                    .entry(field.clone())
                    .or_default()
                    .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        for (name, definition) in declared.iter() {
            fields.insert(name.clone(), definition.clone());
        }

        let mut schema = Schema {
            name: self.name,
            fields,
            bases: self.bases.iter().map(|base| base.name.clone()).collect(),
            extensions: Vec::new(),
            annotations,
        };

        for (field, key, value) in self.annotations {
            if !schema.fields.contains(&field) {
                return Err(SchemaError::unknown_field(&schema.name, field));
            }
            schema.annotations.entry(field).or_default().insert(key, value);
        }

        let mut providers: Vec<Arc<dyn SchemaExtension>> = Vec::new();
        let inherited = self.bases.iter().flat_map(|base| base.extensions.iter());
        for extension in inherited.chain(self.extensions.iter()) {
            if !providers.iter().any(|seen| Arc::ptr_eq(seen, extension)) {
                providers.push(Arc::clone(extension));
            }
        }

        for extension in providers {
            debug!(
                "Applying extension '{}' to schema '{}'",
                extension.name(),
                schema.name
            );
            let mut context = ExtensionContext::new(&mut schema, &self.bases, &declared);
            extension.apply(&mut context)?;
            schema.extensions.push(extension);
        }

        Ok(Arc::new(schema))
    }
}
