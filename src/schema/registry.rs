//! Schema registry for defining, managing, and accessing named schemas.
//!
//! Field tables are built once per schema by [`SchemaBuilder::build`]; the
//! registry is the catalogue that keeps the resulting schemas by name so they
//! can be looked up later, for example to be used as bases or nested models.

use super::definition::{Schema, SchemaBuilder};
use crate::error::{SchemaError, SchemaResult};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Catalogue of named schemas.
///
/// Every name is defined at most once; schema evolution means defining a
/// schema under a new name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
    order: Vec<String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema and register it under its name.
    pub fn define(&mut self, builder: SchemaBuilder) -> SchemaResult<Arc<Schema>> {
        let schema = builder.build()?;
        self.register(Arc::clone(&schema))?;
        Ok(schema)
    }

    /// Register an already built schema.
    pub fn register(&mut self, schema: Arc<Schema>) -> SchemaResult<()> {
        let name = schema.name().to_string();
        if self.schemas.contains_key(&name) {
            warn!("Rejecting redefinition of schema '{}'", name);
            return Err(SchemaError::DuplicateSchema { name });
        }
        info!(
            "Registered schema '{}' with {} field(s)",
            name,
            schema.fields().len()
        );
        self.order.push(name.clone());
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Get a specific schema by name.
    pub fn get_schema(&self, name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(name)
    }

    /// Get all registered schemas, in registration order.
    pub fn get_schemas(&self) -> Vec<&Arc<Schema>> {
        self.order
            .iter()
            .filter_map(|name| self.schemas.get(name))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
