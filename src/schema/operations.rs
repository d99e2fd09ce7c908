//! Default building, cleaning and merging of documents.

use super::definition::Schema;
use crate::document::{Document, Value};
use log::trace;

/// Options for [`Schema::clean`].
///
/// The default sets missing defaults, removes undeclared keys, removes
/// null values and does not add null placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    /// Fill absent fields that have a default
    pub set_default: bool,
    /// Remove keys the schema does not declare
    pub remove_undefined: bool,
    /// Keep keys whose value is null
    pub allow_none: bool,
    /// Set absent fields without a default (or with `set_default` off) to null
    pub populate_none: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            set_default: true,
            remove_undefined: true,
            allow_none: false,
            populate_none: false,
        }
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default(mut self, set_default: bool) -> Self {
        self.set_default = set_default;
        self
    }

    pub fn remove_undefined(mut self, remove_undefined: bool) -> Self {
        self.remove_undefined = remove_undefined;
        self
    }

    pub fn allow_none(mut self, allow_none: bool) -> Self {
        self.allow_none = allow_none;
        self
    }

    pub fn populate_none(mut self, populate_none: bool) -> Self {
        self.populate_none = populate_none;
        self
    }
}

impl Schema {
    /// Build a new document holding the default of every field that has one.
    ///
    /// Fields without a default are left out.
    pub fn build_default(&self) -> Document {
        self.fields
            .iter()
            .filter(|(_, definition)| definition.has_default())
            .filter_map(|(name, definition)| {
                definition
                    .get_default_value()
                    .map(|value| (name.clone(), value))
            })
            .collect()
    }

    /// Normalize `document` in place to match this schema.
    ///
    /// Nested maps under nested fields are cleaned with
    /// [`CleanOptions::default`] whatever `options` the caller passed.
    pub fn clean(&self, document: &mut Document, options: CleanOptions) {
        for (key, definition) in self.fields.iter() {
            let Some(is_null) = document.get(key.as_str()).map(Value::is_null) else {
                if options.set_default && definition.has_default() {
                    if let Some(value) = definition.get_default_value() {
                        trace!("Setting default for '{}' on '{}'", key, self.name);
                        document.insert(key.clone(), value);
                    }
                } else if options.populate_none {
                    document.insert(key.clone(), Value::Null);
                }
                continue;
            };

            if is_null {
                if !options.allow_none {
                    trace!("Removing null '{}' from '{}'", key, self.name);
                    document.remove(key.as_str());
                }
                continue;
            }

            if let Some(model) = definition.kind().model() {
                if let Some(Value::Map(nested)) = document.get_mut(key.as_str()) {
                    model.clean(nested, CleanOptions::default());
                }
            }
        }

        if options.remove_undefined {
            document.retain(|key, _| {
                let declared = self.fields.contains(key);
                if !declared {
                    trace!("Removing undeclared '{}' from '{}'", key, self.name);
                }
                declared
            });
        }
    }

    /// Merge `patch` into `document` in place.
    ///
    /// Only declared fields are merged; other keys of `patch` are ignored.
    /// An absent or null field takes the patch value. Nested fields merge
    /// recursively through their schema, plain maps take the patch's keys one
    /// level deep, and anything else is overwritten.
    pub fn merge(&self, document: &mut Document, patch: &Document) {
        for (key, value) in patch {
            let Some(definition) = self.fields.get(key) else {
                trace!("Ignoring undeclared '{}' in patch for '{}'", key, self.name);
                continue;
            };

            let occupied = document
                .get(key.as_str())
                .is_some_and(|current| !current.is_null());
            if !occupied {
                document.insert(key.clone(), value.clone());
                continue;
            }
            let Some(current) = document.get_mut(key.as_str()) else {
                continue;
            };

            if let Some(model) = definition.kind().model() {
                match (&mut *current, value) {
                    (Value::Map(existing), Value::Map(nested_patch)) => {
                        model.merge(existing, nested_patch);
                    }
                    _ => *current = value.clone(),
                }
                continue;
            }

            match (&mut *current, value) {
                (Value::Map(existing), Value::Map(nested_patch)) => {
                    existing.extend(
                        nested_patch
                            .iter()
                            .map(|(k, v)| (k.clone(), v.clone())),
                    );
                }
                _ => *current = value.clone(),
            }
        }
    }
}
