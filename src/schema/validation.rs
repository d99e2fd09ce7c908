//! Document validation against a schema.
//!
//! Validation is exposed as a lazy iterator so callers can stop at the first
//! problem ([`Schema::is_valid`]) or collect everything
//! ([`Schema::document_errors`]). Fields are visited in field-table order and
//! nested schemas are entered depth-first right after their own field, with
//! paths composed using dots.

use super::definition::Schema;
use crate::document::{Document, Value};
use crate::error::ValidationError;

impl Schema {
    /// Lazily validate `document`.
    ///
    /// No field is checked until the iterator is pulled. Calling this again
    /// starts a fresh, independent pass.
    ///
    /// ```rust
    /// use docschema::schema::{Field, SchemaBuilder};
    /// use docschema::document::Value;
    /// use docschema::ErrorKind;
    /// use serde_json::json;
    ///
    /// # fn main() -> Result<(), docschema::SchemaError> {
    /// let person = SchemaBuilder::new("Person")
    ///     .field("name", Field::text().required())
    ///     .field("age", Field::integer().min(0).max(150))
    ///     .build()?;
    /// let doc = Value::from(json!({"age": 200})).into_map().unwrap();
    ///
    /// let kinds: Vec<ErrorKind> = person.validate_errors(&doc).map(|e| e.kind).collect();
    /// assert_eq!(kinds, [ErrorKind::Required, ErrorKind::ValueOutOfRange]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn validate_errors<'a>(&'a self, document: &'a Document) -> ValidationErrors<'a> {
        ValidationErrors {
            stack: vec![Frame {
                schema: self,
                document,
                parent: None,
                position: 0,
            }],
        }
    }

    /// Collect every validation error of `document`
    pub fn document_errors(&self, document: &Document) -> Vec<ValidationError> {
        self.validate_errors(document).collect()
    }

    /// Whether `document` has no validation errors.
    ///
    /// Stops at the first error found.
    pub fn is_valid(&self, document: &Document) -> bool {
        self.validate_errors(document).next().is_none()
    }
}

/// Lazy sequence of [`ValidationError`]s for one document.
#[derive(Debug, Clone)]
pub struct ValidationErrors<'a> {
    stack: Vec<Frame<'a>>,
}

#[derive(Debug, Clone)]
struct Frame<'a> {
    schema: &'a Schema,
    document: &'a Document,
    parent: Option<String>,
    position: usize,
}

impl Frame<'_> {
    fn path(&self, key: &str) -> String {
        match &self.parent {
            Some(parent) => format!("{}.{}", parent, key),
            None => key.to_string(),
        }
    }
}

impl<'a> Iterator for ValidationErrors<'a> {
    type Item = ValidationError;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let schema: &'a Schema = frame.schema;
            let document: &'a Document = frame.document;

            let Some((key, definition)) = schema.fields.entry_at(frame.position) else {
                self.stack.pop();
                continue;
            };
            frame.position += 1;
            let path = frame.path(key);

            let Some(value) = document.get(key) else {
                if definition.is_required() {
                    return Some(ValidationError::required(path));
                }
                continue;
            };

            let error = definition
                .get_error(value)
                .map(|error| ValidationError::at(path.clone(), error));

            // Nested errors follow the field's own error.
            if let (Some(model), Value::Map(nested)) = (definition.kind().model(), value) {
                self.stack.push(Frame {
                    schema: model.as_ref(),
                    document: nested,
                    parent: Some(path),
                    position: 0,
                });
            }

            if error.is_some() {
                return error;
            }
        }
    }
}
