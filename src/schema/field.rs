//! Declaration surface for fields.
//!
//! Fields are declared with the constructors on [`Field`] and refined with
//! the chainable setters on [`FieldBuilder`]. Every option is checked when the
//! field is built; options that do not apply to the field kind are rejected
//! rather than silently ignored.
//!
//! ```rust
//! use docschema::schema::Field;
//!
//! # fn main() -> Result<(), docschema::SchemaError> {
//! let age = Field::integer().min(0).max(150).build()?;
//! let tags = Field::list_of(Field::text()).default_value(Vec::<String>::new()).build()?;
//! assert!(!age.is_required());
//! assert!(tags.has_default());
//! # Ok(())
//! # }
//! ```

use super::definition::Schema;
use super::types::{Choices, DefaultValue, FieldDefinition, FieldKind, Number, NumericRange};
use crate::document::Value;
use crate::error::{SchemaError, SchemaResult};
use log::debug;
use regex::Regex;
use std::sync::Arc;

/// Entry points for declaring fields.
pub struct Field;

impl Field {
    /// A field accepting any value
    pub fn any() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Any)
    }

    pub fn text() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Text { regex: None })
    }

    pub fn integer() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Integer {
            range: NumericRange::default(),
        })
    }

    pub fn float() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Float {
            range: NumericRange::default(),
        })
    }

    pub fn boolean() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Boolean)
    }

    /// A list with unconstrained elements
    pub fn list() -> FieldBuilder {
        FieldBuilder::new(FieldKind::List { inner: None })
    }

    /// A list whose elements must each satisfy `inner`
    pub fn list_of(inner: impl IntoFieldDefinition) -> FieldBuilder {
        match inner.into_field_definition() {
            Ok(inner) => FieldBuilder::new(FieldKind::List {
                inner: Some(Box::new(inner)),
            }),
            Err(error) => {
                let mut builder = FieldBuilder::new(FieldKind::List { inner: None });
                builder.pending_error = Some(error);
                builder
            }
        }
    }

    pub fn map() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Map)
    }

    /// A map validated, defaulted, cleaned and merged by `model`
    pub fn nested(model: &Arc<Schema>) -> FieldBuilder {
        FieldBuilder::new(FieldKind::Nested {
            model: Arc::clone(model),
        })
    }

    pub fn timestamp() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Timestamp)
    }
}

/// Builder for a [`FieldDefinition`].
#[derive(Debug)]
pub struct FieldBuilder {
    kind: FieldKind,
    required: bool,
    choices: Option<Choices>,
    default: DefaultValue,
    model_default: bool,
    pattern: Option<String>,
    min: Option<Number>,
    max: Option<Number>,
    pending_error: Option<SchemaError>,
}

impl FieldBuilder {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            choices: None,
            default: DefaultValue::None,
            model_default: false,
            pattern: None,
            min: None,
            max: None,
            pending_error: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict the field to a set of values
    pub fn choices<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(Choices::Set(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Restrict the field to the keys of a mapping; values must be unique
    pub fn choice_mapping<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        self.choices = Some(Choices::Mapping(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ));
        self
    }

    /// Fixed default, copied into every document that needs it.
    ///
    /// Not available on nested fields; use [`default_from_model`].
    ///
    /// [`default_from_model`]: FieldBuilder::default_from_model
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Literal(value.into());
        self
    }

    /// Compute the default with `generate`, which receives the built field.
    /// Not available on nested fields.
    pub fn default_with<F>(mut self, generate: F) -> Self
    where
        F: Fn(&FieldDefinition) -> Value + Send + Sync + 'static,
    {
        self.default = DefaultValue::Generator(Arc::new(generate));
        self
    }

    /// Default a nested field to its schema's default document
    pub fn default_from_model(mut self) -> Self {
        self.model_default = true;
        self
    }

    /// Require text to match `pattern` at its start
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Inclusive lower bound
    pub fn min(mut self, min: impl Into<Number>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Exclusive upper bound
    pub fn max(mut self, max: impl Into<Number>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn build(self) -> SchemaResult<FieldDefinition> {
        if let Some(error) = self.pending_error {
            return Err(error);
        }
        let kind_name = self.kind.name();

        if let Some(Choices::Mapping(pairs)) = &self.choices {
            for (index, (_, value)) in pairs.iter().enumerate() {
                if pairs[..index].iter().any(|(_, earlier)| earlier == value) {
                    return Err(SchemaError::DuplicateChoiceValue {
                        value: value.to_string(),
                    });
                }
            }
        }

        let numeric = matches!(self.kind, FieldKind::Integer { .. } | FieldKind::Float { .. });
        if self.pattern.is_some() && !matches!(self.kind, FieldKind::Text { .. }) {
            return Err(SchemaError::inapplicable(kind_name, "regex"));
        }
        if self.min.is_some() && !numeric {
            return Err(SchemaError::inapplicable(kind_name, "min"));
        }
        if self.max.is_some() && !numeric {
            return Err(SchemaError::inapplicable(kind_name, "max"));
        }
        // Nested defaults always come from the model.
        if self.kind.model().is_some() && self.default.is_configured() {
            return Err(SchemaError::inapplicable(kind_name, "default"));
        }

        // Choices take precedence over a numeric range.
        let range = if self.choices.is_some() {
            if self.min.is_some() || self.max.is_some() {
                debug!("Ignoring min/max on {} field with choices", kind_name);
            }
            NumericRange::default()
        } else {
            NumericRange {
                min: self.min,
                max: self.max,
            }
        };

        let kind = match self.kind {
            FieldKind::Text { .. } => {
                let regex = match self.pattern {
                    Some(pattern) => Some(
                        Regex::new(&pattern)
                            .map_err(|source| SchemaError::InvalidRegex { pattern, source })?,
                    ),
                    None => None,
                };
                FieldKind::Text { regex }
            }
            FieldKind::Integer { .. } => FieldKind::Integer { range },
            FieldKind::Float { .. } => FieldKind::Float { range },
            other => other,
        };

        let default = if self.model_default {
            if kind.model().is_none() {
                return Err(SchemaError::inapplicable(kind_name, "default_from_model"));
            }
            let generate: Arc<dyn Fn(&FieldDefinition) -> Value + Send + Sync> =
                Arc::new(|field: &FieldDefinition| {
                    field
                        .kind()
                        .model()
                        .map(|model| Value::Map(model.build_default()))
                        .unwrap_or_default()
                });
            DefaultValue::Generator(generate)
        } else {
            self.default
        };

        Ok(FieldDefinition {
            required: self.required,
            choices: self.choices,
            default,
            kind,
        })
    }
}

/// Anything that can become a field definition: a built definition or a
/// builder still to be checked.
pub trait IntoFieldDefinition {
    fn into_field_definition(self) -> SchemaResult<FieldDefinition>;
}

impl IntoFieldDefinition for FieldDefinition {
    fn into_field_definition(self) -> SchemaResult<FieldDefinition> {
        Ok(self)
    }
}

impl IntoFieldDefinition for FieldBuilder {
    fn into_field_definition(self) -> SchemaResult<FieldDefinition> {
        self.build()
    }
}
