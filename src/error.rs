//! Error types for schema declaration and document validation.
//!
//! Two families live here. [`SchemaError`] is raised while a schema is being
//! declared and is fatal: a schema that fails to build never becomes usable.
//! [`ValidationError`] describes a single problem found in a document; it is
//! returned as data from the validation operations and never raised by them.

use crate::document::Value;
use serde::Serialize;
use std::fmt;

/// Errors raised while declaring fields and schemas.
///
/// These are programming errors in the schema declaration and should be
/// caught during development rather than at document-validation time.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A text field was given a pattern that does not compile
    #[error("Invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A kind-specific option was set on a field kind that does not support it
    #[error("Option '{option}' is not applicable to {kind} fields")]
    InapplicableOption { kind: String, option: String },

    /// A choice mapping maps two keys to the same value, so it has no inverse
    #[error("Choice mapping value {value} is used by more than one key")]
    DuplicateChoiceValue { value: String },

    /// A schema with the same name is already defined in the registry
    #[error("Schema '{name}' is already defined")]
    DuplicateSchema { name: String },

    /// A field referenced by name does not exist on the schema
    #[error("Unknown field '{field}' on schema '{schema}'")]
    UnknownField { schema: String, field: String },

    /// An extension provider refused to apply to a schema
    #[error("Extension '{extension}' failed on schema '{schema}': {message}")]
    Extension {
        extension: String,
        schema: String,
        message: String,
    },
}

impl SchemaError {
    /// Create an inapplicable option error
    pub fn inapplicable(kind: impl Into<String>, option: impl Into<String>) -> Self {
        Self::InapplicableOption {
            kind: kind.into(),
            option: option.into(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            schema: schema.into(),
            field: field.into(),
        }
    }

    /// Create an extension failure error
    pub fn extension(
        extension: impl Into<String>,
        schema: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Extension {
            extension: extension.into(),
            schema: schema.into(),
            message: message.into(),
        }
    }
}

/// Category of a document validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The value has the wrong runtime type for the field
    Type,
    /// The value is not among the field's choices or fails its pattern
    Value,
    /// A numeric value falls outside `[min, max)`
    ValueOutOfRange,
    /// A required field is absent
    Required,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Type => "type",
            ErrorKind::Value => "value",
            ErrorKind::ValueOutOfRange => "value_out_of_range",
            ErrorKind::Required => "required",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level check failure, before a path is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub value: Value,
}

impl FieldError {
    pub fn new(kind: ErrorKind, value: Value) -> Self {
        Self { kind, value }
    }
}

/// A validation failure located in a document.
///
/// `path` is the dotted path of the field (`address.city`). `value` holds the
/// offending value; it is `None` for [`ErrorKind::Required`].
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{kind} error at '{path}'{}", describe_value(.value))]
pub struct ValidationError {
    pub path: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

fn describe_value(value: &Option<Value>) -> String {
    match value {
        Some(value) => format!(": {}", value),
        None => String::new(),
    }
}

impl ValidationError {
    /// Attach a path to a field-level error
    pub fn at(path: impl Into<String>, error: FieldError) -> Self {
        Self {
            path: path.into(),
            kind: error.kind,
            value: Some(error.value),
        }
    }

    /// Create a missing required field error
    pub fn required(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ErrorKind::Required,
            value: None,
        }
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;
