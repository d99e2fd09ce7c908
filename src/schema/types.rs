//! Field definition types.
//!
//! A [`FieldDefinition`] is the validation and default-value contract for one
//! key of a schema. Definitions are produced by [`FieldBuilder`] and are
//! immutable afterwards; schemas clone them freely when inheriting.
//!
//! [`FieldBuilder`]: super::field::FieldBuilder

use super::definition::Schema;
use crate::document::Value;
use crate::error::{ErrorKind, FieldError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Function computing a default value. It receives the field it belongs to.
pub type DefaultGenerator = Arc<dyn Fn(&FieldDefinition) -> Value + Send + Sync>;

/// How a field produces its default value.
#[derive(Clone, Default)]
pub enum DefaultValue {
    /// No default configured; the field is left out of default documents
    #[default]
    None,
    /// A fixed value, deep-copied each time it is used
    Literal(Value),
    /// A value computed on every use
    Generator(DefaultGenerator),
}

impl DefaultValue {
    pub fn is_configured(&self) -> bool {
        !matches!(self, DefaultValue::None)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::None => f.write_str("None"),
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Allowed values for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Choices {
    /// Plain set of allowed values
    Set(Vec<Value>),
    /// Allowed values (the keys) each paired with an associated value.
    ///
    /// Associated values are unique, so the mapping can be read backwards
    /// with [`Choices::reverse`].
    Mapping(Vec<(Value, Value)>),
}

impl Choices {
    /// Whether `value` is an allowed value (a key, for mappings)
    pub fn contains(&self, value: &Value) -> bool {
        match self {
            Choices::Set(values) => values.contains(value),
            Choices::Mapping(pairs) => pairs.iter().any(|(key, _)| key == value),
        }
    }

    /// The associated value of an allowed key
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Choices::Set(_) => None,
            Choices::Mapping(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
        }
    }

    /// The key whose associated value is `value`
    pub fn reverse(&self, value: &Value) -> Option<&Value> {
        match self {
            Choices::Set(_) => None,
            Choices::Mapping(pairs) => pairs.iter().find(|(_, v)| v == value).map(|(k, _)| k),
        }
    }
}

/// A numeric bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Order `value` relative to this bound. Non-numeric values and NaN are
    /// unordered.
    fn compare(&self, value: &Value) -> Option<Ordering> {
        match (value, self) {
            (Value::Integer(v), Number::Integer(b)) => Some(v.cmp(b)),
            (Value::Integer(v), Number::Float(b)) => compare_integer_to_float(*v, *b),
            (Value::Float(v), Number::Integer(b)) => {
                compare_integer_to_float(*b, *v).map(Ordering::reverse)
            }
            (Value::Float(v), Number::Float(b)) => v.partial_cmp(b),
            _ => None,
        }
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer through `f64`.
fn compare_integer_to_float(integer: i64, float: f64) -> Option<Ordering> {
    // 2^63, the first float above every i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return None;
    }
    if float >= LIMIT {
        return Some(Ordering::Less);
    }
    if float < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match integer.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        ordering => Some(ordering),
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(i64::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Half-open numeric range `[min, max)`. Either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericRange {
    pub min: Option<Number>,
    pub max: Option<Number>,
}

impl NumericRange {
    pub fn contains(&self, value: &Value) -> bool {
        let below = self
            .min
            .is_some_and(|min| min.compare(value) == Some(Ordering::Less));
        let above = self.max.is_some_and(|max| {
            matches!(
                max.compare(value),
                Some(Ordering::Greater) | Some(Ordering::Equal)
            )
        });
        !below && !above
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Kind of a field together with its kind-specific configuration.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Accepts any value
    Any,
    /// Text, optionally required to match a pattern at its start
    Text { regex: Option<Regex> },
    Integer { range: NumericRange },
    /// Float; whole numbers are accepted too
    Float { range: NumericRange },
    Boolean,
    /// List, optionally checking every element against an inner definition
    List { inner: Option<Box<FieldDefinition>> },
    Map,
    /// Map validated by another schema
    Nested { model: Arc<Schema> },
    Timestamp,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Any => "any",
            FieldKind::Text { .. } => "text",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Float { .. } => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::List { .. } => "list",
            FieldKind::Map => "map",
            FieldKind::Nested { .. } => "nested",
            FieldKind::Timestamp => "timestamp",
        }
    }

    /// The nested schema of a nested field
    pub fn model(&self) -> Option<&Arc<Schema>> {
        match self {
            FieldKind::Nested { model } => Some(model),
            _ => None,
        }
    }
}

/// Validation and default-value contract for one schema key.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub(crate) required: bool,
    pub(crate) choices: Option<Choices>,
    pub(crate) default: DefaultValue,
    pub(crate) kind: FieldKind,
}

impl FieldDefinition {
    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn choices(&self) -> Option<&Choices> {
        self.choices.as_ref()
    }

    pub fn default(&self) -> &DefaultValue {
        &self.default
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn has_default(&self) -> bool {
        self.default.is_configured()
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.kind, FieldKind::Nested { .. })
    }

    /// Whether `value` has the runtime type this field expects.
    ///
    /// Null is accepted by every kind.
    pub fn is_valid_type(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match &self.kind {
            FieldKind::Any => true,
            FieldKind::Text { .. } => matches!(value, Value::Text(_)),
            FieldKind::Integer { .. } => matches!(value, Value::Integer(_)),
            FieldKind::Float { .. } => matches!(value, Value::Integer(_) | Value::Float(_)),
            FieldKind::Boolean => matches!(value, Value::Bool(_)),
            FieldKind::List { .. } => matches!(value, Value::List(_)),
            FieldKind::Map | FieldKind::Nested { .. } => matches!(value, Value::Map(_)),
            FieldKind::Timestamp => matches!(value, Value::Timestamp(_)),
        }
    }

    /// Check a single value against this field.
    ///
    /// The type is checked first, then membership in `choices`, then the
    /// kind-specific constraints. The first failure is returned. Nested
    /// schemas are not entered here; see [`Schema::validate_errors`].
    pub fn get_error(&self, value: &Value) -> Option<FieldError> {
        if !self.is_valid_type(value) {
            return Some(FieldError::new(ErrorKind::Type, value.clone()));
        }
        if let Some(choices) = &self.choices {
            if !choices.contains(value) {
                return Some(FieldError::new(ErrorKind::Value, value.clone()));
            }
        }
        if value.is_null() {
            return None;
        }

        match &self.kind {
            FieldKind::Text { regex: Some(regex) } => {
                let text = value.as_str().unwrap_or_default();
                let anchored = regex.find(text).is_some_and(|m| m.start() == 0);
                if !anchored {
                    return Some(FieldError::new(ErrorKind::Value, value.clone()));
                }
            }
            FieldKind::Integer { range } | FieldKind::Float { range } => {
                if !range.contains(value) {
                    return Some(FieldError::new(ErrorKind::ValueOutOfRange, value.clone()));
                }
            }
            FieldKind::List { inner: Some(inner) } => {
                if let Some(items) = value.as_list() {
                    return items.iter().find_map(|item| inner.get_error(item));
                }
            }
            _ => {}
        }
        None
    }

    /// Compute this field's default value.
    ///
    /// Literal defaults are cloned on every call so documents never share a
    /// default. Nested fields always build a default document from their
    /// schema.
    pub fn get_default_value(&self) -> Option<Value> {
        if let FieldKind::Nested { model } = &self.kind {
            return Some(Value::Map(model.build_default()));
        }
        match &self.default {
            DefaultValue::None => None,
            DefaultValue::Literal(value) => Some(value.clone()),
            DefaultValue::Generator(generate) => Some(generate(self)),
        }
    }
}
