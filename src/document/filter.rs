//! Inclusion and exclusion filtering over dotted field paths.
//!
//! Filtering walks a document and builds a new one containing only the
//! selected fields. Paths use dots to reach into nested maps (`address.city`);
//! when a path crosses a list, it applies to every element of the list.
//!
//! Two modes are supported. By default every field is kept and `exclude`
//! removes fields, with `include` re-admitting more specific paths beneath an
//! excluded one. With `include_only` the output starts empty and only the
//! `include` paths are copied, with `exclude` trimming beneath them.

use super::{Document, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Options controlling [`filter`].
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Dotted paths to include
    pub include: Vec<String>,
    /// Dotted paths to exclude; exclusion wins over inclusion at the same level
    pub exclude: Vec<String>,
    /// Start from an empty document and copy only included paths
    pub include_only: bool,
    /// Keep empty maps, lists and other empty values produced by filtering
    pub preserve_empty_values: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            include_only: false,
            preserve_empty_values: true,
        }
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn exclude<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn include_only(mut self, include_only: bool) -> Self {
        self.include_only = include_only;
        self
    }

    pub fn preserve_empty_values(mut self, preserve: bool) -> Self {
        self.preserve_empty_values = preserve;
        self
    }
}

/// Return a filtered copy of `document`.
///
/// # Examples
///
/// ```rust
/// use docschema::document::{FilterOptions, Value, filter};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": {"b": 1, "c": 2}, "d": 3})).into_map().unwrap();
/// let options = FilterOptions::new().include_only(true).include(["a.b"]);
/// assert_eq!(Value::Map(filter(&doc, &options)), Value::from(json!({"a": {"b": 1}})));
/// ```
pub fn filter(document: &Document, options: &FilterOptions) -> Document {
    let filter = Filter {
        preserve_empty_values: options.preserve_empty_values,
    };
    filter.map(
        document,
        &options.include,
        &options.exclude,
        !options.include_only,
    )
}

struct Filter {
    preserve_empty_values: bool,
}

impl Filter {
    fn keep(&self, value: &Value) -> bool {
        self.preserve_empty_values || !value.is_empty_value()
    }

    fn value(
        &self,
        value: &Value,
        include: &[String],
        exclude: &[String],
        use_own_keys: bool,
    ) -> Value {
        match value {
            Value::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| self.value(item, include, exclude, use_own_keys))
                    .filter(|item| self.keep(item))
                    .collect(),
            ),
            Value::Map(map) => Value::Map(self.map(map, include, exclude, use_own_keys)),
            // A leaf reached while only collecting included paths was not selected
            other if use_own_keys => other.clone(),
            _ => Value::Null,
        }
    }

    fn map(
        &self,
        map: &Document,
        include: &[String],
        exclude: &[String],
        use_own_keys: bool,
    ) -> Document {
        let (include_fields, include_nested) = split_paths(include);
        let (exclude_fields, exclude_nested) = split_paths(exclude);

        let mut keys: BTreeSet<&str> = if use_own_keys {
            map.keys().map(String::as_str).collect()
        } else {
            BTreeSet::new()
        };
        keys.extend(include_fields.iter().copied());
        for field in &exclude_fields {
            keys.remove(field);
        }

        let mut out = Document::new();
        for key in keys {
            let Some(value) = map.get(key) else {
                continue;
            };
            let value = match exclude_nested.get(key) {
                Some(nested_exclude) if matches!(value, Value::List(_) | Value::Map(_)) => {
                    let nested_include = include_nested
                        .get(key)
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    self.value(value, nested_include, nested_exclude, true)
                }
                _ => value.clone(),
            };
            if self.keep(&value) {
                out.insert(key.to_string(), value);
            }
        }

        for (key, nested_include) in &include_nested {
            if out.contains_key(*key) {
                continue;
            }
            let Some(value) = map.get(*key) else {
                continue;
            };
            let nested_exclude = exclude_nested
                .get(key)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let value = self.value(value, nested_include, nested_exclude, false);
            if self.keep(&value) {
                out.insert(key.to_string(), value);
            }
        }

        out
    }
}

/// Split dotted paths into top-level names and, per top-level name, the
/// remainder of every deeper path.
///
/// `["email", "address", "address.city"]` gives `{email, address}` and
/// `{address: [city]}`.
fn split_paths(paths: &[String]) -> (BTreeSet<&str>, BTreeMap<&str, Vec<String>>) {
    let mut fields = BTreeSet::new();
    let mut nested: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for path in paths {
        match path.split_once('.') {
            Some((head, rest)) => nested.entry(head).or_default().push(rest.to_string()),
            None => {
                fields.insert(path.as_str());
            }
        }
    }
    (fields, nested)
}
