//! Moving values between dotted paths of a document.

use super::{Document, Value};

/// A single move from `source` to `target`.
///
/// When the source path holds no value and a default is configured, the
/// default is written to the target instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub source: String,
    pub target: String,
    pub default: Option<Value>,
}

impl Projection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Apply projections to `document` in order, mutating it in place.
///
/// The source value is removed from its location, and any map left empty by
/// the removal is removed from its parent. Missing intermediate maps on the
/// target path are created; a target path running through a non-map value is
/// skipped and the moved value is dropped. An empty target discards the
/// value.
///
/// # Examples
///
/// ```rust
/// use docschema::document::{Projection, Value, project};
/// use serde_json::json;
///
/// let mut doc = Value::from(json!({"address": {"city": "Oslo"}})).into_map().unwrap();
/// project(&mut doc, &[Projection::new("address.city", "city")]);
/// assert_eq!(Value::Map(doc), Value::from(json!({"city": "Oslo"})));
/// ```
pub fn project(document: &mut Document, projections: &[Projection]) {
    for projection in projections {
        let source: Vec<&str> = projection.source.split('.').collect();
        let target: Vec<&str> = projection.target.split('.').collect();

        match take_value(document, &source) {
            Some(value) => set_value(document, &target, value),
            None => {
                if let Some(default) = &projection.default {
                    set_value(document, &target, default.clone());
                }
            }
        }
    }
}

fn take_value(map: &mut Document, path: &[&str]) -> Option<Value> {
    let (head, rest) = path.split_first()?;
    if rest.is_empty() {
        return map.remove(*head);
    }

    let (found, emptied) = match map.get_mut(*head) {
        Some(Value::Map(child)) => {
            let found = take_value(child, rest);
            (found, child.is_empty())
        }
        _ => return None,
    };
    if emptied {
        map.remove(*head);
    }
    found
}

fn set_value(map: &mut Document, path: &[&str], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        if !head.is_empty() {
            map.insert(head.to_string(), value);
        }
        return;
    }

    let child = map
        .entry(head.to_string())
        .or_insert_with(|| Value::Map(Document::new()));
    if let Value::Map(child) = child {
        set_value(child, rest, value);
    }
}
