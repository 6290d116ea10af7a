#![forbid(unsafe_code)]

//! Parsed value model.
//!
//! A [`Value`] is the result of parsing a text blob with [`crate::parse`].
//! It covers the JSON data model plus the two extended literal kinds the
//! relaxed parser accepts: points in time (`new Date(ms)`) and regular
//! expression literals (`/pattern/flags`).
//!
//! Objects preserve insertion order because rendering iterates members in
//! the order they appeared in the source.
//!
//! # Example
//!
//! ```
//! use jfold_core::{Value, ValueKind, parse};
//!
//! let value = parse(r#"{"a": 1}"#).unwrap();
//! assert_eq!(value.kind(), ValueKind::Object);
//! assert_eq!(value.len(), Some(1));
//! ```

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `null` literal. The relaxed parser also maps `undefined` here,
    /// since the two render identically.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A numeric literal.
    Number(f64),
    /// A string literal, unescaped.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// An ordered mapping from key to value. Keys are unique within one
    /// object and insertion order is preserved.
    Object(Vec<(String, Value)>),
    /// A point in time, in milliseconds since the Unix epoch.
    Date(i64),
    /// A regular expression literal: source pattern plus flags.
    Regexp {
        /// Pattern between the slashes, verbatim.
        pattern: String,
        /// Flag letters after the closing slash.
        flags: String,
    },
}

/// Discriminant of a [`Value`], decoupled from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Date,
    Regexp,
}

impl Value {
    /// Get the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Date(_) => ValueKind::Date,
            Self::Regexp { .. } => ValueKind::Regexp,
        }
    }

    /// Whether this value is an array or an object.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Number of children for containers, `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Array(items) => Some(items.len()),
            Self::Object(members) => Some(members.len()),
            _ => None,
        }
    }

    /// Whether this value is a container with no children.
    #[must_use]
    pub fn is_empty_container(&self) -> bool {
        self.len() == Some(0)
    }

    /// Get the boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the numeric payload, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the array items, if any.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get the object members, if any.
    #[must_use]
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Look up an object member by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::Number(1.0).kind(), ValueKind::Number);
        assert_eq!(Value::String("x".into()).kind(), ValueKind::String);
        assert_eq!(Value::Array(vec![]).kind(), ValueKind::Array);
        assert_eq!(Value::Object(vec![]).kind(), ValueKind::Object);
        assert_eq!(Value::Date(0).kind(), ValueKind::Date);
        assert_eq!(
            Value::Regexp {
                pattern: "a".into(),
                flags: String::new(),
            }
            .kind(),
            ValueKind::Regexp
        );
    }

    #[test]
    fn container_len() {
        assert_eq!(Value::Array(vec![Value::Null]).len(), Some(1));
        assert_eq!(Value::Object(vec![]).len(), Some(0));
        assert_eq!(Value::Number(1.0).len(), None);
    }

    #[test]
    fn empty_container_detection() {
        assert!(Value::Array(vec![]).is_empty_container());
        assert!(Value::Object(vec![]).is_empty_container());
        assert!(!Value::Array(vec![Value::Null]).is_empty_container());
        assert!(!Value::Null.is_empty_container());
    }

    #[test]
    fn object_get_preserves_order_semantics() {
        let obj = Value::Object(vec![
            ("b".into(), Value::Number(2.0)),
            ("a".into(), Value::Number(1.0)),
        ]);
        assert_eq!(obj.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(obj.get("missing"), None);
        // Iteration order is insertion order, not sorted order.
        let keys: Vec<&str> = obj
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn scalar_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Number(3.5).as_number(), Some(3.5));
        assert_eq!(Value::String("hi".into()).as_str(), Some("hi"));
        assert_eq!(Value::Null.as_bool(), None);
        assert_eq!(Value::Null.as_str(), None);
    }
}
