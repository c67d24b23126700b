// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed values carried by options and signal frames.
//!
//! A [`Value`] is a closed tagged union over eight scalar kinds plus two
//! composites: a homogeneous list of one scalar kind and an insertion-ordered
//! string-keyed map. Values are immutable once built; the only way to build a
//! list is [`ValueList::new`], which checks every element against the list's
//! element kind.
//!
//! # Examples
//!
//! ```rust
//! use cfcore::value::{Value, ValueKind, ScalarKind, decode, encode};
//!
//! let v = decode(" -156 ", ValueKind::Scalar(ScalarKind::Int)).unwrap();
//! assert_eq!(v, Value::Int(-156));
//! assert_eq!(encode(&v), "-156");
//! ```

mod codec;
mod convert;
mod uri;

pub use codec::{decode, decode_scalar, encode, encode_scalar};
pub use convert::ValueType;
pub use uri::{Uri, CPATH_SCHEME};

use crate::errors::{CoreError, CoreResult};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::fmt;

/// Insertion-ordered mapping of keys to values.
pub type ValueMap = IndexMap<String, Value>;

/// The primitive kinds a value or list element can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    UInt,
    Real,
    String,
    Uri,
    Date,
    Binary,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::Bool,
        ScalarKind::Int,
        ScalarKind::UInt,
        ScalarKind::Real,
        ScalarKind::String,
        ScalarKind::Uri,
        ScalarKind::Date,
        ScalarKind::Binary,
    ];

    /// Element name used for this kind on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "integer",
            ScalarKind::UInt => "unsigned",
            ScalarKind::Real => "real",
            ScalarKind::String => "string",
            ScalarKind::Uri => "path",
            ScalarKind::Date => "date",
            ScalarKind::Binary => "data",
        }
    }

    /// Inverse of [`wire_name`](Self::wire_name); `uri` is accepted as an alias of `path`.
    pub fn from_wire_name(name: &str) -> Option<ScalarKind> {
        match name {
            "bool" => Some(ScalarKind::Bool),
            "integer" => Some(ScalarKind::Int),
            "unsigned" => Some(ScalarKind::UInt),
            "real" => Some(ScalarKind::Real),
            "string" => Some(ScalarKind::String),
            "path" | "uri" => Some(ScalarKind::Uri),
            "date" => Some(ScalarKind::Date),
            "data" => Some(ScalarKind::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Full kind of a value, fixed for the lifetime of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar(ScalarKind),
    List(ScalarKind),
    Map,
}

impl ValueKind {
    /// Parse `integer`, `array[integer]` or `map`.
    pub fn parse(name: &str) -> Option<ValueKind> {
        if name == "map" {
            return Some(ValueKind::Map);
        }
        if let Some(inner) = name.strip_prefix("array[").and_then(|s| s.strip_suffix(']')) {
            return ScalarKind::from_wire_name(inner).map(ValueKind::List);
        }
        ScalarKind::from_wire_name(name).map(ValueKind::Scalar)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar(kind) => write!(f, "{}", kind),
            ValueKind::List(kind) => write!(f, "array[{}]", kind),
            ValueKind::Map => f.write_str("map"),
        }
    }
}

/// An ordered list whose elements all share one scalar kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueList {
    kind: ScalarKind,
    items: Vec<Value>,
}

impl ValueList {
    /// Build a list, rejecting any element that is not of `kind`.
    pub fn new(kind: ScalarKind, items: Vec<Value>) -> CoreResult<Self> {
        for (index, item) in items.iter().enumerate() {
            if item.kind() != ValueKind::Scalar(kind) {
                return Err(CoreError::TypeMismatch {
                    name: format!("[{}]", index),
                    expected: ValueKind::Scalar(kind),
                    found: item.kind(),
                });
            }
        }
        Ok(Self { kind, items })
    }

    pub fn empty(kind: ScalarKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A typed configuration or argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Real(f64),
    String(String),
    Uri(Uri),
    Date(NaiveDateTime),
    Binary(Vec<u8>),
    List(ValueList),
    Map(ValueMap),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Scalar(ScalarKind::Bool),
            Value::Int(_) => ValueKind::Scalar(ScalarKind::Int),
            Value::UInt(_) => ValueKind::Scalar(ScalarKind::UInt),
            Value::Real(_) => ValueKind::Scalar(ScalarKind::Real),
            Value::String(_) => ValueKind::Scalar(ScalarKind::String),
            Value::Uri(_) => ValueKind::Scalar(ScalarKind::Uri),
            Value::Date(_) => ValueKind::Scalar(ScalarKind::Date),
            Value::Binary(_) => ValueKind::Scalar(ScalarKind::Binary),
            Value::List(list) => ValueKind::List(list.kind()),
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// The zero value of a kind, used for schema templates without an explicit default.
    pub fn zero(kind: ValueKind) -> Value {
        match kind {
            ValueKind::Scalar(ScalarKind::Bool) => Value::Bool(false),
            ValueKind::Scalar(ScalarKind::Int) => Value::Int(0),
            ValueKind::Scalar(ScalarKind::UInt) => Value::UInt(0),
            ValueKind::Scalar(ScalarKind::Real) => Value::Real(0.0),
            ValueKind::Scalar(ScalarKind::String) => Value::String(String::new()),
            ValueKind::Scalar(ScalarKind::Uri) => Value::Uri(Uri::default()),
            ValueKind::Scalar(ScalarKind::Date) => Value::Date(NaiveDateTime::default()),
            ValueKind::Scalar(ScalarKind::Binary) => Value::Binary(Vec::new()),
            ValueKind::List(kind) => Value::List(ValueList::empty(kind)),
            ValueKind::Map => Value::Map(ValueMap::new()),
        }
    }

    /// Typed view of the value, `None` when the kind does not match.
    pub fn get<T: ValueType>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// Typed extraction that reports a `TypeMismatch` naming `name`.
    pub fn extract<T: ValueType>(&self, name: &str) -> CoreResult<T> {
        T::from_value(self).ok_or_else(|| CoreError::TypeMismatch {
            name: name.to_string(),
            expected: T::value_kind(),
            found: self.kind(),
        })
    }

    /// Build a list value from scalars of one kind.
    pub fn list(kind: ScalarKind, items: Vec<Value>) -> CoreResult<Value> {
        ValueList::new(kind, items).map(Value::List)
    }

    pub fn as_list(&self) -> Option<&ValueList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_parse_back() {
        for scalar in ScalarKind::ALL {
            for kind in [ValueKind::Scalar(scalar), ValueKind::List(scalar)] {
                assert_eq!(ValueKind::parse(&kind.to_string()), Some(kind));
            }
        }
        assert_eq!(ValueKind::parse("map"), Some(ValueKind::Map));
        assert_eq!(ValueKind::parse("uri"), Some(ValueKind::Scalar(ScalarKind::Uri)));
        assert_eq!(ValueKind::parse("array[matrix]"), None);
        assert_eq!(ValueKind::parse("complex"), None);
    }

    #[test]
    fn test_list_rejects_mixed_elements() {
        let err = ValueList::new(ScalarKind::Int, vec![Value::Int(1), Value::Real(2.0)]).unwrap_err();
        match err {
            CoreError::TypeMismatch { name, expected, found } => {
                assert_eq!(name, "[1]");
                assert_eq!(expected, ValueKind::Scalar(ScalarKind::Int));
                assert_eq!(found, ValueKind::Scalar(ScalarKind::Real));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_list_kind_is_fixed_even_when_empty() {
        let list = Value::list(ScalarKind::String, vec![]).unwrap();
        assert_eq!(list.kind(), ValueKind::List(ScalarKind::String));
        assert_ne!(list, Value::list(ScalarKind::Int, vec![]).unwrap());
    }

    #[test]
    fn test_extract_reports_mismatch() {
        let value = Value::Real(1.5);
        assert_eq!(value.extract::<f64>("OptReal").unwrap(), 1.5);
        let err = value.extract::<i64>("OptReal").unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { ref name, .. } if name == "OptReal"));
        assert_eq!(value.get::<String>(), None);
    }

    #[test]
    fn test_zero_values_have_requested_kind() {
        for scalar in ScalarKind::ALL {
            for kind in [ValueKind::Scalar(scalar), ValueKind::List(scalar)] {
                assert_eq!(Value::zero(kind).kind(), kind);
            }
        }
        assert_eq!(Value::zero(ValueKind::Map).kind(), ValueKind::Map);
    }
}
