// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{ScalarKind, Uri, Value, ValueKind, ValueList, ValueMap};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Rust types that map onto exactly one value kind.
///
/// Extraction never converts between kinds: an `Int` value is not a `u64`,
/// and a `Real` is not an `i64`. Narrower integer types are checked for range.
pub trait ValueType: Sized {
    fn value_kind() -> ValueKind;

    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

macro_rules! scalar_type {
    ($ty:ty, $kind:ident, $variant:ident, |$v:ident| $from:expr, |$s:ident| $into:expr) => {
        impl ValueType for $ty {
            fn value_kind() -> ValueKind {
                ValueKind::Scalar(ScalarKind::$kind)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant($v) => $from,
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                let $s = self;
                Value::$variant($into)
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                v.into_value()
            }
        }
    };
}

scalar_type!(bool, Bool, Bool, |v| Some(*v), |s| s);
scalar_type!(i64, Int, Int, |v| Some(*v), |s| s);
scalar_type!(i32, Int, Int, |v| i32::try_from(*v).ok(), |s| i64::from(s));
scalar_type!(u64, UInt, UInt, |v| Some(*v), |s| s);
scalar_type!(u32, UInt, UInt, |v| u32::try_from(*v).ok(), |s| u64::from(s));
scalar_type!(usize, UInt, UInt, |v| usize::try_from(*v).ok(), |s| s as u64);
scalar_type!(f64, Real, Real, |v| Some(*v), |s| s);
scalar_type!(String, String, String, |v| Some(v.clone()), |s| s);
scalar_type!(Uri, Uri, Uri, |v| Some(v.clone()), |s| s);
scalar_type!(NaiveDateTime, Date, Date, |v| Some(*v), |s| s);
scalar_type!(NaiveDate, Date, Date, |v| Some(v.date()), |s| s.and_time(NaiveTime::MIN));
scalar_type!(Vec<u8>, Binary, Binary, |v| Some(v.clone()), |s| s);

macro_rules! list_type {
    ($ty:ty, $kind:ident) => {
        impl ValueType for Vec<$ty> {
            fn value_kind() -> ValueKind {
                ValueKind::List(ScalarKind::$kind)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::List(list) if list.kind() == ScalarKind::$kind => list
                        .items()
                        .iter()
                        .map(<$ty as ValueType>::from_value)
                        .collect(),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::List(ValueList {
                    kind: ScalarKind::$kind,
                    items: self.into_iter().map(ValueType::into_value).collect(),
                })
            }
        }

        impl From<Vec<$ty>> for Value {
            fn from(v: Vec<$ty>) -> Self {
                v.into_value()
            }
        }
    };
}

list_type!(bool, Bool);
list_type!(i64, Int);
list_type!(i32, Int);
list_type!(u64, UInt);
list_type!(u32, UInt);
list_type!(f64, Real);
list_type!(String, String);
list_type!(Uri, Uri);
list_type!(NaiveDateTime, Date);

impl ValueType for ValueMap {
    fn value_kind() -> ValueKind {
        ValueKind::Map
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }

    fn into_value(self) -> Value {
        Value::Map(self)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Map(v)
    }
}

impl From<ValueList> for Value {
    fn from(v: ValueList) -> Self {
        Value::List(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        v.into_iter().map(str::to_string).collect::<Vec<String>>().into_value()
    }
}
