//! Host runtime values as seen in parameter defaults.
//!
//! [`Value`] mirrors the handful of Python value kinds that have a literal
//! spelling in R. Anything else is carried as an [`Value::Object`] holding
//! the host's own `repr`, which the renderer emits unchanged.

use indexmap::IndexMap;

/// A default value captured from a host callable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `None`.
    Null,
    Bool(bool),
    Int(i64),
    /// An integer outside the `i64` range, as its decimal digits.
    BigInt { digits: String },
    Float(f64),
    Str(String),
    /// An ordered, list-like sequence.
    List(Vec<Value>),
    /// A tuple. Rendered the same way as a set.
    Tuple(Vec<Value>),
    /// A set, in the host's iteration order.
    Set(Vec<Value>),
    /// A mapping, in declaration order. Keys are the host's `str()` of the key.
    Dict(IndexMap<String, Value>),
    /// A callable that carries a `__name__`.
    Callable { name: String },
    /// Any other object, represented by its host `repr`.
    Object { repr: String },
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(items.into_iter().collect())
    }

    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Dict(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn big_int(digits: impl Into<String>) -> Self {
        Value::BigInt {
            digits: digits.into(),
        }
    }

    pub fn callable(name: impl Into<String>) -> Self {
        Value::Callable { name: name.into() }
    }

    pub fn object(repr: impl Into<String>) -> Self {
        Value::Object { repr: repr.into() }
    }

    /// Short name of the value's kind, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::BigInt { .. } => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Dict(_) => "dict",
            Value::Callable { .. } => "callable",
            Value::Object { .. } => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_kind() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(3_i32), Value::Int(3));
        assert_eq!(Value::from(0.5_f64), Value::Float(0.5));
        assert_eq!(Value::from("x"), Value::Str("x".to_string()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(
            Value::from(vec![1_i64, 2]),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn dict_keeps_declaration_order() {
        let value = Value::dict([("z", Value::Int(1)), ("a", Value::Int(2))]);
        let Value::Dict(map) = value else {
            panic!("expected a dict");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Set(vec![]).kind(), "set");
        assert_eq!(Value::callable("f").kind(), "callable");
        assert_eq!(Value::big_int("1180591620717411303424").kind(), "int");
    }
}
