//! Dynamic document value type.

use std::collections::BTreeMap;

/// A dynamic document value.
///
/// This type represents any node a flagdb document can hold. Integer
/// leaves are 32-bit because that is the width the game engine reads;
/// map keys are always strings and are kept sorted, so encoding the
/// same logical document always yields the same bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// 32-bit float (encoded by bit pattern).
    F32(f32),
    /// Text string (UTF-8).
    Str(String),
    /// Array of values.
    Array(Vec<Value>),
    /// Map of string keys to values, sorted by key.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create a map value from key/value pairs.
    ///
    /// Later duplicates of a key overwrite earlier ones, as in a plain
    /// map literal.
    pub fn map<K: Into<String>>(pairs: Vec<(K, Value)>) -> Self {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Create an empty map value.
    #[must_use]
    pub fn empty_map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Get this value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as a signed integer, if it is one.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as an unsigned integer, if it is one.
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is one.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(x) => Some(*x),
            _ => None,
        }
    }

    /// Get this value as a string slice, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as an array, if it is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a key in this map value.
    ///
    /// Returns `None` if this value is not a map or the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::U32(n)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::F32(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(m: BTreeMap<String, Value>) -> Self {
        Value::Map(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_are_sorted() {
        let map = Value::map(vec![
            ("z", Value::I32(1)),
            ("a", Value::I32(2)),
            ("m", Value::I32(3)),
        ]);

        if let Value::Map(entries) = map {
            let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["a", "m", "z"]);
        } else {
            panic!("Expected Map");
        }
    }

    #[test]
    fn map_later_duplicate_wins() {
        let map = Value::map(vec![("k", Value::I32(1)), ("k", Value::I32(2))]);
        assert_eq!(map.get("k"), Some(&Value::I32(2)));
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::I32(42).as_bool(), None);

        assert_eq!(Value::I32(-7).as_i32(), Some(-7));
        assert_eq!(Value::U32(7).as_i32(), None);

        assert_eq!(Value::U32(0xdead_beef).as_u32(), Some(0xdead_beef));
        assert_eq!(Value::F32(1.5).as_f32(), Some(1.5));

        assert_eq!(Value::Str("hello".to_string()).as_str(), Some("hello"));
        assert_eq!(Value::Str("42".to_string()).as_i32(), None);

        let arr = Value::Array(vec![Value::I32(1), Value::I32(2)]);
        assert_eq!(arr.as_array().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn map_get() {
        let map = Value::map(vec![
            ("name", Value::from("Ivy")),
            ("age", Value::I32(30)),
        ]);

        assert_eq!(map.get("name"), Some(&Value::Str("Ivy".to_string())));
        assert_eq!(map.get("age"), Some(&Value::I32(30)));
        assert_eq!(map.get("missing"), None);
        assert_eq!(Value::I32(1).get("name"), None);
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::I32(42));
        assert_eq!(Value::from(42u32), Value::U32(42));
        assert_eq!(Value::from(0.5f32), Value::F32(0.5));
        assert_eq!(Value::from("hello"), Value::Str("hello".to_string()));
        assert_eq!(
            Value::from("hello".to_string()),
            Value::Str("hello".to_string())
        );
        assert_eq!(
            Value::from(vec![1i32, 2, 3]),
            Value::Array(vec![Value::I32(1), Value::I32(2), Value::I32(3)])
        );
    }
}
