//! JSON5 value types and utilities.
//!
//! This module defines the [`Value`] enum, the tree produced by
//! [`parse`](crate::parse), and the text encoder behind its `Display` impl.
use core::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{SyntaxError, parse};

/// Object members, in the order they first appeared in the source.
pub type Map = IndexMap<String, Value>;
/// Array elements, in source order.
pub type Array = Vec<Value>;

/// A decoded JSON5 value.
///
/// Integers and floats are kept apart: a number token without a fraction or
/// exponent decodes to [`Value::Integer`], anything else to [`Value::Float`].
///
/// `Display` writes canonical JSON, which is also valid JSON5 and re-parses to
/// an equal value with the default [`ParserOptions`](crate::ParserOptions).
///
/// # Examples
///
/// ```
/// use json5_parse::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// map.insert("n".to_string(), Value::Integer(3));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value","n":3}"#);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// A number written without fraction or exponent.
    Integer(i64),
    /// A number written with a fraction or exponent.
    Float(f64),
    /// A decoded string.
    String(String),
    /// An array.
    Array(Array),
    /// An object, in source member order.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl FromStr for Value {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use json5_parse::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Integer`] or [`Float`].
    ///
    /// [`Integer`]: Value::Integer
    /// [`Float`]: Value::Float
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Float(..))
    }

    /// Returns the boolean if this is a [`Value::Boolean`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Integer`]. Floats are not
    /// narrowed.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as `f64`, widening integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use json5_parse::Value;
    ///
    /// assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
    /// assert_eq!(Value::Null.as_f64(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string contents if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the members if this is a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use json5_parse::{Value, parse};
    ///
    /// let v = parse(r#"{"a": {"b": true}}"#).unwrap();
    /// assert_eq!(v.get("a").and_then(|a| a.get("b")), Some(&Value::Boolean(true)));
    /// assert_eq!(v.get("missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }
}

/// Escapes a string for inclusion between double quotes.
///
/// Only the escapes the lexer decodes by default are produced, so the output
/// re-parses without enabling `\u` escapes. Control characters without a
/// short escape are written raw, which the default options accept.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    let mut start = 0;
    for (i, c) in src.char_indices() {
        let escape = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\u{0008}' => "\\b",
            '\u{000C}' => "\\f",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            _ => continue,
        };
        f.write_str(&src[start..i])?;
        f.write_str(escape)?;
        start = i + c.len_utf8();
    }
    f.write_str(&src[start..])
}

fn write_float<W: fmt::Write>(n: f64, f: &mut W) -> fmt::Result {
    if n.is_finite() {
        // `Debug` always keeps a `.` or an exponent, so the number re-lexes
        // as a float rather than an integer.
        write!(f, "{n:?}")
    } else {
        f.write_str("null")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write_float(*n, f),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Value::Null, "null")]
    #[case(Value::Boolean(true), "true")]
    #[case(Value::Integer(-10), "-10")]
    #[case(Value::Float(1.0), "1.0")]
    #[case(Value::Float(0.2), "0.2")]
    #[case(Value::Float(3.14e8), "314000000.0")]
    #[case(Value::Float(1e300), "1e300")]
    #[case(Value::Float(-2.5e-9), "-2.5e-9")]
    #[case(Value::Float(f64::NAN), "null")]
    #[case(Value::String("a\"b\\c".into()), r#""a\"b\\c""#)]
    #[case(Value::String("\u{8}\u{c}\n\r\t".into()), r#""\b\f\n\r\t""#)]
    #[case(Value::String("/ \u{1} é".into()), "\"/ \u{1} é\"")]
    fn display_scalars(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn display_preserves_member_order() {
        let mut map = Map::new();
        map.insert("z".into(), Value::Integer(1));
        map.insert("a".into(), Value::Array(vec![Value::Null, Value::Boolean(false)]));
        assert_eq!(Value::Object(map).to_string(), r#"{"z":1,"a":[null,false]}"#);
    }

    #[test]
    fn object_equality_ignores_member_order() {
        let a: Value = r#"{"x": 1, "y": 2}"#.parse().unwrap();
        let b: Value = r#"{"y": 2, "x": 1}"#.parse().unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_plain_json_shapes() {
        let v: Value = r#"{"a": [1, 2.5, "s", null, false]}"#.parse().unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"a":[1,2.5,"s",null,false]}"#);
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), v);
    }

    #[test]
    fn accessors() {
        let v: Value = r#"{"s": "str", "i": 4, "f": 1.5, "b": true, "a": []}"#
            .parse()
            .unwrap();
        assert_eq!(v.get("s").and_then(Value::as_str), Some("str"));
        assert_eq!(v.get("i").and_then(Value::as_i64), Some(4));
        assert_eq!(v.get("f").and_then(Value::as_f64), Some(1.5));
        assert_eq!(v.get("b").and_then(Value::as_bool), Some(true));
        assert_eq!(v.get("a").and_then(Value::as_array).map(Vec::len), Some(0));
        assert!(v.get("i").is_some_and(Value::is_number));
        assert!(Value::default().is_null());
    }
}
