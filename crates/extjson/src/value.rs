//! Dynamically-typed extended-JSON values.
//!
//! [`Value`] is what the decoder produces for a dynamic destination. Next to
//! the ordinary JSON types it carries the three typed numeric literals and a
//! text-preserving [`Number`].
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use crate::{decimal::Decimal128, number::Number};

pub type Map = BTreeMap<String, Value>;
pub type Array = Vec<Value>;

/// An extended-JSON value.
///
/// # Examples
///
/// ```
/// use extjson::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("n".to_string(), Value::NumberInt(5));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"n":NumberInt(5)}"#);
/// ```
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    /// A plain JSON number read as a double.
    Double(f64),
    /// A plain JSON number with its source text preserved.
    Number(Number),
    String(String),
    Array(Array),
    Object(Map),
    /// `NumberInt(...)`
    NumberInt(i32),
    /// `NumberLong(...)`
    NumberLong(i64),
    /// `NumberDecimal(...)`
    NumberDecimal(Decimal128),
}

/// The variant of a [`Value`], named for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Double,
    Number,
    String,
    Array,
    Object,
    NumberInt,
    NumberLong,
    NumberDecimal,
}

impl ValueKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "bool",
            ValueKind::Double => "float64",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::NumberInt => "int32",
            ValueKind::NumberLong => "int64",
            ValueKind::NumberDecimal => "decimal128",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::NumberInt(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::NumberLong(v)
    }
}

impl From<Decimal128> for Value {
    fn from(v: Decimal128) -> Self {
        Self::NumberDecimal(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
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

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Double(_) => ValueKind::Double,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::NumberInt(_) => ValueKind::NumberInt,
            Value::NumberLong(_) => ValueKind::NumberLong,
            Value::NumberDecimal(_) => ValueKind::NumberDecimal,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer if this is a `NumberInt` or a `NumberLong`.
    ///
    /// # Examples
    ///
    /// ```
    /// use extjson::Value;
    ///
    /// assert_eq!(Value::NumberInt(7).as_i64(), Some(7));
    /// assert_eq!(Value::NumberLong(-7).as_i64(), Some(-7));
    /// assert_eq!(Value::Double(7.0).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::NumberInt(n) => Some(i64::from(*n)),
            Value::NumberLong(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_decimal128(&self) -> Option<Decimal128> {
        match self {
            Value::NumberDecimal(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Escapes a string for inclusion in a JSON string literal.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Escape Unicode line separators which pre-2019 JSON parsers may not handle correctly
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Renders extended JSON that decodes back to the same value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Double(n) => write!(f, "{n}"),
            Value::Number(n) => write!(f, "{n}"),
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
            Value::NumberInt(n) => write!(f, "NumberInt({n})"),
            Value::NumberLong(n) => write!(f, "NumberLong({n})"),
            Value::NumberDecimal(d) => write!(f, "NumberDecimal(\"{d}\")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn display_renders_extended_literals() {
        let v = Value::Array(vec![
            Value::NumberInt(-1),
            Value::NumberLong(i64::MAX),
            Value::NumberDecimal("1.50".parse().unwrap()),
            Value::String("a\"b\n".into()),
        ]);
        assert_eq!(
            v.to_string(),
            r#"[NumberInt(-1),NumberLong(9223372036854775807),NumberDecimal("1.50"),"a\"b\n"]"#
        );
    }

    #[test]
    fn serde_shape_is_externally_tagged() {
        assert_eq!(
            serde_json::to_string(&Value::NumberInt(5)).unwrap(),
            r#"{"NumberInt":5}"#
        );
        assert_eq!(
            serde_json::to_string(&Value::Number(Number::from("1.0"))).unwrap(),
            r#"{"Number":"1.0"}"#
        );
    }
}
