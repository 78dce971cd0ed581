//! Textual numbers and their checked conversions.
//!
//! A [`Number`] keeps the exact source text of a numeric literal (or of a
//! quoted string standing in for one) so that the constructor literals can
//! decide for themselves how to read it: `NumberInt` and `NumberLong` parse
//! it as a base-10 integer of their width, `NumberDecimal` hands the text
//! unchanged to the decimal128 parser.
//!
//! Conversions are stateless. Nothing is cached, and text is never trimmed:
//! `" 5"` is not an integer.
use alloc::string::{String, ToString};
use core::{
    fmt,
    num::{IntErrorKind, ParseIntError},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    Value,
    decimal::{Decimal128, ParseDecimalError},
};

/// A numeric literal captured as text.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Number(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("cannot parse {text:?} as {target}: not a base-10 integer")]
    NotAnInteger { target: &'static str, text: String },
    #[error("value {text} is out of range for {target}")]
    OutOfRange { target: &'static str, text: String },
    #[error("cannot parse {text:?} as decimal128: {source}")]
    Decimal {
        text: String,
        source: ParseDecimalError,
    },
}

impl NumberError {
    /// Name of the numeric type the conversion targeted.
    #[must_use]
    pub fn target(&self) -> &'static str {
        match self {
            NumberError::NotAnInteger { target, .. } | NumberError::OutOfRange { target, .. } => {
                target
            }
            NumberError::Decimal { .. } => "decimal128",
        }
    }
}

impl Number {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Parses the text as a base-10 `i32`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotAnInteger`] if the text is not an integer,
    /// [`NumberError::OutOfRange`] if it does not fit in 32 bits.
    pub fn to_i32(&self) -> Result<i32, NumberError> {
        parse_int(&self.0, "int32")
    }

    /// Parses the text as a base-10 `i64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotAnInteger`] if the text is not an integer,
    /// [`NumberError::OutOfRange`] if it does not fit in 64 bits.
    pub fn to_i64(&self) -> Result<i64, NumberError> {
        parse_int(&self.0, "int64")
    }

    /// Parses the text as a finite `f64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::OutOfRange`] if the text does not denote a finite
    /// `f64`.
    pub fn to_f64(&self) -> Result<f64, NumberError> {
        match self.0.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(NumberError::OutOfRange {
                target: "float64",
                text: self.0.clone(),
            }),
        }
    }

    /// Hands the raw text to the decimal128 parser.
    ///
    /// # Errors
    ///
    /// [`NumberError::Decimal`] wrapping whatever the parser rejected.
    pub fn to_decimal128(&self) -> Result<Decimal128, NumberError> {
        self.0
            .parse::<Decimal128>()
            .map_err(|source| NumberError::Decimal {
                text: self.0.clone(),
                source,
            })
    }
}

fn parse_int<T>(text: &str, target: &'static str) -> Result<T, NumberError>
where
    T: FromStr<Err = ParseIntError>,
{
    text.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumberError::OutOfRange {
            target,
            text: text.to_string(),
        },
        _ => NumberError::NotAnInteger {
            target,
            text: text.to_string(),
        },
    })
}

impl From<String> for Number {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Number {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Accepts the two argument shapes a numeric constructor takes: a
/// preserved numeric literal or a string. Anything else is handed back.
impl TryFrom<Value> for Number {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n),
            Value::String(s) => Ok(Number(s)),
            other => Err(other),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
