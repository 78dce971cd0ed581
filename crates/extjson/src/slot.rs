//! Destinations a decoded value can be stored into.
//!
//! A [`Slot`] says up front whether it accepts any [`Value`] or only one
//! concrete type. The extended literals (`NumberInt`, `NumberLong`,
//! `NumberDecimal`) are only ever stored into dynamic slots; asking a fixed
//! slot to take one fails before the constructor is read.
use alloc::string::String;

use crate::Value;

/// What a [`Slot`] is able to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    /// Any [`Value`], stored as is.
    Dynamic,
    /// One concrete type, named for diagnostics (`int32`, `string`, ...).
    Fixed(&'static str),
}

impl SlotType {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SlotType::Dynamic => "dynamic",
            SlotType::Fixed(name) => name,
        }
    }
}

/// A caller-supplied destination for [`Decoder::decode_into`].
///
/// `put` hands the value back when it cannot be stored, so the decoder can
/// report what kind it was.
///
/// # Examples
///
/// ```
/// use extjson::{DecoderOptions, Decoder, Value};
///
/// let mut v = Value::Null;
/// Decoder::new("NumberLong(7)", DecoderOptions::default())
///     .decode_into(&mut v)
///     .unwrap();
/// assert_eq!(v, Value::NumberLong(7));
///
/// let mut n = 0_i64;
/// let err = Decoder::new("NumberLong(7)", DecoderOptions::default())
///     .decode_into(&mut n)
///     .unwrap_err();
/// assert_eq!(err.to_string(), "at byte 9: cannot store int64 value into int64 type");
/// ```
///
/// [`Decoder::decode_into`]: crate::Decoder::decode_into
pub trait Slot {
    fn slot_type(&self) -> SlotType;

    /// Stores `value`, or returns it unchanged if it does not fit.
    ///
    /// # Errors
    ///
    /// The rejected value.
    fn put(&mut self, value: Value) -> Result<(), Value>;
}

impl Slot for Value {
    fn slot_type(&self) -> SlotType {
        SlotType::Dynamic
    }

    fn put(&mut self, value: Value) -> Result<(), Value> {
        *self = value;
        Ok(())
    }
}

impl Slot for Option<Value> {
    fn slot_type(&self) -> SlotType {
        SlotType::Dynamic
    }

    fn put(&mut self, value: Value) -> Result<(), Value> {
        *self = Some(value);
        Ok(())
    }
}

impl Slot for bool {
    fn slot_type(&self) -> SlotType {
        SlotType::Fixed("bool")
    }

    fn put(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::Boolean(b) => {
                *self = b;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Slot for String {
    fn slot_type(&self) -> SlotType {
        SlotType::Fixed("string")
    }

    fn put(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::String(s) => {
                *self = s;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Slot for f64 {
    fn slot_type(&self) -> SlotType {
        SlotType::Fixed("float64")
    }

    fn put(&mut self, value: Value) -> Result<(), Value> {
        let parsed = match &value {
            Value::Double(f) => Some(*f),
            Value::Number(n) => n.to_f64().ok(),
            _ => None,
        };
        match parsed {
            Some(f) => {
                *self = f;
                Ok(())
            }
            None => Err(value),
        }
    }
}

/// Integers take a plain number only when it is integral and in range.
macro_rules! integer_slot {
    ($ty:ty, $name:literal, $from_text:ident) => {
        impl Slot for $ty {
            fn slot_type(&self) -> SlotType {
                SlotType::Fixed($name)
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            fn put(&mut self, value: Value) -> Result<(), Value> {
                let parsed = match &value {
                    Value::Number(n) => n.$from_text().ok(),
                    Value::Double(f)
                        if f.fract() == 0.0
                            && *f >= <$ty>::MIN as f64
                            && *f < -(<$ty>::MIN as f64) =>
                    {
                        Some(*f as $ty)
                    }
                    _ => None,
                };
                match parsed {
                    Some(n) => {
                        *self = n;
                        Ok(())
                    }
                    None => Err(value),
                }
            }
        }
    };
}

integer_slot!(i32, "int32", to_i32);
integer_slot!(i64, "int64", to_i64);
