//! A decoder for extended JSON: ordinary JSON plus the constructor-style
//! literals `NumberInt(...)`, `NumberLong(...)` and `NumberDecimal(...)`.
//!
//! ```rust
//! use extjson::{Value, from_str};
//!
//! let v = from_str(r#"{"a": NumberInt(5), "b": NumberDecimal("1.50")}"#).unwrap();
//! let Value::Object(map) = v else { unreachable!() };
//! assert_eq!(map["a"], Value::NumberInt(5));
//! assert_eq!(map["b"].to_string(), r#"NumberDecimal("1.50")"#);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decimal;
mod decode;
mod error;
mod number;
mod options;
mod scanner;
mod slot;
mod value;

#[cfg(test)]
mod tests;

pub use decimal::{Decimal128, ParseDecimalError};
pub use decode::{Decoder, Values, from_str, from_str_into, from_str_with};
pub use error::{DecodeError, ErrorKind, Expected, QuotedChar, ScanContext, SyntaxError};
pub use number::{Number, NumberError};
pub use options::DecoderOptions;
pub use scanner::{ExtendedLiteral, Keyword, Matched, Resume, ScanAction, Scanner};
pub use slot::{Slot, SlotType};
pub use value::{Array, Map, Value, ValueKind};
