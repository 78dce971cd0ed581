//! Transition states for recognizing `NumberInt`, `NumberLong` and
//! `NumberDecimal`.
//!
//! The base scanner hands over once it has read `Nu` in a value position.
//! All three keywords share the `Number` prefix and diverge at the next
//! byte, so a single byte of lookahead decides; there is no backtracking.
use super::keyword::{Keyword, Resume};
use crate::error::{Expected, QuotedChar, SyntaxError};

/// The constructor-style literals this scanner recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtendedLiteral {
    NumberInt,
    NumberLong,
    NumberDecimal,
}

impl ExtendedLiteral {
    /// The keyword as written in the input.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ExtendedLiteral::NumberInt => "NumberInt",
            ExtendedLiteral::NumberLong => "NumberLong",
            ExtendedLiteral::NumberDecimal => "NumberDecimal",
        }
    }

    /// The type of value the literal produces.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            ExtendedLiteral::NumberInt => "int32",
            ExtendedLiteral::NumberLong => "int64",
            ExtendedLiteral::NumberDecimal => "decimal128",
        }
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "NumberInt" => Some(ExtendedLiteral::NumberInt),
            "NumberLong" => Some(ExtendedLiteral::NumberLong),
            "NumberDecimal" => Some(ExtendedLiteral::NumberDecimal),
            _ => None,
        }
    }
}

pub(crate) const TRUE: Keyword = Keyword::new("true", b"rue", Resume::EndValue);
pub(crate) const FALSE: Keyword = Keyword::new("false", b"alse", Resume::EndValue);
pub(crate) const NULL: Keyword = Keyword::new("null", b"ull", Resume::EndValue);

/// After a leading `N`.
pub(crate) const UPPER_N: Keyword = Keyword::new("Number", b"u", Resume::UpperNu);
/// After `Num`.
pub(crate) const NUMBER: Keyword = Keyword::new("Number", b"ber", Resume::AfterNumber);
/// After `NumberI`.
pub(crate) const NUMBER_INT: Keyword = Keyword::new(
    "NumberInt",
    b"nt",
    Resume::Constructor(ExtendedLiteral::NumberInt),
);
/// After `NumberL`.
pub(crate) const NUMBER_LONG: Keyword = Keyword::new(
    "NumberLong",
    b"ong",
    Resume::Constructor(ExtendedLiteral::NumberLong),
);
/// After `NumberD`.
pub(crate) const NUMBER_DECIMAL: Keyword = Keyword::new(
    "NumberDecimal",
    b"ecimal",
    Resume::Constructor(ExtendedLiteral::NumberDecimal),
);

/// The state after reading `Nu`.
pub(crate) fn after_upper_nu(c: u8) -> Result<Keyword, SyntaxError> {
    if c == b'm' {
        return Ok(NUMBER);
    }
    Err(SyntaxError::InvalidLiteral {
        found: QuotedChar(c),
        literal: "Number",
        expected: Expected(b"m"),
    })
}

/// The state after reading `Number`.
pub(crate) fn after_number(c: u8) -> Result<Keyword, SyntaxError> {
    match c {
        b'I' => Ok(NUMBER_INT),
        b'L' => Ok(NUMBER_LONG),
        b'D' => Ok(NUMBER_DECIMAL),
        _ => Err(SyntaxError::InvalidLiteral {
            found: QuotedChar(c),
            literal: "NumberInt, NumberLong or NumberDecimal",
            expected: Expected(b"ILD"),
        }),
    }
}
