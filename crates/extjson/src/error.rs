use alloc::string::String;
use core::{ascii, fmt};

use thiserror::Error;

use crate::{number::NumberError, value::ValueKind};

/// A failed decode: what went wrong and where.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("at byte {offset}: {kind}")]
pub struct DecodeError {
    pub(crate) kind: ErrorKind,
    /// Index of the last input byte examined before the failure, or the
    /// input length if the input ended early.
    pub offset: usize,
}

impl DecodeError {
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("expected {expected} argument{} to {constructor} constructor, but {actual} received", plural(.expected))]
    Arity {
        constructor: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("expected {expected} for argument {position} of {constructor} constructor, got {received} (value was {value})")]
    ArgumentType {
        constructor: &'static str,
        position: usize,
        expected: &'static str,
        received: ValueKind,
        value: String,
    },
    #[error(transparent)]
    Number(#[from] NumberError),
    #[error("cannot store {produced} value into {declared} type")]
    DestinationType {
        produced: &'static str,
        declared: &'static str,
    },
    #[error("cannot unmarshal {value} into {declared} type")]
    UnmarshalType {
        value: ValueKind,
        declared: &'static str,
    },
    #[error("JSON decoder out of sync: unexpected {0:?}")]
    Phase(crate::scanner::ScanAction),
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 { "" } else { "s" }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("invalid character {found} {context}")]
    InvalidCharacter {
        found: QuotedChar,
        context: ScanContext,
    },
    #[error("invalid character {found} in literal {literal} (expecting {expected})")]
    InvalidLiteral {
        found: QuotedChar,
        literal: &'static str,
        expected: Expected,
    },
    #[error("unexpected end of JSON input")]
    UnexpectedEnd,
    #[error("exceeded max depth")]
    ExceededMaxDepth,
    #[error("expected beginning of constructor")]
    ExpectedConstructor,
}

/// An input byte rendered the way diagnostics quote it: `'x'`, `'\n'`,
/// `'\xff'`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct QuotedChar(pub u8);

impl fmt::Display for QuotedChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", ascii::escape_default(self.0))
    }
}

impl fmt::Debug for QuotedChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The bytes a literal matcher would have accepted at the failing position.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Expected(pub &'static [u8]);

impl Expected {
    #[must_use]
    pub fn contains(&self, b: u8) -> bool {
        self.0.contains(&b)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.0.len().saturating_sub(1);
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(if i == last { " or " } else { ", " })?;
            }
            QuotedChar(*b).fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Where the scanner was when it met a byte it could not accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanContext {
    BeginningOfValue,
    BeginningOfObjectKey,
    AfterObjectKey,
    AfterObjectValue,
    AfterArrayElement,
    AfterConstructorArgument,
    AfterTopLevelValue,
    BeginningOfConstructor,
    InStringLiteral,
    InStringEscape,
    InUnicodeEscape,
    InNumericLiteral,
    AfterDecimalPoint,
    InExponent,
}

impl fmt::Display for ScanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanContext::BeginningOfValue => "looking for beginning of value",
            ScanContext::BeginningOfObjectKey => "looking for beginning of object key string",
            ScanContext::AfterObjectKey => "after object key",
            ScanContext::AfterObjectValue => "after object key:value pair",
            ScanContext::AfterArrayElement => "after array element",
            ScanContext::AfterConstructorArgument => "after constructor argument",
            ScanContext::AfterTopLevelValue => "after top-level value",
            ScanContext::BeginningOfConstructor => "looking for beginning of constructor",
            ScanContext::InStringLiteral => "in string literal",
            ScanContext::InStringEscape => "in string escape code",
            ScanContext::InUnicodeEscape => "in \\u hexadecimal character escape",
            ScanContext::InNumericLiteral => "in numeric literal",
            ScanContext::AfterDecimalPoint => "after decimal point in numeric literal",
            ScanContext::InExponent => "in exponent of numeric literal",
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn expected_lists_alternatives() {
        assert_eq!(Expected(b"m").to_string(), "'m'");
        assert_eq!(Expected(b"IL").to_string(), "'I' or 'L'");
        assert_eq!(Expected(b"ILD").to_string(), "'I', 'L' or 'D'");
    }

    #[test]
    fn quoted_char_escapes_control_and_high_bytes() {
        assert_eq!(QuotedChar(b'x').to_string(), "'x'");
        assert_eq!(QuotedChar(b'\n').to_string(), "'\\n'");
        assert_eq!(QuotedChar(0xff).to_string(), "'\\xff'");
    }

    #[test]
    fn arity_message_pluralizes() {
        let one = ErrorKind::Arity {
            constructor: "NumberInt",
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            one.to_string(),
            "expected 1 argument to NumberInt constructor, but 2 received"
        );
        let two = ErrorKind::Arity {
            constructor: "Timestamp",
            expected: 2,
            actual: 0,
        };
        assert_eq!(
            two.to_string(),
            "expected 2 arguments to Timestamp constructor, but 0 received"
        );
    }
}
