//! IEEE 754-2008 decimal128 values in the binary integer decimal (BID)
//! encoding.
//!
//! Only what the decoder needs is here: parsing from text, rendering back
//! to text, and access to the raw bits. There is no arithmetic.
//!
//! Layout of a finite value whose coefficient fits in 113 bits (the only
//! canonical form for decimal128):
//!
//! ```text
//!  127  126 ........ 113  112 .................. 0
//! sign  biased exponent   coefficient (< 10^34)
//! ```
use alloc::string::ToString;
use core::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use thiserror::Error;

const MAX_DIGITS: usize = 34;
const MAX_COEFFICIENT: u128 = 9_999_999_999_999_999_999_999_999_999_999;
const EXPONENT_MAX: i64 = 6111;
const EXPONENT_MIN: i64 = -6176;
const EXPONENT_BIAS: i64 = 6176;

const SIGN_BIT: u128 = 1 << 127;
const INFINITY_BITS: u128 = 0x1E << 122;
const NAN_BITS: u128 = 0x1F << 122;
const COEFFICIENT_MASK: u128 = (1 << 113) - 1;

/// A 128-bit decimal floating-point value.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal128(u128);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseDecimalError {
    #[error("invalid decimal syntax")]
    InvalidSyntax,
    #[error("more than 34 significant digits")]
    Inexact,
    #[error("exponent overflow")]
    Overflow,
    #[error("exponent underflow")]
    Underflow,
}

enum Parts {
    NaN,
    Infinity,
    Finite { coefficient: u128, exponent: i64 },
}

impl Decimal128 {
    pub const NAN: Decimal128 = Decimal128(NAN_BITS);
    pub const INFINITY: Decimal128 = Decimal128(INFINITY_BITS);
    pub const NEG_INFINITY: Decimal128 = Decimal128(SIGN_BIT | INFINITY_BITS);

    #[must_use]
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn to_bits(self) -> u128 {
        self.0
    }

    /// The 16-byte little-endian form used by BSON.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_le_bytes(bytes))
    }

    #[must_use]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_BIT != 0
    }

    #[must_use]
    pub fn is_nan(self) -> bool {
        matches!(self.parts(), Parts::NaN)
    }

    #[must_use]
    pub fn is_infinite(self) -> bool {
        matches!(self.parts(), Parts::Infinity)
    }

    fn parts(self) -> Parts {
        let combination = (self.0 >> 122) & 0x1F;
        if combination == 0x1F {
            return Parts::NaN;
        }
        if combination == 0x1E {
            return Parts::Infinity;
        }
        let (biased, coefficient) = if (self.0 >> 125) & 0b11 == 0b11 {
            // Implied `100` coefficient prefix: always above 10^34 - 1.
            ((self.0 >> 111) & 0x3FFF, 0)
        } else {
            let coefficient = self.0 & COEFFICIENT_MASK;
            let coefficient = if coefficient > MAX_COEFFICIENT { 0 } else { coefficient };
            ((self.0 >> 113) & 0x3FFF, coefficient)
        };
        let biased = i64::try_from(biased).unwrap_or_default();
        Parts::Finite {
            coefficient,
            exponent: biased - EXPONENT_BIAS,
        }
    }
}

impl FromStr for Decimal128 {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (SIGN_BIT, &s[1..]),
            Some(b'+') => (0, &s[1..]),
            _ => (0, s),
        };

        if unsigned.eq_ignore_ascii_case("nan") {
            return Ok(Self::NAN);
        }
        if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
            return Ok(Self(sign | INFINITY_BITS));
        }
        if !is_decimal_syntax(unsigned.as_bytes()) {
            return Err(ParseDecimalError::InvalidSyntax);
        }

        let Ok(parsed) = BigDecimal::from_str(unsigned) else {
            return Self::exponent_out_of_range(sign, unsigned);
        };
        let (coefficient, scale) = parsed.as_bigint_and_exponent();
        let mut digits = coefficient.to_string();
        let mut exponent = scale.checked_neg().ok_or(ParseDecimalError::Overflow)?;

        while digits.len() > MAX_DIGITS {
            if !digits.ends_with('0') {
                return Err(ParseDecimalError::Inexact);
            }
            digits.pop();
            exponent += 1;
        }

        let is_zero = digits == "0";
        if exponent > EXPONENT_MAX {
            if is_zero {
                exponent = EXPONENT_MAX;
            }
            while exponent > EXPONENT_MAX && digits.len() < MAX_DIGITS {
                digits.push('0');
                exponent -= 1;
            }
            if exponent > EXPONENT_MAX {
                return Err(ParseDecimalError::Overflow);
            }
        }
        if exponent < EXPONENT_MIN {
            if is_zero {
                exponent = EXPONENT_MIN;
            }
            while exponent < EXPONENT_MIN && digits.len() > 1 && digits.ends_with('0') {
                digits.pop();
                exponent += 1;
            }
            if exponent < EXPONENT_MIN {
                return Err(ParseDecimalError::Underflow);
            }
        }

        let coefficient = digits
            .parse::<u128>()
            .map_err(|_| ParseDecimalError::InvalidSyntax)?;
        let biased =
            u128::try_from(exponent + EXPONENT_BIAS).map_err(|_| ParseDecimalError::Underflow)?;
        Ok(Self(sign | (biased << 113) | coefficient))
    }
}

impl Decimal128 {
    /// Well-formed text whose exponent does not fit an `i64`. Only a zero
    /// coefficient survives, clamped to the nearest representable exponent.
    fn exponent_out_of_range(sign: u128, unsigned: &str) -> Result<Self, ParseDecimalError> {
        let (mantissa, exponent) = unsigned
            .split_once(['e', 'E'])
            .ok_or(ParseDecimalError::InvalidSyntax)?;
        let negative = exponent.starts_with('-');
        if mantissa.bytes().all(|b| b == b'0' || b == b'.') {
            let clamped = if negative { EXPONENT_MIN } else { EXPONENT_MAX };
            let biased = u128::try_from(clamped + EXPONENT_BIAS)
                .map_err(|_| ParseDecimalError::Underflow)?;
            return Ok(Self(sign | (biased << 113)));
        }
        Err(if negative {
            ParseDecimalError::Underflow
        } else {
            ParseDecimalError::Overflow
        })
    }
}

/// `digits ['.' digits] [('e' | 'E') ['+' | '-'] digits]`
fn is_decimal_syntax(s: &[u8]) -> bool {
    fn digits(s: &[u8]) -> usize {
        s.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let mut i = digits(s);
    if i == 0 {
        return false;
    }
    if s.get(i) == Some(&b'.') {
        let n = digits(&s[i + 1..]);
        if n == 0 {
            return false;
        }
        i += 1 + n;
    }
    if matches!(s.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(s.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = digits(&s[i..]);
        if n == 0 {
            return false;
        }
        i += n;
    }
    i == s.len()
}

impl fmt::Display for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (coefficient, exponent) = match self.parts() {
            Parts::NaN => return f.write_str("NaN"),
            Parts::Infinity if self.is_sign_negative() => return f.write_str("-Infinity"),
            Parts::Infinity => return f.write_str("Infinity"),
            Parts::Finite {
                coefficient,
                exponent,
            } => (coefficient, exponent),
        };

        if self.is_sign_negative() {
            f.write_str("-")?;
        }

        let digits = coefficient.to_string();
        let len = i64::try_from(digits.len()).unwrap_or(i64::MAX);
        let adjusted = exponent + len - 1;

        if exponent <= 0 && adjusted >= -6 {
            if exponent == 0 {
                return f.write_str(&digits);
            }
            let integral = len + exponent;
            if integral > 0 {
                let (head, tail) = digits.split_at(usize::try_from(integral).unwrap_or_default());
                write!(f, "{head}.{tail}")
            } else {
                f.write_str("0.")?;
                for _ in integral..0 {
                    f.write_str("0")?;
                }
                f.write_str(&digits)
            }
        } else {
            let (head, tail) = digits.split_at(1);
            f.write_str(head)?;
            if !tail.is_empty() {
                write!(f, ".{tail}")?;
            }
            if adjusted >= 0 {
                write!(f, "E+{adjusted}")
            } else {
                write!(f, "E{adjusted}")
            }
        }
    }
}

impl fmt::Debug for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Decimal128")
            .field(&format_args!("{self}"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1.50", "1.50")]
    #[case("0", "0")]
    #[case("-0", "-0")]
    #[case("0.000", "0.000")]
    #[case("123", "123")]
    #[case("+42", "42")]
    #[case("1e3", "1E+3")]
    #[case("1.5E-3", "0.0015")]
    #[case("0.0000001", "1E-7")]
    #[case("12345678901234567890123456789012340000", "1.234567890123456789012345678901234E+37")]
    #[case("NaN", "NaN")]
    #[case("-inf", "-Infinity")]
    #[case("Infinity", "Infinity")]
    #[case("9.999999999999999999999999999999999E+6144", "9.999999999999999999999999999999999E+6144")]
    fn parses_and_renders(#[case] text: &str, #[case] rendered: &str) {
        let d: Decimal128 = text.parse().unwrap();
        assert_eq!(d.to_string(), rendered);
    }

    #[rstest]
    #[case("", ParseDecimalError::InvalidSyntax)]
    #[case("abc", ParseDecimalError::InvalidSyntax)]
    #[case("1.", ParseDecimalError::InvalidSyntax)]
    #[case(".5", ParseDecimalError::InvalidSyntax)]
    #[case("1e", ParseDecimalError::InvalidSyntax)]
    #[case(" 1", ParseDecimalError::InvalidSyntax)]
    #[case("1_000", ParseDecimalError::InvalidSyntax)]
    #[case("12345678901234567890123456789012345", ParseDecimalError::Inexact)]
    #[case("1E+6145", ParseDecimalError::Overflow)]
    #[case("1E-6177", ParseDecimalError::Underflow)]
    #[case("1.5E-9223372036854775808", ParseDecimalError::Underflow)]
    #[case("1.5E+99999999999999999999", ParseDecimalError::Overflow)]
    #[case("-7E99999999999999999999", ParseDecimalError::Overflow)]
    fn rejects(#[case] text: &str, #[case] expected: ParseDecimalError) {
        assert_eq!(text.parse::<Decimal128>(), Err(expected));
    }

    #[test]
    fn clamps_exponent_when_exact() {
        // 1E+6112 fits once a zero moves into the coefficient.
        let d: Decimal128 = "1E+6112".parse().unwrap();
        assert_eq!(d.to_string(), "1.0E+6112");
        let z: Decimal128 = "0E-7000".parse().unwrap();
        assert_eq!(z.to_string(), "0E-6176");
        let z: Decimal128 = "0.00E-99999999999999999999".parse().unwrap();
        assert_eq!(z.to_string(), "0E-6176");
        let z: Decimal128 = "-0E+99999999999999999999".parse().unwrap();
        assert_eq!(z.to_string(), "-0E+6111");
    }

    #[test]
    fn bid_layout() {
        let one: Decimal128 = "1".parse().unwrap();
        assert_eq!(one.to_bits(), (6176u128 << 113) | 1);
        let neg: Decimal128 = "-1.50".parse().unwrap();
        assert!(neg.is_sign_negative());
        assert_eq!(neg.to_bits(), SIGN_BIT | (6174u128 << 113) | 150);
        assert_eq!(Decimal128::from_le_bytes(neg.to_le_bytes()), neg);
        assert!(Decimal128::NAN.is_nan());
        assert!(Decimal128::NEG_INFINITY.is_infinite());
    }
}
