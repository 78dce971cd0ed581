use alloc::{format, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{Decimal128, Map, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

/// A decimal128 built from a small coefficient and exponent, so it is
/// always representable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct SmallDecimal(pub(crate) Decimal128);

impl Arbitrary for SmallDecimal {
    fn arbitrary(g: &mut Gen) -> Self {
        let coefficient = i64::arbitrary(g);
        let exponent = i8::arbitrary(g) % 40;
        let text = format!("{coefficient}E{exponent}");
        match text.parse() {
            Ok(d) => Self(d),
            Err(e) => panic!("{text} did not parse: {e}"),
        }
    }
}

/// Values that render to text the default decoder reads back unchanged:
/// plain numbers are doubles, never preserved text.
impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Value {
            match usize::arbitrary(g) % 7 {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => Value::Double(JsonNumber::arbitrary(g).0),
                3 => Value::String(String::arbitrary(g)),
                4 => Value::NumberInt(i32::arbitrary(g)),
                5 => Value::NumberLong(i64::arbitrary(g)),
                _ => Value::NumberDecimal(SmallDecimal::arbitrary(g).0),
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 3 {
                0 => scalar(g),
                1 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect::<Vec<_>>())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 3;
        gen_val(g, depth)
    }
}
