#![expect(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use core::fmt::Write;

use extjson::{Decoder, DecoderOptions, Value, from_str, from_str_into, from_str_with};

/// One line per input: the decoded value or the full error message.
fn render(inputs: &[&str]) -> String {
    let mut out = String::new();
    for input in inputs {
        match from_str(input) {
            Ok(v) => writeln!(out, "{input} => {v}").unwrap(),
            Err(e) => writeln!(out, "{input} => error: {e}").unwrap(),
        }
    }
    out
}

#[test]
fn snapshot_accepted_literals() {
    let inputs = [
        r#"NumberInt(5)"#,
        r#"NumberInt("-5")"#,
        r#"NumberLong(123456789012)"#,
        r#"NumberDecimal("1.50")"#,
        r#"NumberDecimal(1E+3)"#,
        r#"NumberDecimal("-0")"#,
        r#"{"a" : NumberInt ( 1 ) }"#,
    ];
    insta::assert_snapshot!(render(&inputs), @r#"
    NumberInt(5) => NumberInt(5)
    NumberInt("-5") => NumberInt(-5)
    NumberLong(123456789012) => NumberLong(123456789012)
    NumberDecimal("1.50") => NumberDecimal("1.50")
    NumberDecimal(1E+3) => NumberDecimal("1E+3")
    NumberDecimal("-0") => NumberDecimal("-0")
    {"a" : NumberInt ( 1 ) } => {"a":NumberInt(1)}
    "#);
}

#[test]
fn snapshot_syntax_errors() {
    let inputs = [
        "Numx",
        "Numberx",
        "NumberLonk(1)",
        "NumberInt 5",
        "NumberInt(abc)",
        "NumberInt(1 2)",
        "NumberInt(1",
        "[NumberInt(1)] x",
    ];
    insta::assert_snapshot!(render(&inputs), @r#"
    Numx => error: at byte 3: invalid character 'x' in literal Number (expecting 'b')
    Numberx => error: at byte 6: invalid character 'x' in literal NumberInt, NumberLong or NumberDecimal (expecting 'I', 'L' or 'D')
    NumberLonk(1) => error: at byte 9: invalid character 'k' in literal NumberLong (expecting 'g')
    NumberInt 5 => error: at byte 10: invalid character '5' looking for beginning of constructor
    NumberInt(abc) => error: at byte 10: invalid character 'a' looking for beginning of value
    NumberInt(1 2) => error: at byte 12: invalid character '2' after constructor argument
    NumberInt(1 => error: at byte 11: unexpected end of JSON input
    [NumberInt(1)] x => error: at byte 15: invalid character 'x' after top-level value
    "#);
}

#[test]
fn snapshot_argument_errors() {
    let inputs = [
        "NumberInt()",
        "NumberInt(1,2)",
        "NumberLong(true)",
        r#"NumberInt("1.5")"#,
        "NumberInt(2147483648)",
        r#"NumberLong("9223372036854775808")"#,
        r#"NumberDecimal("abc")"#,
        r#"NumberDecimal("1E+9999")"#,
        r#"NumberDecimal("1.5E-9223372036854775808")"#,
    ];
    insta::assert_snapshot!(render(&inputs), @r#"
    NumberInt() => error: at byte 10: expected 1 argument to NumberInt constructor, but 0 received
    NumberInt(1,2) => error: at byte 13: expected 1 argument to NumberInt constructor, but 2 received
    NumberLong(true) => error: at byte 15: expected number or string for argument 1 of NumberLong constructor, got bool (value was true)
    NumberInt("1.5") => error: at byte 15: cannot parse "1.5" as int32: not a base-10 integer
    NumberInt(2147483648) => error: at byte 20: value 2147483648 is out of range for int32
    NumberLong("9223372036854775808") => error: at byte 32: value 9223372036854775808 is out of range for int64
    NumberDecimal("abc") => error: at byte 19: cannot parse "abc" as decimal128: invalid decimal syntax
    NumberDecimal("1E+9999") => error: at byte 23: cannot parse "1E+9999" as decimal128: exponent overflow
    NumberDecimal("1.5E-9223372036854775808") => error: at byte 40: cannot parse "1.5E-9223372036854775808" as decimal128: exponent underflow
    "#);
}

#[test]
fn snapshot_destination_errors() {
    let mut out = String::new();

    let mut n = 0_i32;
    let err = from_str_into("NumberInt(1)", &mut n).unwrap_err();
    writeln!(out, "{err}").unwrap();

    let mut s = String::new();
    let err = from_str_into(r#"NumberDecimal("x")"#, &mut s).unwrap_err();
    writeln!(out, "{err}").unwrap();

    let mut f = 0.0_f64;
    let err = from_str_into("null", &mut f).unwrap_err();
    writeln!(out, "{err}").unwrap();

    insta::assert_snapshot!(out, @r#"
    at byte 8: cannot store int32 value into int32 type
    at byte 12: cannot store decimal128 value into string type
    at byte 3: cannot unmarshal null into float64 type
    "#);
}

#[test]
fn use_number_does_not_reach_inside_constructors() {
    let options = DecoderOptions {
        use_number: true,
        ..Default::default()
    };
    let v = from_str_with("[0.10, NumberLong(10), NumberDecimal(0.10)]", options).unwrap();
    assert_eq!(v.to_string(), r#"[0.10,NumberLong(10),NumberDecimal("0.10")]"#);

    let v = from_str("[0.10, NumberDecimal(0.10)]").unwrap();
    assert_eq!(v.to_string(), r#"[0.1,NumberDecimal("0.10")]"#);
}

#[test]
fn stream_of_documents() {
    let input = "NumberInt(1)\nNumberLong(2)\nNumberDecimal(\"3.0\")\n";
    let values: Vec<Value> = Decoder::new(input, DecoderOptions::default())
        .values()
        .collect::<Result<_, _>>()
        .unwrap();
    insta::assert_debug_snapshot!(values, @r#"
    [
        NumberInt(
            1,
        ),
        NumberLong(
            2,
        ),
        NumberDecimal(
            Decimal128(
                3.0,
            ),
        ),
    ]
    "#);
}
