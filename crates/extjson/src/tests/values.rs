use alloc::{string::{String, ToString}, vec, vec::Vec};

use crate::{Decoder, DecoderOptions, ErrorKind, Value, ValueKind, from_str_into};

fn all(input: &str) -> Vec<Result<Value, ErrorKind>> {
    Decoder::new(input, DecoderOptions::default())
        .values()
        .map(|r| r.map_err(crate::DecodeError::into_kind))
        .collect()
}

#[test]
fn several_documents() {
    assert_eq!(
        all(" 1 NumberInt(2)\n{}[3]NumberLong(\"4\") "),
        vec![
            Ok(Value::Double(1.0)),
            Ok(Value::NumberInt(2)),
            Ok(Value::Object(crate::Map::new())),
            Ok(Value::Array(vec![Value::Double(3.0)])),
            Ok(Value::NumberLong(4)),
        ]
    );
}

#[test]
fn empty_input_has_no_documents() {
    assert!(all("").is_empty());
    assert!(all(" \n\t").is_empty());
}

#[test]
fn stops_after_the_first_error() {
    let got = all("NumberInt(1) NumberInt(2147483648) NumberInt(3)");
    assert_eq!(got.len(), 2);
    assert_eq!(got[0], Ok(Value::NumberInt(1)));
    assert!(matches!(got[1], Err(ErrorKind::Number(_))));
}

#[test]
fn error_offsets_are_absolute() {
    let err = Decoder::new("[1] [2,,]", DecoderOptions::default())
        .values()
        .find_map(Result::err)
        .unwrap();
    assert_eq!(err.offset, 7);
}

#[test]
fn fixed_slots_take_ordinary_values() {
    let mut n = 0_i64;
    from_str_into("42", &mut n).unwrap();
    assert_eq!(n, 42);

    let mut s = String::new();
    from_str_into(r#""hi""#, &mut s).unwrap();
    assert_eq!(s, "hi");

    let mut b = false;
    from_str_into(" true ", &mut b).unwrap();
    assert!(b);

    let mut f = 0.0_f64;
    from_str_into("2.5", &mut f).unwrap();
    assert!((f - 2.5).abs() < f64::EPSILON);
}

#[test]
fn fixed_slot_mismatch_is_an_unmarshal_error() {
    let mut n = 0_i32;
    let err = from_str_into(r#""7""#, &mut n).unwrap_err();
    assert_eq!(
        err.into_kind(),
        ErrorKind::UnmarshalType {
            value: ValueKind::String,
            declared: "int32",
        }
    );

    let mut s = String::new();
    let err = from_str_into("[1]", &mut s).unwrap_err();
    assert_eq!(err.to_string(), "at byte 2: cannot unmarshal array into string type");
}

#[test]
fn dynamic_slot_takes_containers_with_literals() {
    let mut v = Value::Null;
    from_str_into(r#"[NumberInt(1), {"d": NumberDecimal("2")}]"#, &mut v).unwrap();
    assert_eq!(v.to_string(), r#"[NumberInt(1),{"d":NumberDecimal("2")}]"#);
}

#[test]
fn trailing_data_after_stored_value() {
    let mut v = Value::Null;
    assert!(from_str_into("NumberInt(1) 2", &mut v).is_err());
}
