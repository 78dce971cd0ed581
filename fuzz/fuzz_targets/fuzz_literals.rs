#![no_main]
use arbitrary::Arbitrary;
use extjson::{ErrorKind, NumberError, Value, from_str};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    long: i64,
    quoted: bool,
    spaces: u8,
}

fuzz_target!(|input: Input| {
    let pad = " ".repeat(usize::from(input.spaces % 4));
    let arg = if input.quoted {
        format!("\"{}\"", input.long)
    } else {
        input.long.to_string()
    };

    let long = from_str(&format!("NumberLong{pad}({pad}{arg}{pad})"));
    assert_eq!(long, Ok(Value::NumberLong(input.long)));

    let int = from_str(&format!("NumberInt{pad}({pad}{arg}{pad})"));
    match i32::try_from(input.long) {
        Ok(n) => assert_eq!(int, Ok(Value::NumberInt(n))),
        Err(_) => {
            let kind = int.map_err(extjson::DecodeError::into_kind);
            assert!(
                matches!(
                    kind,
                    Err(ErrorKind::Number(NumberError::OutOfRange { target: "int32", .. }))
                ),
                "{kind:?}"
            );
        }
    }
});
