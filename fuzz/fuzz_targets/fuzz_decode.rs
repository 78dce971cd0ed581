#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use extjson::{Decoder, DecoderOptions, from_str_with};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 1; // flags

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Most of the time, replace the input with a freshly generated document
/// full of extended literals; otherwise let libFuzzer mutate bytes.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let limit = max_size - prefix;
            prefix += append_whitespace(&mut data[prefix..], limit);
            let limit = max_size - prefix;
            prefix += append_value(&mut data[prefix..], size, limit);
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let n = rng.random_range(1..=limit.min(4));
        let mut written = 0;
        for _ in 0..n {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let doc = loop {
        let s = with_rng(|rng| rng.random_range(1..size.max(2) * 2));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(doc) = Doc::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break doc;
        }
    };
    let mut text = String::new();
    doc.render(&mut text);

    let len = text.len().min(limit);
    data[..len].copy_from_slice(&text.as_bytes()[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// A document shape that mixes ordinary JSON with the three literals, some
/// of them deliberately malformed.
#[derive(Debug, Arbitrary)]
enum Doc {
    Null,
    Bool(bool),
    Double(f64),
    Text(String),
    Int(i32, bool),
    Long(i64, bool),
    Decimal(i64, i16, bool),
    Misspelled(u8),
    Arity(Vec<i32>),
    Array(Vec<Doc>),
    Object(Vec<(String, Doc)>),
}

impl Doc {
    fn render(&self, out: &mut String) {
        let quote = |s: String, quoted: bool| if quoted { format!("\"{s}\"") } else { s };
        match self {
            Doc::Null => out.push_str("null"),
            Doc::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Doc::Double(f) => match serde_json::Number::from_f64(*f) {
                Some(n) => out.push_str(&n.to_string()),
                None => out.push('0'),
            },
            Doc::Text(s) => out.push_str(&serde_json::to_string(s).unwrap_or_default()),
            Doc::Int(n, q) => out.push_str(&format!("NumberInt({})", quote(n.to_string(), *q))),
            Doc::Long(n, q) => out.push_str(&format!("NumberLong({})", quote(n.to_string(), *q))),
            Doc::Decimal(c, e, q) => out.push_str(&format!(
                "NumberDecimal({})",
                quote(format!("{c}E{e}"), *q)
            )),
            Doc::Misspelled(b) => {
                let mut word = b"NumberInt".to_vec();
                let at = usize::from(*b) % word.len();
                word[at] = b'x';
                out.push_str(&String::from_utf8_lossy(&word));
                out.push_str("(1)");
            }
            Doc::Arity(args) => {
                let args: Vec<String> = args.iter().map(i32::to_string).collect();
                out.push_str(&format!("NumberLong({})", args.join(",")));
            }
            Doc::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.render(out);
                }
                out.push(']');
            }
            Doc::Object(members) => {
                out.push('{');
                for (i, (k, v)) in members.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&serde_json::to_string(k).unwrap_or_default());
                    out.push(':');
                    v.render(out);
                }
                out.push('}');
            }
        }
    }
}

fn decode(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let input = String::from_utf8_lossy(&data[HEADER..]).into_owned();
    let options = DecoderOptions {
        use_number: flags & 1 != 0,
        max_depth: if flags & 2 != 0 { 8 } else { DecoderOptions::default().max_depth },
    };

    if let Ok(value) = from_str_with(&input, options) {
        // Whatever decodes must render to text that decodes to the same value.
        let rendered = value.to_string();
        let again = from_str_with(&rendered, options)
            .unwrap_or_else(|e| panic!("re-decoding {rendered:?} failed: {e}"));
        assert_eq!(again, value, "{rendered}");
    }

    if flags & 4 != 0 {
        for doc in Decoder::new(&input, options).values() {
            if let Err(e) = doc {
                assert!(e.offset <= input.len(), "{e} past end of {}", input.len());
            }
        }
    }
}

fuzz_target!(|data: &[u8]| decode(data));
