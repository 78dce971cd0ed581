//! Unescaping of string literals the scanner has already validated.
use alloc::string::String;
use core::char::REPLACEMENT_CHARACTER;

/// Converts a quoted JSON string literal, quotes included, into its text.
///
/// Returns `None` only if `item` is not a well-formed literal, which the
/// scanner rules out. Unpaired surrogate escapes become U+FFFD.
pub(crate) fn unquote(item: &str) -> Option<String> {
    let body = item.strip_prefix('"')?.strip_suffix('"')?;
    if !body.contains('\\') {
        return Some(String::from(body));
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let first = hex4(&mut chars)?;
                let mut units = alloc::vec![first];
                // A high surrogate may be followed by the low half.
                if (0xD800..0xDC00).contains(&first) && chars.as_str().starts_with("\\u") {
                    let mut peek = chars.clone();
                    peek.nth(1);
                    let second = hex4(&mut peek)?;
                    if (0xDC00..0xE000).contains(&second) {
                        units.push(second);
                        chars = peek;
                    }
                }
                out.extend(
                    char::decode_utf16(units).map(|r| r.unwrap_or(REPLACEMENT_CHARACTER)),
                );
            }
            _ => return None,
        }
    }
    Some(out)
}

fn hex4(chars: &mut core::str::Chars<'_>) -> Option<u16> {
    let mut acc = 0u16;
    for _ in 0..4 {
        let d = chars.next()?.to_digit(16)?;
        acc = (acc << 4) | u16::try_from(d).ok()?;
    }
    Some(acc)
}
