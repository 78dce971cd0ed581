use core::fmt;

use bstr::ByteSlice;

use super::ExtendedLiteral;
use crate::error::Expected;

/// Where control goes once a keyword's last byte has matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// The keyword is a complete value (`true`, `false`, `null`).
    EndValue,
    /// `Nu` has been read; next comes the `m` of `Number`.
    UpperNu,
    /// `Number` has been read; next comes `I`, `L` or `D`.
    AfterNumber,
    /// A constructor keyword has been read; next comes `(`.
    Constructor(ExtendedLiteral),
}

/// What happened after feeding one more byte into a keyword matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matched {
    /// Byte matched, but the keyword is not finished yet.
    NeedMore(Keyword),
    /// Byte matched *and* it was the last one.
    Done(Resume),
    /// Byte did **not** match the expected byte.
    Reject(Expected),
}

/// A chain of single-byte states recognizing the tail of a keyword.
///
/// Built once from a keyword name (used in diagnostics), the bytes still
/// expected after whatever the scanner already matched, and the state to
/// continue in afterwards. Each [`step`](Keyword::step) compares exactly one
/// byte, case-sensitively, and yields the next link of the chain. A
/// `Keyword` is a plain value: copying one and driving the copy never
/// affects the original, so the prebuilt chains can be shared freely.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    name: &'static str,
    rest: &'static [u8],
    then: Resume,
}

impl Keyword {
    /// # Panics
    ///
    /// If `rest` is empty. In a `const` this is a compile error.
    #[must_use]
    pub const fn new(name: &'static str, rest: &'static [u8], then: Resume) -> Self {
        assert!(!rest.is_empty(), "a keyword chain needs at least one byte");
        Self { name, rest, then }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Bytes still to be matched, in order.
    #[must_use]
    pub fn remaining(&self) -> &'static [u8] {
        self.rest
    }

    #[must_use]
    pub fn then(&self) -> Resume {
        self.then
    }

    /// Give the matcher the next input byte and learn what to do next.
    #[must_use]
    pub fn step(self, c: u8) -> Matched {
        match self.rest.split_first() {
            Some((&expected, rest)) if expected == c => {
                if rest.is_empty() {
                    Matched::Done(self.then)
                } else {
                    Matched::NeedMore(Keyword { rest, ..self })
                }
            }
            Some((expected, _)) => Matched::Reject(Expected(core::slice::from_ref(expected))),
            // `new` refuses empty chains.
            None => Matched::Done(self.then),
        }
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyword")
            .field("name", &self.name)
            .field("rest", &self.rest.as_bstr())
            .field("then", &self.then)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONG: Keyword = Keyword::new(
        "NumberLong",
        b"ong",
        Resume::Constructor(ExtendedLiteral::NumberLong),
    );

    fn drive(mut kw: Keyword, input: &[u8]) -> Matched {
        let mut last = Matched::NeedMore(kw);
        for &c in input {
            last = kw.step(c);
            match last {
                Matched::NeedMore(next) => kw = next,
                Matched::Done(_) | Matched::Reject(_) => break,
            }
        }
        last
    }

    #[test]
    fn matches_the_whole_tail() {
        assert_eq!(
            drive(ONG, b"ong"),
            Matched::Done(Resume::Constructor(ExtendedLiteral::NumberLong))
        );
    }

    #[test]
    fn partial_input_needs_more() {
        match drive(ONG, b"on") {
            Matched::NeedMore(kw) => {
                assert_eq!(kw.remaining(), b"g");
                assert_eq!(kw.name(), "NumberLong");
            }
            other => panic!("expected NeedMore, got {other:?}"),
        }
    }

    #[test]
    fn mismatch_names_the_expected_byte() {
        assert_eq!(drive(ONG, b"oNg"), Matched::Reject(Expected(b"n")));
    }

    #[test]
    fn no_case_folding() {
        assert_eq!(drive(ONG, b"ONG"), Matched::Reject(Expected(b"o")));
    }

    #[test]
    fn stepping_a_copy_leaves_the_original_untouched() {
        let first = ONG.step(b'o');
        assert!(matches!(first, Matched::NeedMore(_)));
        assert_eq!(ONG.remaining(), b"ong");
        assert_eq!(ONG.step(b'o'), first);
    }

    #[test]
    fn debug_shows_remaining_bytes_as_text() {
        let rendered = alloc::format!("{ONG:?}");
        assert!(rendered.contains("\"ong\""), "{rendered}");
    }
}
