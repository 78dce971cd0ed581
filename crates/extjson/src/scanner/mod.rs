//! Scanner: a byte-at-a-time state machine over extended JSON.
//!
//! The scanner does not build values. Each call to [`Scanner::step`] feeds
//! one input byte and returns a [`ScanAction`] telling the caller what kind
//! of boundary (if any) that byte completed. The decoder drives it and uses
//! the actions to find where values, keys and constructor arguments start
//! and end.
//!
//! States
//! - Exactly one [`Step`] is active at a time; `transition` is the whole
//!   transition function `(state, byte) -> (state, action)`.
//! - A parse-state stack records which container (object key, object value,
//!   array element, constructor argument list) the current value sits in.
//! - Keywords (`true`, `false`, `null`, and the `Number*` constructors) are
//!   matched by [`Keyword`] chains; the `Nu` prefix hands over to the
//!   literal states in [`literal`].
//!
//! Errors are sticky: once `Error` has been returned, every further step
//! returns `Error` and [`Scanner::error`] holds the reason.

mod keyword;
mod literal;

use alloc::vec::Vec;

pub use keyword::{Keyword, Matched, Resume};
pub use literal::ExtendedLiteral;

use crate::error::{QuotedChar, ScanContext, SyntaxError};

/// What the byte just fed to the scanner means to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    /// Uninteresting byte: inside a literal, string or keyword.
    Continue,
    /// First byte of a string, number or keyword.
    BeginLiteral,
    /// `{`
    BeginObject,
    /// `:` after an object key.
    ObjectKey,
    /// `,` after an object member.
    ObjectValue,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `,` after an array element.
    ArrayValue,
    /// `]`
    EndArray,
    /// `(` after a constructor keyword.
    BeginCtor,
    /// `,` after a constructor argument.
    CtorArg,
    /// `)`
    EndCtor,
    /// Whitespace between tokens.
    SkipSpace,
    /// A complete top-level value has been scanned.
    End,
    /// The input is malformed; see [`Scanner::error`].
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ObjectKey,
    ObjectValue,
    ArrayValue,
    CtorArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    BeginValue,
    BeginValueOrEmpty,
    BeginString,
    BeginStringOrEmpty,
    BeginCtorOrEmpty,
    EndValue,
    EndTop,
    InString,
    InStringEsc,
    /// Hex digits still expected in a `\u` escape.
    InStringEscU(u8),
    Neg,
    One,
    Zero,
    Dot,
    Dot0,
    E,
    ESign,
    E0,
    Keyword(Keyword),
    UpperNu,
    AfterNumber,
    Constructor(ExtendedLiteral),
    Error,
}

impl From<Resume> for Step {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::EndValue => Step::EndValue,
            Resume::UpperNu => Step::UpperNu,
            Resume::AfterNumber => Step::AfterNumber,
            Resume::Constructor(lit) => Step::Constructor(lit),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scanner {
    step: Step,
    parse_state: Vec<ParseState>,
    end_top: bool,
    err: Option<SyntaxError>,
    redo: Option<(ScanAction, Step)>,
    max_depth: usize,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(crate::DecoderOptions::default().max_depth)
    }
}

#[inline]
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

impl Scanner {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            step: Step::BeginValue,
            parse_state: Vec::new(),
            end_top: false,
            err: None,
            redo: None,
            max_depth,
        }
    }

    /// Prepares the scanner for a fresh top-level value.
    pub fn reset(&mut self) {
        self.step = Step::BeginValue;
        self.parse_state.clear();
        self.end_top = false;
        self.err = None;
        self.redo = None;
    }

    /// Whether a complete top-level value has been scanned.
    #[must_use]
    pub fn ended_top(&self) -> bool {
        self.end_top
    }

    /// The reason for the last `ScanAction::Error`, if any.
    #[must_use]
    pub fn error(&self) -> Option<&SyntaxError> {
        self.err.as_ref()
    }

    /// Feeds one input byte.
    pub fn step(&mut self, c: u8) -> ScanAction {
        if let Some((action, step)) = self.redo.take() {
            self.step = step;
            return action;
        }
        self.transition(c)
    }

    /// Signals the end of input.
    pub fn eof(&mut self) -> ScanAction {
        if let Some((action, step)) = self.redo.take() {
            self.step = step;
            return action;
        }
        if self.err.is_some() {
            return ScanAction::Error;
        }
        if self.end_top {
            return ScanAction::End;
        }
        self.transition(b' ');
        if self.end_top {
            return ScanAction::End;
        }
        if self.err.is_none() {
            self.err = Some(SyntaxError::UnexpectedEnd);
        }
        self.step = Step::Error;
        ScanAction::Error
    }

    /// Makes the next `step` return `action` again without consuming its
    /// byte. Only one level of undo is kept.
    pub fn undo(&mut self, action: ScanAction) {
        debug_assert!(self.redo.is_none(), "scanner undo called twice");
        self.redo = Some((action, self.step));
    }

    fn transition(&mut self, c: u8) -> ScanAction {
        match self.step {
            Step::BeginValue => self.begin_value(c),
            Step::BeginValueOrEmpty => {
                if is_space(c) {
                    return ScanAction::SkipSpace;
                }
                if c == b']' {
                    return self.end_value(c);
                }
                self.begin_value(c)
            }
            Step::BeginString => self.begin_string(c),
            Step::BeginStringOrEmpty => {
                if is_space(c) {
                    return ScanAction::SkipSpace;
                }
                if c == b'}' {
                    if let Some(top) = self.parse_state.last_mut() {
                        *top = ParseState::ObjectValue;
                    }
                    return self.end_value(c);
                }
                self.begin_string(c)
            }
            Step::BeginCtorOrEmpty => {
                if is_space(c) {
                    return ScanAction::SkipSpace;
                }
                if c == b')' {
                    return self.end_value(c);
                }
                self.begin_value(c)
            }
            Step::EndValue => self.end_value(c),
            Step::EndTop => self.end_top(c),

            // -------------------------- STRING -----------------------------
            Step::InString => match c {
                b'"' => self.go(Step::EndValue),
                b'\\' => self.go(Step::InStringEsc),
                0x00..=0x1F => self.syntax_error(c, ScanContext::InStringLiteral),
                _ => ScanAction::Continue,
            },
            Step::InStringEsc => match c {
                b'b' | b'f' | b'n' | b'r' | b't' | b'\\' | b'/' | b'"' => self.go(Step::InString),
                b'u' => self.go(Step::InStringEscU(4)),
                _ => self.syntax_error(c, ScanContext::InStringEscape),
            },
            Step::InStringEscU(left) => {
                if !c.is_ascii_hexdigit() {
                    return self.syntax_error(c, ScanContext::InUnicodeEscape);
                }
                if left <= 1 {
                    self.go(Step::InString)
                } else {
                    self.go(Step::InStringEscU(left - 1))
                }
            }

            // -------------------------- NUMBERS -----------------------------
            Step::Neg => match c {
                b'0' => self.go(Step::Zero),
                b'1'..=b'9' => self.go(Step::One),
                _ => self.syntax_error(c, ScanContext::InNumericLiteral),
            },
            Step::One => {
                if c.is_ascii_digit() {
                    return ScanAction::Continue;
                }
                self.zero(c)
            }
            Step::Zero => self.zero(c),
            Step::Dot => {
                if c.is_ascii_digit() {
                    return self.go(Step::Dot0);
                }
                self.syntax_error(c, ScanContext::AfterDecimalPoint)
            }
            Step::Dot0 => match c {
                b'0'..=b'9' => ScanAction::Continue,
                b'e' | b'E' => self.go(Step::E),
                _ => self.end_value(c),
            },
            Step::E => {
                if matches!(c, b'+' | b'-') {
                    return self.go(Step::ESign);
                }
                self.e_sign(c)
            }
            Step::ESign => self.e_sign(c),
            Step::E0 => {
                if c.is_ascii_digit() {
                    return ScanAction::Continue;
                }
                self.end_value(c)
            }

            // -------------------------- KEYWORDS ----------------------------
            Step::Keyword(kw) => match kw.step(c) {
                Matched::NeedMore(next) => self.go(Step::Keyword(next)),
                Matched::Done(resume) => {
                    tracing::trace!(keyword = kw.name(), "keyword matched");
                    self.go(resume.into())
                }
                Matched::Reject(expected) => self.fail(SyntaxError::InvalidLiteral {
                    found: QuotedChar(c),
                    literal: kw.name(),
                    expected,
                }),
            },
            Step::UpperNu => match literal::after_upper_nu(c) {
                Ok(next) => self.go(Step::Keyword(next)),
                Err(e) => self.fail(e),
            },
            Step::AfterNumber => match literal::after_number(c) {
                Ok(next) => self.go(Step::Keyword(next)),
                Err(e) => self.fail(e),
            },
            Step::Constructor(_) => {
                if is_space(c) {
                    return ScanAction::SkipSpace;
                }
                if c == b'(' {
                    self.step = Step::BeginCtorOrEmpty;
                    return self.push_parse_state(ParseState::CtorArg, ScanAction::BeginCtor);
                }
                self.syntax_error(c, ScanContext::BeginningOfConstructor)
            }

            Step::Error => ScanAction::Error,
        }
    }

    #[inline]
    fn go(&mut self, step: Step) -> ScanAction {
        self.step = step;
        ScanAction::Continue
    }

    fn begin_value(&mut self, c: u8) -> ScanAction {
        if is_space(c) {
            return ScanAction::SkipSpace;
        }
        let literal = match c {
            b'{' => {
                self.step = Step::BeginStringOrEmpty;
                return self.push_parse_state(ParseState::ObjectKey, ScanAction::BeginObject);
            }
            b'[' => {
                self.step = Step::BeginValueOrEmpty;
                return self.push_parse_state(ParseState::ArrayValue, ScanAction::BeginArray);
            }
            b'"' => Step::InString,
            b'-' => Step::Neg,
            b'0' => Step::Zero,
            b'1'..=b'9' => Step::One,
            b't' => Step::Keyword(literal::TRUE),
            b'f' => Step::Keyword(literal::FALSE),
            b'n' => Step::Keyword(literal::NULL),
            b'N' => Step::Keyword(literal::UPPER_N),
            _ => return self.syntax_error(c, ScanContext::BeginningOfValue),
        };
        self.step = literal;
        ScanAction::BeginLiteral
    }

    fn begin_string(&mut self, c: u8) -> ScanAction {
        if is_space(c) {
            return ScanAction::SkipSpace;
        }
        if c == b'"' {
            self.step = Step::InString;
            return ScanAction::BeginLiteral;
        }
        self.syntax_error(c, ScanContext::BeginningOfObjectKey)
    }

    fn zero(&mut self, c: u8) -> ScanAction {
        match c {
            b'.' => self.go(Step::Dot),
            b'e' | b'E' => self.go(Step::E),
            _ => self.end_value(c),
        }
    }

    fn e_sign(&mut self, c: u8) -> ScanAction {
        if c.is_ascii_digit() {
            return self.go(Step::E0);
        }
        self.syntax_error(c, ScanContext::InExponent)
    }

    fn end_value(&mut self, c: u8) -> ScanAction {
        let Some(top) = self.parse_state.last_mut() else {
            self.step = Step::EndTop;
            self.end_top = true;
            return self.end_top(c);
        };
        if is_space(c) {
            self.step = Step::EndValue;
            return ScanAction::SkipSpace;
        }
        match (*top, c) {
            (ParseState::ObjectKey, b':') => {
                *top = ParseState::ObjectValue;
                self.step = Step::BeginValue;
                ScanAction::ObjectKey
            }
            (ParseState::ObjectKey, _) => self.syntax_error(c, ScanContext::AfterObjectKey),
            (ParseState::ObjectValue, b',') => {
                *top = ParseState::ObjectKey;
                self.step = Step::BeginString;
                ScanAction::ObjectValue
            }
            (ParseState::ObjectValue, b'}') => self.pop_parse_state(ScanAction::EndObject),
            (ParseState::ObjectValue, _) => self.syntax_error(c, ScanContext::AfterObjectValue),
            (ParseState::ArrayValue, b',') => {
                self.step = Step::BeginValue;
                ScanAction::ArrayValue
            }
            (ParseState::ArrayValue, b']') => self.pop_parse_state(ScanAction::EndArray),
            (ParseState::ArrayValue, _) => self.syntax_error(c, ScanContext::AfterArrayElement),
            (ParseState::CtorArg, b',') => {
                self.step = Step::BeginValue;
                ScanAction::CtorArg
            }
            (ParseState::CtorArg, b')') => self.pop_parse_state(ScanAction::EndCtor),
            (ParseState::CtorArg, _) => self.syntax_error(c, ScanContext::AfterConstructorArgument),
        }
    }

    fn end_top(&mut self, c: u8) -> ScanAction {
        if is_space(c) {
            return ScanAction::SkipSpace;
        }
        self.syntax_error(c, ScanContext::AfterTopLevelValue)
    }

    fn push_parse_state(&mut self, state: ParseState, action: ScanAction) -> ScanAction {
        if self.parse_state.len() >= self.max_depth {
            return self.fail(SyntaxError::ExceededMaxDepth);
        }
        self.parse_state.push(state);
        action
    }

    fn pop_parse_state(&mut self, action: ScanAction) -> ScanAction {
        self.parse_state.pop();
        if self.parse_state.is_empty() {
            self.step = Step::EndTop;
            self.end_top = true;
        } else {
            self.step = Step::EndValue;
        }
        action
    }

    fn syntax_error(&mut self, c: u8, context: ScanContext) -> ScanAction {
        self.fail(SyntaxError::InvalidCharacter {
            found: QuotedChar(c),
            context,
        })
    }

    fn fail(&mut self, err: SyntaxError) -> ScanAction {
        self.step = Step::Error;
        self.err = Some(err);
        ScanAction::Error
    }
}
