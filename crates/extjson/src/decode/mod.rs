//! The decoder: turns scanner actions into [`Value`]s.
//!
//! The decoder walks the input with a [`Scanner`], one byte at a time, and
//! builds values bottom-up. Literals are found by scanning until the
//! scanner stops reporting `Continue`; the byte that ended the literal has
//! been read one step too far, so the decoder backs up one byte and asks
//! the scanner to replay that action (see [`Scanner::undo`]).
//!
//! Every failure is returned as a [`DecodeError`] carrying the index of the
//! last byte examined. The first failure ends the decode; no partial value
//! is returned.

mod ctor;
mod extended;
mod unquote;

use alloc::{string::String, vec::Vec};

use crate::{
    DecoderOptions, Map, Number, Value,
    error::{DecodeError, ErrorKind, SyntaxError},
    options::NumberMode,
    scanner::{ExtendedLiteral, ScanAction, Scanner},
    slot::Slot,
};

/// Decodes extended JSON from a string slice.
///
/// # Examples
///
/// ```
/// use extjson::{Decoder, DecoderOptions, Value};
///
/// let mut dec = Decoder::new(r#"{"n": NumberInt("5")}"#, DecoderOptions::default());
/// let v = dec.decode_value().unwrap();
/// assert_eq!(v.to_string(), r#"{"n":NumberInt(5)}"#);
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    input: &'a str,
    off: usize,
    scan: Scanner,
    options: DecoderOptions,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub fn new(input: &'a str, options: DecoderOptions) -> Self {
        Self {
            input,
            off: 0,
            scan: Scanner::new(options.max_depth),
            options,
        }
    }

    /// Decodes the whole input as a single document.
    ///
    /// Whitespace may surround the document; anything else after it is an
    /// error.
    ///
    /// # Errors
    ///
    /// The first syntax, argument or range error met in the input.
    pub fn decode_value(&mut self) -> Result<Value, DecodeError> {
        self.rewind();
        let mode = self.options.number_mode();
        let decoded = self
            .value_interface(mode)
            .and_then(|v| self.finish_top().map(|()| v));
        decoded.inspect_err(|e| tracing::debug!(offset = e.offset, error = %e.kind, "decode failed"))
    }

    /// Decodes the whole input as a single document into `slot`.
    ///
    /// An extended literal can only be stored into a dynamic slot; a fixed
    /// slot is refused before the literal's argument is read.
    ///
    /// # Errors
    ///
    /// As [`decode_value`](Self::decode_value), plus
    /// [`ErrorKind::DestinationType`] and [`ErrorKind::UnmarshalType`] when
    /// the decoded value does not fit the slot.
    pub fn decode_into<S: Slot + ?Sized>(&mut self, slot: &mut S) -> Result<(), DecodeError> {
        self.rewind();
        let decoded = self.value_store(slot).and_then(|()| self.finish_top());
        decoded.inspect_err(|e| tracing::debug!(offset = e.offset, error = %e.kind, "decode failed"))
    }

    /// Iterates over consecutive documents in the input.
    ///
    /// Documents may be separated by whitespace, or simply follow one
    /// another when the first ends in `}`, `]` or `)`. The iterator stops
    /// after the first error.
    ///
    /// ```
    /// use extjson::{Decoder, DecoderOptions, Value};
    ///
    /// let docs: Vec<Value> = Decoder::new("1 NumberInt(2){}", DecoderOptions::default())
    ///     .values()
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(docs.len(), 3);
    /// assert_eq!(docs[1], Value::NumberInt(2));
    /// ```
    #[must_use]
    pub fn values(self) -> Values<'a> {
        Values {
            input: self.input,
            pos: 0,
            options: self.options,
            failed: false,
        }
    }

    fn rewind(&mut self) {
        self.off = 0;
        self.scan.reset();
    }

    fn data(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Builds an error located at the last byte examined.
    fn error(&self, kind: impl Into<ErrorKind>) -> DecodeError {
        DecodeError {
            kind: kind.into(),
            offset: self.off.saturating_sub(1),
        }
    }

    fn phase_error(&self, op: ScanAction) -> DecodeError {
        self.error(ErrorKind::Phase(op))
    }

    /// Steps the scanner over bytes as long as it keeps returning `op` and
    /// returns the first different action.
    fn scan_while(&mut self, op: ScanAction) -> Result<ScanAction, DecodeError> {
        let data = self.data();
        let next = loop {
            let next = match data.get(self.off) {
                Some(&c) => {
                    self.off += 1;
                    self.scan.step(c)
                }
                None => {
                    self.off = data.len() + 1;
                    self.scan.eof()
                }
            };
            if next != op {
                break next;
            }
        };
        if next == ScanAction::Error {
            let err = self
                .scan
                .error()
                .cloned()
                .unwrap_or(SyntaxError::UnexpectedEnd);
            return Err(self.error(err));
        }
        Ok(next)
    }

    /// Backs up one byte and makes the scanner replay `op` on the next step.
    fn back_up(&mut self, op: ScanAction) {
        self.off = self.off.saturating_sub(1);
        self.scan.undo(op);
    }

    /// Reads the rest of a literal whose first byte is at `off - 1`.
    fn rescan_literal(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.off.saturating_sub(1);
        let op = self.scan_while(ScanAction::Continue)?;
        self.back_up(op);
        let input = self.input;
        input
            .get(start..self.off)
            .ok_or_else(|| self.phase_error(op))
    }

    fn finish_top(&mut self) -> Result<(), DecodeError> {
        match self.scan_while(ScanAction::SkipSpace)? {
            ScanAction::End => Ok(()),
            op => Err(self.phase_error(op)),
        }
    }

    pub(crate) fn value_interface(&mut self, mode: NumberMode) -> Result<Value, DecodeError> {
        match self.scan_while(ScanAction::SkipSpace)? {
            ScanAction::BeginArray => self.array_interface(mode).map(Value::Array),
            ScanAction::BeginObject => self.object_interface(mode).map(Value::Object),
            ScanAction::BeginLiteral => {
                let item = self.rescan_literal()?;
                self.literal_interface(item, mode)
            }
            op => Err(self.phase_error(op)),
        }
    }

    fn array_interface(&mut self, mode: NumberMode) -> Result<Vec<Value>, DecodeError> {
        let mut v = Vec::new();
        loop {
            // `]` can only come first here; after `,` the scanner rejects it.
            let op = self.scan_while(ScanAction::SkipSpace)?;
            if op == ScanAction::EndArray {
                break;
            }
            self.back_up(op);
            v.push(self.value_interface(mode)?);

            match self.scan_while(ScanAction::SkipSpace)? {
                ScanAction::EndArray => break,
                ScanAction::ArrayValue => {}
                op => return Err(self.phase_error(op)),
            }
        }
        Ok(v)
    }

    fn object_interface(&mut self, mode: NumberMode) -> Result<Map, DecodeError> {
        let mut m = Map::new();
        loop {
            let op = self.scan_while(ScanAction::SkipSpace)?;
            if op == ScanAction::EndObject {
                break;
            }
            if op != ScanAction::BeginLiteral {
                return Err(self.phase_error(op));
            }

            let item = self.rescan_literal()?;
            let key: String =
                unquote::unquote(item).ok_or_else(|| self.phase_error(ScanAction::BeginLiteral))?;

            match self.scan_while(ScanAction::SkipSpace)? {
                ScanAction::ObjectKey => {}
                op => return Err(self.phase_error(op)),
            }

            let value = self.value_interface(mode)?;
            m.insert(key, value);

            match self.scan_while(ScanAction::SkipSpace)? {
                ScanAction::EndObject => break,
                ScanAction::ObjectValue => {}
                op => return Err(self.phase_error(op)),
            }
        }
        Ok(m)
    }

    /// Turns a scanned literal into a value. `N` starts one of the
    /// constructor literals, whose argument list has not been read yet.
    fn literal_interface(&mut self, item: &str, mode: NumberMode) -> Result<Value, DecodeError> {
        match item.as_bytes().first() {
            Some(b'n') => Ok(Value::Null),
            Some(b't') => Ok(Value::Boolean(true)),
            Some(b'f') => Ok(Value::Boolean(false)),
            Some(b'"') => unquote::unquote(item)
                .map(Value::String)
                .ok_or_else(|| self.phase_error(ScanAction::BeginLiteral)),
            Some(b'N') => {
                let lit = self.extended_keyword(item)?;
                self.extended_interface(lit)
            }
            Some(b'-' | b'0'..=b'9') => self.convert_number(item, mode),
            _ => Err(self.phase_error(ScanAction::BeginLiteral)),
        }
    }

    fn extended_keyword(&self, item: &str) -> Result<ExtendedLiteral, DecodeError> {
        ExtendedLiteral::from_keyword(item).ok_or_else(|| self.phase_error(ScanAction::BeginLiteral))
    }

    fn convert_number(&self, item: &str, mode: NumberMode) -> Result<Value, DecodeError> {
        let number = Number::from(item);
        match mode {
            NumberMode::Preserve => Ok(Value::Number(number)),
            NumberMode::Double => number
                .to_f64()
                .map(Value::Double)
                .map_err(|e| self.error(e)),
        }
    }

    fn value_store<S: Slot + ?Sized>(&mut self, slot: &mut S) -> Result<(), DecodeError> {
        let mode = self.options.number_mode();
        let value = match self.scan_while(ScanAction::SkipSpace)? {
            ScanAction::BeginArray => Value::Array(self.array_interface(mode)?),
            ScanAction::BeginObject => Value::Object(self.object_interface(mode)?),
            ScanAction::BeginLiteral => {
                let item = self.rescan_literal()?;
                if item.starts_with('N') {
                    let lit = self.extended_keyword(item)?;
                    return self.store_extended(lit, slot);
                }
                self.literal_interface(item, mode)?
            }
            op => return Err(self.phase_error(op)),
        };
        let declared = slot.slot_type().name();
        slot.put(value).map_err(|rejected| {
            self.error(ErrorKind::UnmarshalType {
                value: rejected.kind(),
                declared,
            })
        })
    }
}

/// Iterator over the documents of one input; see [`Decoder::values`].
#[derive(Debug, Clone)]
pub struct Values<'a> {
    input: &'a str,
    pos: usize,
    options: DecoderOptions,
    failed: bool,
}

impl Values<'_> {
    /// Finds where the document starting at `pos` ends, without building
    /// it.
    fn value_end(&self) -> Result<usize, DecodeError> {
        let data = self.input.as_bytes();
        let mut scan = Scanner::new(self.options.max_depth);
        let fail = |scan: &Scanner, at: usize| DecodeError {
            kind: scan
                .error()
                .cloned()
                .unwrap_or(SyntaxError::UnexpectedEnd)
                .into(),
            offset: at,
        };
        for (i, &c) in data.iter().enumerate().skip(self.pos) {
            match scan.step(c) {
                // The byte after a number or keyword closes it.
                ScanAction::SkipSpace | ScanAction::Error if scan.ended_top() => return Ok(i),
                ScanAction::EndObject | ScanAction::EndArray | ScanAction::EndCtor
                    if scan.ended_top() =>
                {
                    return Ok(i + 1);
                }
                ScanAction::Error => return Err(fail(&scan, i)),
                _ => {}
            }
        }
        match scan.eof() {
            ScanAction::End => Ok(data.len()),
            _ => Err(fail(&scan, data.len())),
        }
    }
}

impl Iterator for Values<'_> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let data = self.input.as_bytes();
        while data
            .get(self.pos)
            .is_some_and(|c| matches!(c, b' ' | b'\t' | b'\r' | b'\n'))
        {
            self.pos += 1;
        }
        if self.pos >= data.len() {
            return None;
        }

        let start = self.pos;
        let decoded = self.value_end().and_then(|end| {
            self.pos = end;
            let doc = self.input.get(start..end).unwrap_or_default();
            Decoder::new(doc, self.options)
                .decode_value()
                .map_err(|e| DecodeError {
                    offset: e.offset + start,
                    ..e
                })
        });
        if decoded.is_err() {
            self.failed = true;
        }
        Some(decoded)
    }
}

/// Decodes one document with default options.
///
/// # Errors
///
/// See [`Decoder::decode_value`].
pub fn from_str(input: &str) -> Result<Value, DecodeError> {
    from_str_with(input, DecoderOptions::default())
}

/// Decodes one document with the given options.
///
/// # Errors
///
/// See [`Decoder::decode_value`].
pub fn from_str_with(input: &str, options: DecoderOptions) -> Result<Value, DecodeError> {
    Decoder::new(input, options).decode_value()
}

/// Decodes one document with default options into `slot`.
///
/// # Errors
///
/// See [`Decoder::decode_into`].
pub fn from_str_into<S: Slot + ?Sized>(input: &str, slot: &mut S) -> Result<(), DecodeError> {
    Decoder::new(input, DecoderOptions::default()).decode_into(slot)
}
