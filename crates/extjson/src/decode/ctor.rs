//! Constructor argument lists: `Keyword(arg, ...)`.
//!
//! The keyword itself has already been scanned. What is left is the `(`,
//! the arguments, and the `)`. Arguments are decoded in preserving mode so
//! a bare `12345678901234567890` reaches the caller as text, not as an
//! `f64` approximation; the caller's own mode is untouched because it is a
//! parameter, not decoder state.
use alloc::{string::ToString, vec::Vec};

use super::Decoder;
use crate::{
    Value,
    error::{DecodeError, ErrorKind, SyntaxError},
    options::NumberMode,
    scanner::ScanAction,
};

/// The type a constructor expects at one argument position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArgType {
    /// Named in diagnostics: "expected <name> for argument ...".
    pub(crate) name: &'static str,
    accepts: fn(&Value) -> bool,
}

impl ArgType {
    pub(crate) const NUMBER_OR_STRING: ArgType = ArgType {
        name: "number or string",
        accepts: is_number_or_string,
    };
}

fn is_number_or_string(v: &Value) -> bool {
    matches!(v, Value::Number(_) | Value::String(_))
}

impl Decoder<'_> {
    /// Reads `( arg, ... )` with each argument decoded as a dynamic value.
    pub(crate) fn ctor_interface(&mut self, name: &'static str) -> Result<Vec<Value>, DecodeError> {
        if self.scan_while(ScanAction::SkipSpace)? != ScanAction::BeginCtor {
            return Err(self.error(SyntaxError::ExpectedConstructor));
        }

        let mut args = Vec::new();
        loop {
            // `)` can only come first here; after `,` the scanner rejects it.
            let op = self.scan_while(ScanAction::SkipSpace)?;
            if op == ScanAction::EndCtor {
                break;
            }
            self.back_up(op);
            args.push(self.value_interface(NumberMode::Preserve)?);

            match self.scan_while(ScanAction::SkipSpace)? {
                ScanAction::EndCtor => break,
                ScanAction::CtorArg => {}
                op => return Err(self.phase_error(op)),
            }
        }
        tracing::trace!(constructor = name, args = args.len(), "constructor arguments read");
        Ok(args)
    }

    /// Reads `( arg, ... )` and checks the arguments against `expected`, by
    /// count and then position by position.
    pub(crate) fn ctor_typed(
        &mut self,
        name: &'static str,
        expected: &[ArgType],
    ) -> Result<Vec<Value>, DecodeError> {
        let args = self.ctor_interface(name)?;
        if args.len() != expected.len() {
            return Err(self.error(ErrorKind::Arity {
                constructor: name,
                expected: expected.len(),
                actual: args.len(),
            }));
        }
        for (i, (arg, ty)) in args.iter().zip(expected).enumerate() {
            if !(ty.accepts)(arg) {
                return Err(self.argument_type(name, i + 1, ty, arg));
            }
        }
        Ok(args)
    }

    pub(crate) fn argument_type(
        &self,
        constructor: &'static str,
        position: usize,
        expected: &ArgType,
        received: &Value,
    ) -> DecodeError {
        self.error(ErrorKind::ArgumentType {
            constructor,
            position,
            expected: expected.name,
            received: received.kind(),
            value: received.to_string(),
        })
    }
}
