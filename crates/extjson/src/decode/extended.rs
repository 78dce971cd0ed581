//! `NumberInt`, `NumberLong` and `NumberDecimal`.
//!
//! Each literal takes exactly one argument, a bare number or a string. The
//! argument's text is converted by the literal's own rule: base-10 integer
//! of 32 or 64 bits, or decimal128. Text is not trimmed, so `" 5"` is
//! rejected.
use super::{Decoder, ctor::ArgType};
use crate::{
    Number, Value,
    error::{DecodeError, ErrorKind},
    scanner::{ExtendedLiteral, ScanAction},
    slot::{Slot, SlotType},
};

impl Decoder<'_> {
    /// Reads the argument list of `lit` and returns the typed value.
    pub(crate) fn extended_interface(&mut self, lit: ExtendedLiteral) -> Result<Value, DecodeError> {
        tracing::debug!(literal = lit.name(), offset = self.off, "extended literal");
        let mut args = self.ctor_typed(lit.name(), &[ArgType::NUMBER_OR_STRING])?;
        let arg = args
            .pop()
            .ok_or_else(|| self.phase_error(ScanAction::EndCtor))?;
        let number = Number::try_from(arg)
            .map_err(|v| self.argument_type(lit.name(), 1, &ArgType::NUMBER_OR_STRING, &v))?;

        let value = match lit {
            ExtendedLiteral::NumberInt => number.to_i32().map(Value::NumberInt),
            ExtendedLiteral::NumberLong => number.to_i64().map(Value::NumberLong),
            ExtendedLiteral::NumberDecimal => number.to_decimal128().map(Value::NumberDecimal),
        };
        value.map_err(|e| self.error(e))
    }

    /// Reads `lit` into `slot`. Only a dynamic slot can take it, and that is
    /// checked before the argument list is read.
    pub(crate) fn store_extended<S: Slot + ?Sized>(
        &mut self,
        lit: ExtendedLiteral,
        slot: &mut S,
    ) -> Result<(), DecodeError> {
        let slot_type = slot.slot_type();
        if let SlotType::Fixed(declared) = slot_type {
            return Err(self.error(ErrorKind::DestinationType {
                produced: lit.type_name(),
                declared,
            }));
        }
        let value = self.extended_interface(lit)?;
        slot.put(value).map_err(|rejected| {
            self.error(ErrorKind::UnmarshalType {
                value: rejected.kind(),
                declared: slot_type.name(),
            })
        })
    }
}
