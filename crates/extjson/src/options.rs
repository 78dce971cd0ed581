/// Configuration options for the extended-JSON decoder.
///
/// # Examples
///
/// ```rust
/// use extjson::{DecoderOptions, Value, from_str_with};
///
/// let options = DecoderOptions {
///     use_number: true,
///     ..Default::default()
/// };
/// let v = from_str_with("[1.10, NumberInt(2)]", options).unwrap();
/// assert_eq!(v.to_string(), "[1.10,NumberInt(2)]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Whether plain JSON numbers keep their source text.
    ///
    /// When `false`, a bare number such as `1.10` decodes to
    /// [`Value::Double`](crate::Value::Double). When `true`, it decodes to
    /// [`Value::Number`](crate::Value::Number) and the digits are preserved
    /// exactly. Constructor arguments (`NumberInt(...)` and friends) are
    /// always read in preserving mode regardless of this setting.
    ///
    /// # Default
    ///
    /// `false`
    pub use_number: bool,

    /// Maximum nesting depth of objects, arrays and constructor argument
    /// lists.
    ///
    /// Decoding recurses once per nesting level, so raising this limit
    /// far above the default needs a correspondingly larger thread stack.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            use_number: false,
            max_depth: 128,
        }
    }
}

impl DecoderOptions {
    pub(crate) fn number_mode(&self) -> NumberMode {
        if self.use_number {
            NumberMode::Preserve
        } else {
            NumberMode::Double
        }
    }
}

/// How a bare numeric literal is turned into a [`Value`](crate::Value).
///
/// Passed down explicitly through every nested decode call so a
/// constructor argument can be read in `Preserve` mode without touching
/// the caller's setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberMode {
    Double,
    Preserve,
}
