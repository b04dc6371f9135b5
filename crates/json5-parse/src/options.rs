/// Configuration options for the lexer and parser.
///
/// # Examples
///
/// ```rust
/// use json5_parse::{ParserOptions, Value, parse_with_options};
///
/// let options = ParserOptions {
///     unicode_escapes: true,
///     ..Default::default()
/// };
/// let value = parse_with_options(br#""\u00e5""#, options).unwrap();
/// assert_eq!(value, Value::String("\u{e5}".into()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// The parser itself never recurses, but dropping, comparing and
    /// displaying a [`Value`](crate::Value) do. Bounding the depth keeps
    /// those operations safe on untrusted input.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,

    /// Whether raw control bytes (`0x00`..=`0x1F`) are accepted inside string
    /// literals.
    ///
    /// Strict JSON requires these to be escaped. The lenient default accepts
    /// a literal newline or tab inside quotes and copies it into the decoded
    /// string unchanged.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_control_characters: bool,

    /// Whether `\uXXXX` escapes are decoded.
    ///
    /// When `false`, `\u` is rejected like any other unknown escape. When
    /// `true`, the four hex digits are decoded as a UTF-16 code unit and a
    /// surrogate pair written as two consecutive escapes is combined into one
    /// character. A lone surrogate is an error.
    ///
    /// # Default
    ///
    /// `false`
    pub unicode_escapes: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            allow_control_characters: true,
            unicode_escapes: false,
        }
    }
}
