use core::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// The error returned by [`parse`](crate::parse) and [`Lexer::token`].
///
/// Every error is terminal: the parser stops at the first one and returns no
/// partial value. The rendered form is `json5: <message> at position <n>`,
/// where `n` is a byte offset into the input.
///
/// [`Lexer::token`]: crate::Lexer::token
#[derive(Error, Debug, Clone, PartialEq)]
#[error("json5: {source} at position {position}")]
pub struct SyntaxError {
    pub(crate) source: ErrorSource,
    pub(crate) position: usize,
}

impl SyntaxError {
    pub(crate) fn new(source: impl Into<ErrorSource>, position: usize) -> Self {
        Self {
            source: source.into(),
            position,
        }
    }

    /// The human readable message, without the `json5:` prefix or position.
    #[must_use]
    pub fn message(&self) -> String {
        self.source.to_string()
    }

    /// Byte offset at which the error was detected.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Which stage of decoding rejected the input.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// The structured cause of the error.
    #[must_use]
    pub fn detail(&self) -> &ErrorSource {
        &self.source
    }
}

/// Coarse classification of a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The lexer could not form a token.
    Lexical,
    /// A well-formed token appeared where the grammar does not allow it.
    Syntax,
    /// A numeric token could not be represented as `i64` or `f64`.
    Conversion,
}

/// The cause carried by a [`SyntaxError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorSource {
    /// The lexer could not form a token.
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    /// A token the grammar does not allow here, rendered as in the input.
    #[error("unexpected token {0}")]
    UnexpectedToken(String),
    /// The input ended before the document was complete.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// More than `max_depth` arrays and objects were open at once.
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    /// A number token had no `i64`/`f64` value.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl ErrorSource {
    /// See [`SyntaxError::kind`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lexical(_) => ErrorKind::Lexical,
            Self::UnexpectedToken(_) | Self::UnexpectedEndOfInput | Self::DepthLimitExceeded(_) => {
                ErrorKind::Syntax
            }
            Self::Conversion(_) => ErrorKind::Conversion,
        }
    }
}

/// A failure to form a token, carried by [`ErrorSource::Lexical`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A byte that cannot start or continue the current token.
    #[error("unexpected character '{}'", format_char(.0))]
    UnexpectedCharacter(char),
    /// A keyword that did not match `true`, `false` or `null`. Holds the text
    /// consumed up to and including the first mismatching byte.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    /// The input ended inside a comment, string, number or keyword.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A string literal whose bytes are not valid UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// A `\u` escape that does not denote a scalar value, such as a lone
    /// surrogate. Holds the offending code unit.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscape(u32),
}

/// A numeric token that is lexically valid but has no `i64`/`f64` value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The integer does not fit in `i64`.
    #[error("cannot convert '{text}' to an integer: {source}")]
    Integer {
        /// The token text.
        text: String,
        /// The standard library's reason.
        source: ParseIntError,
    },
    /// The float text was rejected by the standard parser.
    #[error("cannot convert '{text}' to a float: {source}")]
    Float {
        /// The token text.
        text: String,
        /// The standard library's reason.
        source: ParseFloatError,
    },
    /// The float rounds to an infinity.
    #[error("cannot convert '{text}' to a float: out of range")]
    FloatOutOfRange {
        /// The token text.
        text: String,
    },
}

/// Renders a character so that invisible and quoting characters stay legible
/// inside an error message.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn format_char(c: &char) -> String {
    match *c {
        '\'' => "\\'".into(),
        '\\' => "\\\\".into(),
        '\u{0008}' => "\\b".into(),
        '\u{000C}' => "\\f".into(),
        '\n' => "\\n".into(),
        '\r' => "\\r".into(),
        '\t' => "\\t".into(),
        '\0' => "\\0".into(),
        c if c.is_control() => format!("\\u{:04X}", c as u32),
        c if c.is_whitespace() && !c.is_ascii_whitespace() => format!("\\u{:04X}", c as u32),
        c => c.to_string(),
    }
}
