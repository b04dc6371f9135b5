//! The JSON5 tokenizer.
//!
//! [`Lexer`] is pull based: every call to [`Lexer::token`] resets the
//! sub-state machine, scans forward from the current byte offset and stops as
//! soon as exactly one token (or an error) has been produced. The byte offset
//! survives between calls, the sub-state and scratch buffer do not.
//!
//! # Examples
//!
//! ```rust
//! use json5_parse::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new(b"[1, // one\n 2.5]");
//! let kinds: Vec<_> = lexer.by_ref().map(|t| t.unwrap().kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::ArrayBegin,
//!         TokenKind::Integer,
//!         TokenKind::ValueSep,
//!         TokenKind::Float,
//!         TokenKind::ArrayEnd,
//!     ]
//! );
//! ```
#![allow(clippy::enum_glob_use)]

use core::fmt;
use std::borrow::Cow;

use bstr::ByteSlice;
use tracing::trace;

use crate::{
    byte_buffer::ByteBuffer,
    error::{LexicalError, SyntaxError},
    escape_buffer::UnicodeEscapeBuffer,
    literal_buffer::{self, ExpectedLiteralBuffer},
    options::ParserOptions,
    value::write_escaped_string,
};

/// The kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `[`
    ArrayBegin,
    /// `]`
    ArrayEnd,
    /// `{`
    ObjectBegin,
    /// `}`
    ObjectEnd,
    /// `,`
    ValueSep,
    /// `:`
    PairSep,
    /// A double-quoted string; `raw` holds the decoded content.
    String,
    /// A number without fraction or exponent.
    Integer,
    /// A number with a fraction, an exponent or both.
    Float,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// End of input. Returned for every call once the input is exhausted.
    Eof,
}

impl TokenKind {
    /// Returns `true` for tokens that decode to a non-composite value.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Integer | Self::Float | Self::True | Self::False | Self::Null
        )
    }
}

/// The smallest lexical unit the lexer recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token text. For strings this is the decoded content without the
    /// surrounding quotes; for numbers it is the source text; for punctuators
    /// and keywords it is the fixed spelling; for [`TokenKind::Eof`] it is
    /// empty.
    pub raw: Cow<'static, str>,
    /// Byte offset of the first byte of the token.
    pub position: usize,
}

impl Token {
    fn fixed(kind: TokenKind, raw: &'static str, position: usize) -> Self {
        Self {
            kind,
            raw: Cow::Borrowed(raw),
            position,
        }
    }

    fn punctuator(c: u8, position: usize) -> Option<Self> {
        let (kind, raw) = match c {
            b'[' => (TokenKind::ArrayBegin, "["),
            b']' => (TokenKind::ArrayEnd, "]"),
            b'{' => (TokenKind::ObjectBegin, "{"),
            b'}' => (TokenKind::ObjectEnd, "}"),
            b',' => (TokenKind::ValueSep, ","),
            b':' => (TokenKind::PairSep, ":"),
            _ => return None,
        };
        Some(Self::fixed(kind, raw, position))
    }

    fn keyword(kind: TokenKind, position: usize) -> Self {
        let raw = match kind {
            TokenKind::True => "true",
            TokenKind::False => "false",
            _ => "null",
        };
        Self::fixed(kind, raw, position)
    }

    fn eof(position: usize) -> Self {
        Self::fixed(TokenKind::Eof, "", position)
    }
}

impl fmt::Display for Token {
    /// Renders the token the way it appears in error messages: strings are
    /// re-quoted and escaped, everything else is wrapped in single quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::String => {
                f.write_str("\"")?;
                write_escaped_string(&self.raw, f)?;
                f.write_str("\"")
            }
            _ => write!(f, "'{}'", self.raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    Comment,
    LineComment,
    BlockComment,
    BlockCommentStar,
    Value,
    String,
    StringEscape,
    StringEscapeUnicode,
    SurrogateEscape,
    SurrogateEscapeUnicode,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
    Literal,
}

/// Pull-based JSON5 tokenizer over a complete input buffer.
///
/// `Lexer` also implements [`Iterator`], yielding every token up to but not
/// including [`TokenKind::Eof`], and stopping after the first error.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src [u8],

    /// Byte offset of the next unread byte. Never decreases.
    pos: usize,

    /// Sub-state and scratch for the token under construction; reset on every
    /// call to `token`.
    lex_state: LexState,
    token_start: usize,
    buffer: ByteBuffer,
    expected_literal: ExpectedLiteralBuffer,
    unicode_escape_buffer: UnicodeEscapeBuffer,
    high_surrogate: Option<u16>,

    allow_control_characters: bool,
    unicode_escapes: bool,

    /// Set once the iterator has produced `Eof` or an error.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source` with default [`ParserOptions`].
    #[must_use]
    pub fn new(source: &'src [u8]) -> Self {
        Self::with_options(source, &ParserOptions::default())
    }

    /// Creates a lexer over `source`. Only the string-related options apply
    /// to the lexer; `max_depth` is enforced by the parser.
    #[must_use]
    pub fn with_options(source: &'src [u8], options: &ParserOptions) -> Self {
        Self {
            source,
            pos: 0,
            lex_state: LexState::Default,
            token_start: 0,
            buffer: ByteBuffer::new(),
            expected_literal: ExpectedLiteralBuffer::none(),
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
            high_surrogate: None,
            allow_control_characters: options.allow_control_characters,
            unicode_escapes: options.unicode_escapes,
            finished: false,
        }
    }

    /// Current byte offset into the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Scans the next token.
    ///
    /// Once the input is exhausted every call returns a [`TokenKind::Eof`]
    /// token. Running out of input inside a block comment, string, literal or
    /// a number that still needs digits is an error instead.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] of kind [`Lexical`](crate::ErrorKind::Lexical)
    /// if the bytes at the current position do not form a token. The lexer
    /// does not recover; further calls after an error have unspecified
    /// results.
    pub fn token(&mut self) -> Result<Token, SyntaxError> {
        self.reset();

        loop {
            let next = self.peek();
            if let Some(tok) = self.lex_state_step(next)? {
                trace!(kind = ?tok.kind, position = tok.position, "token");
                return Ok(tok);
            }
        }
    }

    fn reset(&mut self) {
        self.lex_state = LexState::Default;
        self.buffer.clear();
        self.expected_literal = ExpectedLiteralBuffer::none();
        self.high_surrogate = None;
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consumes `c` into the token buffer and moves to `state`.
    #[inline]
    fn accept(&mut self, c: u8, state: LexState) {
        self.buffer.push(c);
        self.advance();
        self.lex_state = state;
    }

    fn begin_token(&mut self) {
        self.token_start = self.pos;
    }

    #[allow(clippy::too_many_lines)]
    fn lex_state_step(&mut self, next: Option<u8>) -> Result<Option<Token>, SyntaxError> {
        use LexState::*;
        let state = self.lex_state;
        match state {
            Default => match next {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {
                    self.advance();
                    Ok(None)
                }
                Some(b'/') => {
                    self.advance();
                    self.lex_state = Comment;
                    Ok(None)
                }
                Some(_) => {
                    self.lex_state = Value;
                    Ok(None)
                }
                None => Ok(Some(Token::eof(self.pos))),
            },

            // -------------------------- COMMENTS -----------------------------
            Comment => match next {
                Some(b'/') => {
                    self.advance();
                    self.lex_state = LineComment;
                    Ok(None)
                }
                Some(b'*') => {
                    self.advance();
                    self.lex_state = BlockComment;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            LineComment => match next {
                Some(b'\n' | b'\r') => {
                    self.advance();
                    self.lex_state = Default;
                    Ok(None)
                }
                Some(_) => {
                    self.skip_while(|b| b != b'\n' && b != b'\r');
                    Ok(None)
                }
                // A line comment may run to the end of input.
                None => {
                    self.lex_state = Default;
                    Ok(None)
                }
            },

            BlockComment => match next {
                Some(b'*') => {
                    self.advance();
                    self.lex_state = BlockCommentStar;
                    Ok(None)
                }
                Some(_) => {
                    self.skip_while(|b| b != b'*');
                    Ok(None)
                }
                None => Err(self.invalid_char(None)),
            },

            BlockCommentStar => match next {
                Some(b'/') => {
                    self.advance();
                    self.lex_state = Default;
                    Ok(None)
                }
                // `**/` still closes the comment.
                Some(b'*') => {
                    self.advance();
                    Ok(None)
                }
                Some(_) => {
                    self.advance();
                    self.lex_state = BlockComment;
                    Ok(None)
                }
                None => Err(self.invalid_char(None)),
            },

            // -------------------------- VALUE entry --------------------------
            Value => match next {
                Some(c @ (b'[' | b']' | b'{' | b'}' | b',' | b':')) => {
                    let start = self.pos;
                    self.advance();
                    Ok(Token::punctuator(c, start))
                }
                Some(b'"') => {
                    self.begin_token();
                    self.advance();
                    self.lex_state = String;
                    Ok(None)
                }
                Some(c @ b'-') => {
                    self.begin_token();
                    self.accept(c, Sign);
                    Ok(None)
                }
                Some(c @ b'0') => {
                    self.begin_token();
                    self.accept(c, Zero);
                    Ok(None)
                }
                Some(c @ b'1'..=b'9') => {
                    self.begin_token();
                    self.accept(c, DecimalInteger);
                    Ok(None)
                }
                Some(c @ (b'f' | b't' | b'n')) => {
                    self.begin_token();
                    self.expected_literal = ExpectedLiteralBuffer::new(c);
                    self.lex_state = Literal;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            // -------------------------- LITERALS -----------------------------
            Literal => match next {
                Some(c) => match self.expected_literal.step(c) {
                    literal_buffer::Step::NeedMore => {
                        self.advance();
                        Ok(None)
                    }
                    literal_buffer::Step::Done(kind) => {
                        self.advance();
                        Ok(Some(Token::keyword(kind, self.token_start)))
                    }
                    literal_buffer::Step::Reject => {
                        // The mismatching byte is part of the reported text.
                        self.advance();
                        Err(self.invalid_literal())
                    }
                },
                None => Err(self.invalid_literal()),
            },

            // -------------------------- NUMBERS ------------------------------
            Sign => match next {
                Some(c @ b'0') => {
                    self.accept(c, Zero);
                    Ok(None)
                }
                Some(c @ b'1'..=b'9') => {
                    self.accept(c, DecimalInteger);
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            Zero => match next {
                Some(c @ b'.') => {
                    self.accept(c, DecimalPoint);
                    Ok(None)
                }
                Some(c @ (b'e' | b'E')) => {
                    self.accept(c, DecimalExponent);
                    Ok(None)
                }
                _ => self.produce(TokenKind::Integer).map(Some),
            },

            DecimalInteger => match next {
                Some(b'0'..=b'9') => {
                    self.copy_digits();
                    Ok(None)
                }
                Some(c @ b'.') => {
                    self.accept(c, DecimalPoint);
                    Ok(None)
                }
                Some(c @ (b'e' | b'E')) => {
                    self.accept(c, DecimalExponent);
                    Ok(None)
                }
                _ => self.produce(TokenKind::Integer).map(Some),
            },

            DecimalPoint => match next {
                Some(b'0'..=b'9') => {
                    self.copy_digits();
                    self.lex_state = DecimalFraction;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            DecimalFraction => match next {
                Some(b'0'..=b'9') => {
                    self.copy_digits();
                    Ok(None)
                }
                Some(c @ (b'e' | b'E')) => {
                    self.accept(c, DecimalExponent);
                    Ok(None)
                }
                _ => self.produce(TokenKind::Float).map(Some),
            },

            DecimalExponent => match next {
                Some(c @ (b'+' | b'-')) => {
                    self.accept(c, DecimalExponentSign);
                    Ok(None)
                }
                Some(b'0'..=b'9') => {
                    self.copy_digits();
                    self.lex_state = DecimalExponentInteger;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            DecimalExponentSign => match next {
                Some(b'0'..=b'9') => {
                    self.copy_digits();
                    self.lex_state = DecimalExponentInteger;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            DecimalExponentInteger => match next {
                Some(b'0'..=b'9') => {
                    self.copy_digits();
                    Ok(None)
                }
                _ => self.produce(TokenKind::Float).map(Some),
            },

            // -------------------------- STRING -------------------------------
            String => match next {
                Some(b'"') => {
                    self.advance();
                    self.produce(TokenKind::String).map(Some)
                }
                Some(b'\\') => {
                    self.advance();
                    self.lex_state = StringEscape;
                    Ok(None)
                }
                Some(c) if c < 0x20 && !self.allow_control_characters => {
                    Err(self.invalid_char(Some(c)))
                }
                Some(_) => {
                    self.copy_string_run();
                    Ok(None)
                }
                None => Err(self.invalid_char(None)),
            },

            StringEscape => {
                let decoded = match next {
                    Some(c @ (b'"' | b'\\' | b'/')) => c,
                    Some(b'b') => 0x08,
                    Some(b'f') => 0x0C,
                    Some(b'n') => b'\n',
                    Some(b'r') => b'\r',
                    Some(b't') => b'\t',
                    Some(b'u') if self.unicode_escapes => {
                        self.advance();
                        self.unicode_escape_buffer.reset();
                        self.lex_state = StringEscapeUnicode;
                        return Ok(None);
                    }
                    c => return Err(self.invalid_char(c)),
                };
                self.accept(decoded, String);
                Ok(None)
            }

            StringEscapeUnicode => {
                let Some(c) = next else {
                    return Err(self.invalid_char(None));
                };
                match self.unicode_escape_buffer.feed(c) {
                    Some(Some(unit)) => {
                        self.advance();
                        self.push_code_unit(unit)?;
                        Ok(None)
                    }
                    Some(None) => {
                        self.advance();
                        Ok(None)
                    }
                    None => Err(self.invalid_char(Some(c))),
                }
            }

            // After a high surrogate only `\u` followed by a low surrogate may
            // follow.
            SurrogateEscape => match next {
                Some(b'\\') => {
                    self.advance();
                    self.lex_state = SurrogateEscapeUnicode;
                    Ok(None)
                }
                None => Err(self.invalid_char(None)),
                Some(_) => Err(self.lone_surrogate()),
            },

            SurrogateEscapeUnicode => match next {
                Some(b'u') => {
                    self.advance();
                    self.unicode_escape_buffer.reset();
                    self.lex_state = StringEscapeUnicode;
                    Ok(None)
                }
                None => Err(self.invalid_char(None)),
                Some(_) => Err(self.lone_surrogate()),
            },
        }
    }

    /// Copies a run of ASCII digits into the token buffer.
    fn copy_digits(&mut self) {
        let run = self.source[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.buffer
            .extend_from_slice(&self.source[self.pos..self.pos + run]);
        self.pos += run;
    }

    /// Fast path for string bodies: copies every byte up to the next quote,
    /// backslash or (when rejected) control byte in one pass.
    fn copy_string_run(&mut self) {
        let allow_control = self.allow_control_characters;
        let run = self.source[self.pos..]
            .iter()
            .take_while(|&&b| b != b'"' && b != b'\\' && (allow_control || b >= 0x20))
            .count();
        self.buffer
            .extend_from_slice(&self.source[self.pos..self.pos + run]);
        self.pos += run;
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        let run = self.source[self.pos..]
            .iter()
            .take_while(|&&b| pred(b))
            .count();
        self.pos += run;
    }

    fn push_code_unit(&mut self, unit: u16) -> Result<(), SyntaxError> {
        match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                self.lex_state = LexState::SurrogateEscape;
                return Ok(());
            }
            (Some(high), 0xDC00..=0xDFFF) => {
                let code =
                    0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                let ch = char::from_u32(code).ok_or_else(|| {
                    SyntaxError::new(LexicalError::InvalidUnicodeEscape(code), self.pos)
                })?;
                self.buffer.push_char(ch);
            }
            (Some(high), _) => {
                return Err(SyntaxError::new(
                    LexicalError::InvalidUnicodeEscape(u32::from(high)),
                    self.pos,
                ));
            }
            (None, _) => {
                // Every non-surrogate BMP code unit is a scalar value.
                let ch = char::from_u32(u32::from(unit)).ok_or_else(|| {
                    SyntaxError::new(LexicalError::InvalidUnicodeEscape(u32::from(unit)), self.pos)
                })?;
                self.buffer.push_char(ch);
            }
        }
        self.lex_state = LexState::String;
        Ok(())
    }

    /// Finishes a string or number token from the scratch buffer.
    fn produce(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        let raw = self
            .buffer
            .take_string()
            .map_err(|_| SyntaxError::new(LexicalError::InvalidUtf8, self.token_start))?;
        Ok(Token {
            kind,
            raw: Cow::Owned(raw),
            position: self.token_start,
        })
    }

    // ------------------------------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------------------------------

    fn invalid_char(&self, c: Option<u8>) -> SyntaxError {
        match c {
            None => SyntaxError::new(LexicalError::UnexpectedEndOfInput, self.pos),
            Some(_) => {
                let ch = self.source[self.pos..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                SyntaxError::new(LexicalError::UnexpectedCharacter(ch), self.pos)
            }
        }
    }

    fn invalid_literal(&self) -> SyntaxError {
        let text = self.source[self.token_start..self.pos].to_str_lossy();
        SyntaxError::new(
            LexicalError::UnexpectedToken(text.into_owned()),
            self.token_start,
        )
    }

    fn lone_surrogate(&self) -> SyntaxError {
        let high = self.high_surrogate.map_or(0, u32::from);
        SyntaxError::new(LexicalError::InvalidUnicodeEscape(high), self.pos)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.token() {
            Ok(tok) if tok.kind == TokenKind::Eof => {
                self.finished = true;
                None
            }
            Ok(tok) => Some(Ok(tok)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
