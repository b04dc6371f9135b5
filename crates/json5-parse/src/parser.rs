//! The JSON5 parser.
//!
//! [`Parser`] pulls tokens from a [`Lexer`] and assembles the value tree
//! without recursing. Three stacks replace the call stack of a
//! recursive-descent parser:
//!
//! - `values`: the open composites, innermost on top. A finished top-level
//!   scalar is also parked here until end of input.
//! - `stages`: for every open composite, the parse state that was current
//!   when it was opened. Popping it on `]`/`}` tells the parser where the
//!   finished composite goes and which state to resume.
//! - `pending_names`: property names whose value has not been parsed yet.
//!
//! The composite on top of `values` is mutated in place while it is open and
//! moved into its parent when it closes.
//!
//! # Examples
//!
//! ```rust
//! use json5_parse::{Value, parse};
//!
//! let value = parse(b"{\"key\": [null, true, 3.14]} // trailing comment").unwrap();
//! assert_eq!(value.get("key").and_then(Value::as_array).map(Vec::len), Some(3));
//! ```
#![allow(clippy::enum_glob_use)]

use tracing::{debug, trace};

use crate::{
    error::{ErrorSource, SyntaxError},
    lexer::{Lexer, Token, TokenKind},
    numbers::NumberLexeme,
    options::ParserOptions,
    value::{Array, Map, Value},
};

/// The syntactic position the parser expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforeArrayItem,
    AfterArrayItem,
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    AfterPropertyValue,
    End,
}

/// Parses a complete JSON5 document with default [`ParserOptions`].
///
/// # Errors
///
/// Returns the first lexical, syntax or conversion error encountered. No
/// partial value is returned.
///
/// # Examples
///
/// ```rust
/// use json5_parse::{Value, parse};
///
/// assert_eq!(parse("[1, 2, 3,]").unwrap().as_array().map(Vec::len), Some(3));
///
/// let err = parse(r#"{"a" 1}"#).unwrap_err();
/// assert_eq!(err.to_string(), "json5: unexpected token '1' at position 5");
/// ```
pub fn parse<S: AsRef<[u8]> + ?Sized>(input: &S) -> Result<Value, SyntaxError> {
    Parser::new(input.as_ref()).parse()
}

/// Parses a complete JSON5 document.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_options<S: AsRef<[u8]> + ?Sized>(
    input: &S,
    options: ParserOptions,
) -> Result<Value, SyntaxError> {
    Parser::with_options(input.as_ref(), options).parse()
}

/// Token-driven JSON5 parser. Owns its lexer and all intermediate state.
#[derive(Debug)]
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    parse_state: ParseState,

    values: Vec<Value>,
    stages: Vec<ParseState>,
    pending_names: Vec<String>,

    max_depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser over `input` with default [`ParserOptions`].
    #[must_use]
    pub fn new(input: &'src [u8]) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Creates a parser over `input` with the given options.
    #[must_use]
    pub fn with_options(input: &'src [u8], options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::with_options(input, &options),
            parse_state: ParseState::Start,
            values: Vec::with_capacity(16),
            stages: Vec::with_capacity(16),
            pending_names: Vec::new(),
            max_depth: options.max_depth,
        }
    }

    /// Runs the parser to completion.
    ///
    /// # Errors
    ///
    /// See [`parse`].
    pub fn parse(mut self) -> Result<Value, SyntaxError> {
        debug!("parsing");
        let result = self.run();
        match &result {
            Ok(_) => debug!(position = self.lexer.position(), "parsed"),
            Err(err) => debug!(%err, "parse failed"),
        }
        result
    }

    fn run(&mut self) -> Result<Value, SyntaxError> {
        loop {
            let token = self.lexer.token()?;
            if token.kind == TokenKind::Eof {
                return self.finish(token.position);
            }
            self.dispatch_parse_state(token)?;
        }
    }

    fn finish(&mut self, position: usize) -> Result<Value, SyntaxError> {
        if self.parse_state != ParseState::End {
            return Err(SyntaxError::new(ErrorSource::UnexpectedEndOfInput, position));
        }

        debug_assert!(self.stages.is_empty() && self.pending_names.is_empty());
        debug_assert_eq!(self.values.len(), 1);
        self.values
            .pop()
            .ok_or_else(|| SyntaxError::new(ErrorSource::UnexpectedEndOfInput, position))
    }

    fn dispatch_parse_state(&mut self, token: Token) -> Result<(), SyntaxError> {
        use ParseState::*;

        trace!(state = ?self.parse_state, token = ?token.kind, "dispatch");

        match (self.parse_state, token.kind) {
            (
                Start | BeforeArrayItem | BeforePropertyValue,
                TokenKind::ArrayBegin | TokenKind::ObjectBegin,
            ) => self.push(&token)?,

            (Start, kind) if kind.is_scalar() => {
                let value = Self::decode(token)?;
                self.values.push(value);
                self.parse_state = End;
            }
            (BeforeArrayItem | BeforePropertyValue, kind) if kind.is_scalar() => {
                let position = token.position;
                let value = Self::decode(token)?;
                self.parse_state = self.attach(self.parse_state, value, position)?;
            }

            (BeforeArrayItem | AfterArrayItem, TokenKind::ArrayEnd)
            | (BeforePropertyName | AfterPropertyValue, TokenKind::ObjectEnd) => {
                self.pop(&token)?;
            }

            (AfterArrayItem, TokenKind::ValueSep) => self.parse_state = BeforeArrayItem,
            (AfterPropertyValue, TokenKind::ValueSep) => self.parse_state = BeforePropertyName,

            (BeforePropertyName, TokenKind::String) => {
                self.pending_names.push(token.raw.into_owned());
                self.parse_state = AfterPropertyName;
            }
            (AfterPropertyName, TokenKind::PairSep) => self.parse_state = BeforePropertyValue,

            _ => return Err(Self::unexpected(&token)),
        }

        #[cfg(any(test, feature = "fuzzing"))]
        self.assert_stack_invariants();

        Ok(())
    }

    /// Every open composite has exactly one stage entry, and no more names
    /// can be pending than there are open composites.
    #[cfg(any(test, feature = "fuzzing"))]
    fn assert_stack_invariants(&self) {
        let parked = usize::from(self.parse_state == ParseState::End);
        assert_eq!(
            self.values.len(),
            self.stages.len() + parked,
            "Internal error: value and stage stacks out of step in {:?}",
            self.parse_state
        );
        assert!(
            self.pending_names.len() <= self.stages.len(),
            "Internal error: {} pending names for {} open composites",
            self.pending_names.len(),
            self.stages.len()
        );
        assert!(
            self.stages.len() <= self.max_depth,
            "Internal error: depth limit overrun"
        );
    }

    /// Opens a new array or object.
    fn push(&mut self, token: &Token) -> Result<(), SyntaxError> {
        if self.stages.len() >= self.max_depth {
            return Err(SyntaxError::new(
                ErrorSource::DepthLimitExceeded(self.max_depth),
                token.position,
            ));
        }

        let (value, next_state) = match token.kind {
            TokenKind::ArrayBegin => (Value::Array(Array::new()), ParseState::BeforeArrayItem),
            TokenKind::ObjectBegin => (Value::Object(Map::new()), ParseState::BeforePropertyName),
            _ => return Err(Self::unexpected(token)),
        };

        self.stages.push(self.parse_state);
        self.values.push(value);
        self.parse_state = next_state;
        Ok(())
    }

    /// Closes the innermost composite and hands it to its parent.
    fn pop(&mut self, token: &Token) -> Result<(), SyntaxError> {
        let Some(resume) = self.stages.pop() else {
            return Err(Self::unexpected(token));
        };

        if self.values.len() == 1 {
            debug_assert_eq!(resume, ParseState::Start);
            self.parse_state = ParseState::End;
            return Ok(());
        }

        let Some(finished) = self.values.pop() else {
            return Err(Self::unexpected(token));
        };
        self.parse_state = self.attach(resume, finished, token.position)?;
        Ok(())
    }

    /// Stores `value` in the composite on top of the value stack, as directed
    /// by the state that was current when the slot opened. Returns the state
    /// to continue in.
    fn attach(
        &mut self,
        slot: ParseState,
        value: Value,
        position: usize,
    ) -> Result<ParseState, SyntaxError> {
        match (slot, self.values.last_mut()) {
            (ParseState::BeforeArrayItem, Some(Value::Array(items))) => {
                items.push(value);
                Ok(ParseState::AfterArrayItem)
            }
            (ParseState::BeforePropertyValue, Some(Value::Object(members))) => {
                match self.pending_names.pop() {
                    Some(name) => {
                        members.insert(name, value);
                        Ok(ParseState::AfterPropertyValue)
                    }
                    None => Err(SyntaxError::new(
                        ErrorSource::UnexpectedToken(value.to_string()),
                        position,
                    )),
                }
            }
            // Unreachable while the stacks are consistent.
            _ => Err(SyntaxError::new(
                ErrorSource::UnexpectedToken(value.to_string()),
                position,
            )),
        }
    }

    fn decode(token: Token) -> Result<Value, SyntaxError> {
        let position = token.position;
        let number = |lexeme: NumberLexeme<'_>| {
            lexeme
                .to_value()
                .map_err(|err| SyntaxError::new(err, position))
        };

        match token.kind {
            TokenKind::String => Ok(Value::String(token.raw.into_owned())),
            TokenKind::Integer => number(NumberLexeme::Integer(&token.raw)),
            TokenKind::Float => number(NumberLexeme::Float(&token.raw)),
            TokenKind::True => Ok(Value::Boolean(true)),
            TokenKind::False => Ok(Value::Boolean(false)),
            TokenKind::Null => Ok(Value::Null),
            _ => Err(Self::unexpected(&token)),
        }
    }

    fn unexpected(token: &Token) -> SyntaxError {
        SyntaxError::new(ErrorSource::UnexpectedToken(token.to_string()), token.position)
    }
}
