//! A JSON5 lexer and non-recursive parser.
//!
//! The input is a complete document held in memory. [`Lexer`] turns it into
//! [`Token`]s on demand and [`Parser`] drives a small state machine over
//! them, keeping explicit stacks instead of recursing, so deeply nested input
//! cannot exhaust the call stack.
//!
//! The accepted dialect is JSON plus `//` and `/* */` comments and trailing
//! commas in arrays and objects. Property names must be double-quoted
//! strings. `\u` escapes are opt-in through [`ParserOptions`].
//!
//! ```rust
//! use json5_parse::{Value, parse};
//!
//! let value = parse(
//!     br#"{
//!         // connection settings
//!         "host": "localhost",
//!         "ports": [8080, 8081,],
//!         "timeout": 2.5,
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(value.get("host").and_then(Value::as_str), Some("localhost"));
//! assert_eq!(value.get("timeout"), Some(&Value::Float(2.5)));
//! assert_eq!(
//!     value.to_string(),
//!     r#"{"host":"localhost","ports":[8080,8081],"timeout":2.5}"#
//! );
//! ```

mod byte_buffer;
mod error;
mod escape_buffer;
mod lexer;
mod literal_buffer;
mod numbers;
mod options;
mod parser;
mod value;

#[cfg(test)]
mod tests;

pub use error::{ConversionError, ErrorKind, ErrorSource, LexicalError, SyntaxError};
pub use lexer::{Lexer, Token, TokenKind};
pub use options::ParserOptions;
pub use parser::{Parser, parse, parse_with_options};
pub use value::{Array, Map, Value};
