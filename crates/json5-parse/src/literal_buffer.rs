use crate::lexer::TokenKind;

/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(TokenKind),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// `None`  ➜  we are **not** in the middle of a literal
/// `Some`  ➜  `(remaining_bytes, token_kind)` while matching
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(Option<(&'static [u8], TokenKind)>);

impl ExpectedLiteralBuffer {
    /// No literal is in flight
    pub(crate) fn none() -> Self {
        ExpectedLiteralBuffer(None)
    }

    /// Start matching *before* the first byte (`n`, `t`, or `f`). The first
    /// byte is fed through [`step`](Self::step) like every other.
    pub(crate) fn new(first: u8) -> Self {
        match first {
            b'n' => ExpectedLiteralBuffer(Some((b"null", TokenKind::Null))),
            b't' => ExpectedLiteralBuffer(Some((b"true", TokenKind::True))),
            b'f' => ExpectedLiteralBuffer(Some((b"false", TokenKind::False))),
            _ => ExpectedLiteralBuffer::none(),
        }
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, c: u8) -> Step {
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((expected, rest)) if *expected == c => {
                if rest.is_empty() {
                    Step::Done(kind)
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            // Mismatch: restore the state we took at the top
            _ => {
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}
