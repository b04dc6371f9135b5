//! Accumulates the four hexadecimal digits of a `\uXXXX` escape.
//!
//! The buffer yields one UTF-16 code unit per escape. Pairing surrogates into
//! a scalar value is the lexer's job, since the two halves arrive as separate
//! escapes.

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    unit: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits.
    pub(crate) fn reset(&mut self) {
        self.unit = 0;
        self.len = 0;
    }

    /// Feeds one byte of the escape.
    ///
    /// - Returns `None` if `b` is not an ASCII hex digit; the buffer is left
    ///   untouched.
    /// - Returns `Some(None)` while fewer than four digits have been seen.
    /// - Returns `Some(Some(unit))` on the fourth digit and resets the buffer.
    pub(crate) fn feed(&mut self, b: u8) -> Option<Option<u16>> {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None,
        };

        self.unit = (self.unit << 4) | u16::from(digit);
        self.len += 1;

        if self.len == 4 {
            let unit = self.unit;
            self.reset();
            Some(Some(unit))
        } else {
            Some(None)
        }
    }
}
