//! Append-only accumulator for the token under construction.
//!
//! The lexer decodes strings and numbers byte by byte. Escapes mean a decoded
//! string is not a slice of the input, so every such token is copied into a
//! `ByteBuffer` and turned into an owned `String` once the token completes.
//!
//! Invariants
//! - Bytes are only ever appended; the buffer is emptied as a whole, either by
//!   [`ByteBuffer::clear`] at the start of a token or by
//!   [`ByteBuffer::take_string`] when it completes.
//! - The buffer does not validate UTF-8 while accumulating. Input bytes are
//!   copied verbatim and escapes push complete scalars, so validation happens
//!   once, in `take_string`.
use core::str::Utf8Error;

#[derive(Debug, Default)]
pub(crate) struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    pub(crate) fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(32),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    #[inline]
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends the UTF-8 encoding of `ch`.
    pub(crate) fn push_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.bytes
            .extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Moves the accumulated bytes out as a `String`, leaving the buffer
    /// empty. The buffer is emptied on failure as well.
    pub(crate) fn take_string(&mut self) -> Result<String, Utf8Error> {
        let bytes = core::mem::take(&mut self.bytes);
        String::from_utf8(bytes).map_err(|err| err.utf8_error())
    }
}

#[cfg(test)]
mod tests {
    use super::ByteBuffer;

    #[test]
    fn starts_empty() {
        let buf = ByteBuffer::new();
        assert_eq!(buf.len(), 0);
        assert!(buf.as_bytes().is_empty());
    }

    #[test]
    fn push_and_take() {
        let mut buf = ByteBuffer::new();
        buf.push(b'a');
        buf.extend_from_slice(b"bc");
        buf.push_char('\u{00e5}');
        assert_eq!(buf.as_bytes(), "abc\u{00e5}".as_bytes());
        assert_eq!(buf.take_string().unwrap(), "abc\u{00e5}");
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn clear_discards_partial_token() {
        let mut buf = ByteBuffer::new();
        buf.extend_from_slice(b"12.");
        buf.clear();
        buf.push(b'7');
        assert_eq!(buf.take_string().unwrap(), "7");
    }

    #[test]
    fn invalid_utf8_is_reported_and_cleared() {
        let mut buf = ByteBuffer::new();
        buf.extend_from_slice(&[b'a', 0xFF, b'b']);
        let err = buf.take_string().unwrap_err();
        assert_eq!(err.valid_up_to(), 1);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn four_byte_scalar() {
        let mut buf = ByteBuffer::new();
        buf.push_char('\u{1F600}');
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.take_string().unwrap(), "\u{1F600}");
    }
}
