//! Single-byte reads over any reader.

use std::io::{self, Read};

use super::{Message, to_reader};
use crate::error::Result;

/// Adds [`read_byte`](ByteReader::read_byte) to any [`Read`].
///
/// ```
/// use netbuf::ByteReader;
///
/// let mut r = ByteReader::new(&b"ab"[..]);
/// assert_eq!(r.read_byte()?, b'a');
/// assert_eq!(r.read_byte()?, b'b');
/// assert!(r.read_byte().is_err());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read> ByteReader<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads one byte. End of input is [`io::ErrorKind::UnexpectedEof`].
    pub fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    /// Returns a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl ByteReader<Box<dyn Read + Send>> {
    /// Builds a byte reader over a message, see [`to_reader`].
    pub fn from_message(message: impl Into<Message>) -> Result<Self> {
        Ok(Self::new(to_reader(message)?))
    }
}

impl<R: Read> Read for ByteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}
