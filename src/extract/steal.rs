//! Stealing bytes from sources that can only write themselves out.
//!
//! A [`WriteTo`] source pushes its content into a [`ByteStealer`]. Sources
//! that own their storage hand it over with [`ByteStealer::give`], which
//! moves the first chunk into the stealer without copying. The stealer owns
//! that storage from then on; the source must not keep reading from it.

use std::io::{self, Cursor};

use bytes::{Buf, Bytes, BytesMut};
use tracing::debug;

use crate::error::{Error, Result};

/// A value that can push its remaining content into a [`ByteStealer`].
///
/// Implementations write everything they have left, return the number of
/// bytes written, and are drained afterwards.
pub trait WriteTo {
    /// Writes the remaining content into `sink`.
    fn write_to(&mut self, sink: &mut ByteStealer) -> io::Result<u64>;
}

#[derive(Debug, Default)]
enum Captured {
    #[default]
    Empty,
    /// First chunk, taken over as-is.
    Owned(Bytes),
    /// Two or more chunks, copied into one growing buffer.
    Appending(BytesMut),
}

/// A sink that captures every write made into it.
///
/// The first [`give`](ByteStealer::give) takes ownership of the chunk; later
/// writes are appended to a copy. Writes through [`std::io::Write`] always
/// copy since the caller keeps ownership of the slice.
#[derive(Debug, Default)]
pub struct ByteStealer {
    captured: Captured,
}

impl ByteStealer {
    /// Creates an empty stealer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands `chunk` to the stealer and returns its length.
    pub fn give(&mut self, chunk: Bytes) -> usize {
        let n = chunk.len();
        if matches!(self.captured, Captured::Empty) {
            self.captured = Captured::Owned(chunk);
        } else {
            self.append(&chunk);
        }
        n
    }

    /// Number of bytes captured so far.
    pub fn len(&self) -> usize {
        match &self.captured {
            Captured::Empty => 0,
            Captured::Owned(b) => b.len(),
            Captured::Appending(buf) => buf.len(),
        }
    }

    /// Returns true if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the stealer and returns the captured bytes.
    pub fn into_bytes(self) -> Bytes {
        match self.captured {
            Captured::Empty => Bytes::new(),
            Captured::Owned(b) => b,
            Captured::Appending(buf) => buf.freeze(),
        }
    }

    fn append(&mut self, data: &[u8]) {
        self.captured = match std::mem::take(&mut self.captured) {
            Captured::Empty => Captured::Appending(BytesMut::from(data)),
            Captured::Owned(first) => {
                let mut buf = BytesMut::with_capacity(first.len() + data.len());
                buf.extend_from_slice(&first);
                buf.extend_from_slice(data);
                Captured::Appending(buf)
            }
            Captured::Appending(mut buf) => {
                buf.extend_from_slice(data);
                Captured::Appending(buf)
            }
        };
    }
}

impl io::Write for ByteStealer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Drains `source` through a [`ByteStealer`] and returns what it wrote.
///
/// # Errors
///
/// - [`Error::ShortWrite`] if the count `source` reports differs from the
///   number of bytes captured
/// - [`Error::Io`] if `source` fails
pub fn steal_bytes<W: WriteTo + ?Sized>(source: &mut W) -> Result<Bytes> {
    let mut stealer = ByteStealer::new();
    let reported = source.write_to(&mut stealer)?;

    let captured = stealer.len();
    if reported != captured as u64 {
        debug!(reported, captured, "short write while stealing bytes");
        return Err(Error::ShortWrite { reported, captured });
    }

    Ok(stealer.into_bytes())
}

fn cursor_offset<T: AsRef<[u8]>>(cursor: &Cursor<T>) -> usize {
    let len = cursor.get_ref().as_ref().len();
    usize::try_from(cursor.position()).map_or(len, |pos| pos.min(len))
}

impl WriteTo for Cursor<Bytes> {
    fn write_to(&mut self, sink: &mut ByteStealer) -> io::Result<u64> {
        let offset = cursor_offset(self);
        let mut rest = self.get_ref().clone();
        rest.advance(offset);
        self.set_position(self.get_ref().len() as u64);
        Ok(sink.give(rest) as u64)
    }
}

impl WriteTo for Cursor<Vec<u8>> {
    fn write_to(&mut self, sink: &mut ByteStealer) -> io::Result<u64> {
        let offset = cursor_offset(self);
        let mut rest = Bytes::from(std::mem::take(self.get_mut()));
        rest.advance(offset);
        self.set_position(0);
        Ok(sink.give(rest) as u64)
    }
}

impl WriteTo for Cursor<String> {
    fn write_to(&mut self, sink: &mut ByteStealer) -> io::Result<u64> {
        let offset = cursor_offset(self);
        let mut rest = Bytes::from(std::mem::take(self.get_mut()));
        rest.advance(offset);
        self.set_position(0);
        Ok(sink.give(rest) as u64)
    }
}
