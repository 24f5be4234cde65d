//! Turning messages into readable streams.

use std::collections::VecDeque;
use std::io::{self, Read};

use bytes::{Buf, Bytes};

use super::{ByteStealer, Message, WriteTo, steal_bytes, unrecognized};
use crate::error::Result;

/// Reads a list of fragments back to back without concatenating them.
#[derive(Debug, Default, Clone)]
pub struct FragmentReader {
    fragments: VecDeque<Bytes>,
}

impl FragmentReader {
    /// Creates a reader over `fragments`, in order.
    pub fn new(fragments: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            fragments: fragments.into_iter().filter(|f| !f.is_empty()).collect(),
        }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.fragments.iter().map(Bytes::len).sum()
    }
}

impl Read for FragmentReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let Some(front) = self.fragments.front_mut() else {
            return Ok(0);
        };
        let n = front.len().min(out.len());
        out[..n].copy_from_slice(&front[..n]);
        front.advance(n);
        if front.is_empty() {
            self.fragments.pop_front();
        }
        Ok(n)
    }
}

impl WriteTo for FragmentReader {
    fn write_to(&mut self, sink: &mut ByteStealer) -> io::Result<u64> {
        let mut written = 0u64;
        while let Some(fragment) = self.fragments.pop_front() {
            written += sink.give(fragment) as u64;
        }
        Ok(written)
    }
}

/// Wraps `message` as a reader over its bytes.
///
/// In-memory kinds are read in place; write-to sources are stolen first.
///
/// # Errors
///
/// Same as [`to_bytes`](super::to_bytes) for the kinds it shares.
pub fn to_reader(message: impl Into<Message>) -> Result<Box<dyn Read + Send>> {
    match message.into() {
        Message::Bytes(b) => Ok(Box::new(b.reader())),
        Message::Fragments(fragments) => Ok(Box::new(FragmentReader::new(fragments))),
        Message::Text(s) => Ok(Box::new(Bytes::from(s).reader())),
        Message::Buffer(buf) => Ok(Box::new(buf.freeze().reader())),
        Message::WriterTo(mut source) => Ok(Box::new(steal_bytes(&mut *source)?.reader())),
        Message::Reader(reader) => Ok(reader),
        Message::Unsupported(type_name) => Err(unrecognized(type_name)),
    }
}

/// Like [`to_reader`], for call sites that have already validated `message`.
///
/// # Panics
///
/// Panics if `message` cannot be turned into a reader.
#[track_caller]
pub fn must_to_reader(message: impl Into<Message>) -> Box<dyn Read + Send> {
    match to_reader(message) {
        Ok(r) => r,
        Err(e) => panic!("{e}"),
    }
}
