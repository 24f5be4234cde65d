//! Byte extraction from heterogeneous message values.
//!
//! A [`Message`] is one of a closed set of source kinds. [`to_bytes`] turns
//! any of them into a contiguous [`Bytes`], copying only when the source does
//! not already own a buffer that can be handed over:
//!
//! | Kind        | Result                                        |
//! |-------------|-----------------------------------------------|
//! | `Bytes`     | returned as-is                                |
//! | `Fragments` | concatenated once into a presized buffer      |
//! | `Text`      | the string's allocation is moved, not copied  |
//! | `Buffer`    | frozen in place                               |
//! | `WriterTo`  | captured through a [`ByteStealer`]            |
//! | `Reader`    | drained into a new buffer                     |
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use netbuf::{Message, to_bytes};
//!
//! let parts = vec![Bytes::from_static(&[1, 2]), Bytes::from_static(&[3])];
//! assert_eq!(to_bytes(parts)?, Bytes::from_static(&[1, 2, 3]));
//!
//! let err = to_bytes(Message::unsupported(&42)).unwrap_err();
//! assert_eq!(err.to_string(), "unrecognized type: i32");
//! # Ok::<(), netbuf::Error>(())
//! ```

mod byte_reader;
mod reader;
mod steal;

use std::fmt;
use std::io::Read;

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::error::{Error, Result};

pub use byte_reader::ByteReader;
pub use reader::{FragmentReader, must_to_reader, to_reader};
pub use steal::{ByteStealer, WriteTo, steal_bytes};

/// A message value whose bytes can be extracted.
pub enum Message {
    /// A single contiguous byte sequence.
    Bytes(Bytes),
    /// A list of byte fragments to be read back to back.
    Fragments(Vec<Bytes>),
    /// UTF-8 text.
    Text(String),
    /// A buffer that exposes its own bytes.
    Buffer(BytesMut),
    /// A source that can only push its content into a sink.
    WriterTo(Box<dyn WriteTo + Send>),
    /// A generic readable stream.
    Reader(Box<dyn Read + Send>),
    /// A value of an unsupported type, identified by its type name.
    Unsupported(&'static str),
}

impl Message {
    /// Wraps a write-to source.
    pub fn writer_to<W: WriteTo + Send + 'static>(source: W) -> Self {
        Message::WriterTo(Box::new(source))
    }

    /// Wraps a reader.
    pub fn reader<R: Read + Send + 'static>(reader: R) -> Self {
        Message::Reader(Box::new(reader))
    }

    /// Records a value that no extractor understands.
    pub fn unsupported<T: ?Sized>(value: &T) -> Self {
        Message::Unsupported(std::any::type_name_of_val(value))
    }

    /// Short name of the source kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Bytes(_) => "bytes",
            Message::Fragments(_) => "fragments",
            Message::Text(_) => "text",
            Message::Buffer(_) => "buffer",
            Message::WriterTo(_) => "writer-to",
            Message::Reader(_) => "reader",
            Message::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Message::Fragments(v) => f.debug_tuple("Fragments").field(v).finish(),
            Message::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Message::Buffer(b) => f.debug_tuple("Buffer").field(b).finish(),
            Message::WriterTo(_) => f.write_str("WriterTo(..)"),
            Message::Reader(_) => f.write_str("Reader(..)"),
            Message::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
        }
    }
}

impl From<Bytes> for Message {
    fn from(b: Bytes) -> Self {
        Message::Bytes(b)
    }
}

impl From<Vec<u8>> for Message {
    fn from(v: Vec<u8>) -> Self {
        Message::Bytes(Bytes::from(v))
    }
}

impl From<&'static [u8]> for Message {
    fn from(s: &'static [u8]) -> Self {
        Message::Bytes(Bytes::from_static(s))
    }
}

impl From<Vec<Bytes>> for Message {
    fn from(v: Vec<Bytes>) -> Self {
        Message::Fragments(v)
    }
}

impl From<Vec<Vec<u8>>> for Message {
    fn from(v: Vec<Vec<u8>>) -> Self {
        Message::Fragments(v.into_iter().map(Bytes::from).collect())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_owned())
    }
}

impl From<BytesMut> for Message {
    fn from(b: BytesMut) -> Self {
        Message::Buffer(b)
    }
}

/// Extracts the bytes of `message`.
///
/// # Errors
///
/// - [`Error::UnrecognizedType`] for [`Message::Unsupported`]
/// - [`Error::ShortWrite`] if a write-to source misreports its length
/// - [`Error::Io`] if a reader or write-to source fails
pub fn to_bytes(message: impl Into<Message>) -> Result<Bytes> {
    match message.into() {
        Message::Bytes(b) => Ok(b),
        Message::Fragments(fragments) => Ok(concat(&fragments)),
        Message::Text(s) => Ok(Bytes::from(s)),
        Message::Buffer(buf) => Ok(buf.freeze()),
        Message::WriterTo(mut source) => steal_bytes(&mut *source),
        Message::Reader(mut reader) => {
            let mut out = Vec::new();
            reader.read_to_end(&mut out)?;
            Ok(Bytes::from(out))
        }
        Message::Unsupported(type_name) => Err(unrecognized(type_name)),
    }
}

/// Like [`to_bytes`], for call sites that have already validated `message`.
///
/// # Panics
///
/// Panics if extraction fails.
#[track_caller]
pub fn must_to_bytes(message: impl Into<Message>) -> Bytes {
    match to_bytes(message) {
        Ok(b) => b,
        Err(e) => panic!("{e}"),
    }
}

/// Total length of `fragments`.
pub fn count_of<B: AsRef<[u8]>>(fragments: &[B]) -> usize {
    fragments.iter().map(|f| f.as_ref().len()).sum()
}

fn concat(fragments: &[Bytes]) -> Bytes {
    let mut buf = BytesMut::with_capacity(count_of(fragments));
    for fragment in fragments {
        buf.extend_from_slice(fragment);
    }
    buf.freeze()
}

pub(crate) fn unrecognized(type_name: &'static str) -> Error {
    debug!(type_name, "unrecognized message type");
    Error::UnrecognizedType { type_name }
}
