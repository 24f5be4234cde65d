//! netbuf
//!
//! Buffer reuse and zero-copy byte extraction for network transports.
//!
//! `netbuf` is a small support layer for I/O paths. It provides two pieces:
//!
//! - [`Pool`] - a thread-safe allocator that hands out [`BytesMut`](bytes::BytesMut)
//!   buffers rounded to power-of-two size classes and takes them back for reuse
//! - [`to_bytes`] / [`to_reader`] - turn a [`Message`] into contiguous bytes or
//!   a reader, copying only when the source does not already own its storage
//!
//! The crate intentionally:
//! - does NOT open connections
//! - does NOT frame or parse protocols
//! - does NOT keep a global pool (pass a [`Pool`] to whoever needs one)
//!
//! # Pool
//!
//! ```
//! use netbuf::Pool;
//!
//! let pool = Pool::new(32);
//! let (buf, cap) = pool.get(10);
//! assert_eq!(cap, 16);
//! pool.put(buf);
//!
//! // requests above the ceiling are clamped to it
//! assert_eq!(Pool::new(8).get(10).1, 8);
//! ```
//!
//! # Extraction
//!
//! ```
//! use std::io::Cursor;
//! use bytes::Bytes;
//! use netbuf::{Message, to_bytes};
//!
//! // owned storage is handed over, not copied
//! let source = Cursor::new(Bytes::from_static(b"payload"));
//! let bytes = to_bytes(Message::writer_to(source))?;
//! assert_eq!(&bytes[..], b"payload");
//! # Ok::<(), netbuf::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod extract;
mod pool;

//
// Public surface
//

pub use config::{DEFAULT_MAX_CLASS_SIZE, DEFAULT_MIN_CLASS_SIZE, PoolConfig, TcpOptions};
pub use error::{Error, Result};
pub use extract::{
    ByteReader, ByteStealer, FragmentReader, Message, WriteTo, count_of, must_to_bytes,
    must_to_reader, steal_bytes, to_bytes, to_reader,
};
pub use pool::{Pool, PoolStats, Pooled};
