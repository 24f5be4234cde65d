//! Scoped buffer that returns itself to its pool.

use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};

use bytes::BytesMut;

use super::Pool;

/// A pooled buffer that is handed back to its [`Pool`] on drop.
///
/// Obtained from [`Pool::take`]. Derefs to [`BytesMut`].
///
/// ```
/// use netbuf::Pool;
///
/// let pool = Pool::new(1024);
/// {
///     let mut buf = pool.take(100);
///     buf.extend_from_slice(b"hello");
///     assert_eq!(buf.class(), 128);
/// }
/// assert_eq!(pool.retained(128), 1);
/// ```
pub struct Pooled<'a> {
    pool: &'a Pool,
    buf: BytesMut,
    class: usize,
}

impl<'a> Pooled<'a> {
    pub(super) fn new(pool: &'a Pool, buf: BytesMut, class: usize) -> Self {
        Self { pool, buf, class }
    }

    /// Size class the buffer was taken from.
    pub fn class(&self) -> usize {
        self.class
    }

    /// Takes the buffer out of the guard; it will not be returned to the pool.
    pub fn detach(self) -> BytesMut {
        let mut this = ManuallyDrop::new(self);
        std::mem::take(&mut this.buf)
    }
}

impl Deref for Pooled<'_> {
    type Target = BytesMut;

    fn deref(&self) -> &BytesMut {
        &self.buf
    }
}

impl DerefMut for Pooled<'_> {
    fn deref_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }
}

impl fmt::Debug for Pooled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("class", &self.class)
            .field("len", &self.buf.len())
            .finish()
    }
}

impl Drop for Pooled<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_returns_buffer() {
        let pool = Pool::new(64);
        {
            let mut buf = pool.take(10);
            buf.extend_from_slice(b"test data");
            assert_eq!(&buf[..], b"test data");
        }
        assert_eq!(pool.retained(16), 1);

        let buf = pool.take(16);
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn test_detach_keeps_buffer_out() {
        let pool = Pool::new(64);
        let buf = pool.take(64).detach();
        assert_eq!(buf.capacity(), 64);
        assert_eq!(pool.retained(64), 0);
        assert_eq!(pool.stats().drops, 0);
    }

    #[test]
    fn test_grown_buffer_is_not_reused() {
        let pool = Pool::new(8);
        {
            let mut buf = pool.take(8);
            buf.extend_from_slice(&[0u8; 20]);
        }
        assert_eq!(pool.retained(8), 0);
        assert_eq!(pool.stats().drops, 1);
    }
}
