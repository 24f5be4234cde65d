//! Size-classed buffer pool.
//!
//! A [`Pool`] hands out [`BytesMut`] buffers whose capacity is rounded up to
//! a power-of-two size class and never exceeds the pool's ceiling. Returned
//! buffers are kept per class and handed out again by later [`Pool::get`]
//! calls. Each class sits behind its own lock, so traffic on one class never
//! waits on another.
//!
//! Reuse is best-effort: a returned buffer may be dropped instead of stored,
//! and stored buffers live until the pool itself is dropped.
//!
//! # Example
//!
//! ```
//! use netbuf::Pool;
//!
//! let pool = Pool::new(32);
//! let (buf, cap) = pool.get(10);
//! assert_eq!(cap, 16);
//! assert_eq!(buf.capacity(), 16);
//! pool.put(buf);
//! ```

pub(crate) mod class;
mod pooled;

use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::BytesMut;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::{DEFAULT_MAX_CLASS_SIZE, PoolConfig};
use crate::error::{Error, Result};
use class::Classes;

pub use pooled::Pooled;

/// Concurrent pool of power-of-two sized byte buffers.
///
/// `Pool` is `Send + Sync`; share it by reference or behind an `Arc`.
#[derive(Debug)]
pub struct Pool {
    classes: Classes,
    /// One free list per class, indexed from the smallest class.
    slots: Box<[Mutex<Vec<BytesMut>>]>,
    max_retained: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    drops: AtomicUsize,
}

impl Pool {
    /// Creates a pool whose ceiling is the largest power of two `<= max`.
    ///
    /// The smallest class is 1 byte.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero. Use [`Pool::try_new`] to get an error instead.
    pub fn new(max: usize) -> Self {
        match Self::try_new(max) {
            Ok(pool) => pool,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates a pool like [`Pool::new`], rejecting a zero ceiling.
    pub fn try_new(max: usize) -> Result<Self> {
        Self::with_config(PoolConfig::with_ceiling(max)?)
    }

    /// Creates a pool from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        let classes =
            Classes::new(config.min_size(), config.max_size()).ok_or(Error::InvalidConfig {
                message: "smallest class cannot exceed the pool ceiling",
            })?;

        let slots = (0..classes.len())
            .map(|_| Mutex::new(Vec::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            min = classes.min(),
            max = classes.max(),
            classes = classes.len(),
            "created buffer pool"
        );

        Ok(Self {
            classes,
            slots,
            max_retained: config.max_retained().unwrap_or(usize::MAX),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
            drops: AtomicUsize::new(0),
        })
    }

    /// Returns an empty buffer and its capacity.
    ///
    /// The capacity is the smallest class `>= size`, or the ceiling when
    /// `size` is larger than the ceiling. Callers asking for more than
    /// [`Pool::max`] therefore receive a buffer smaller than requested.
    pub fn get(&self, size: usize) -> (BytesMut, usize) {
        let (index, class) = self.classes.for_size(size);

        if let Some(buf) = self.slots[index].lock().pop() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(size, class, "pool hit");
            return (buf, class);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(size, class, "pool miss");
        (BytesMut::with_capacity(class), class)
    }

    /// Like [`Pool::get`], but the buffer goes back to the pool when the
    /// returned guard is dropped.
    pub fn take(&self, size: usize) -> Pooled<'_> {
        let (buf, class) = self.get(size);
        Pooled::new(self, buf, class)
    }

    /// Returns a buffer for reuse.
    ///
    /// The buffer is cleared and stored under its class. Buffers whose
    /// capacity is not exactly one of this pool's classes are dropped, as are
    /// buffers arriving at a class that already holds its retention limit.
    pub fn put(&self, mut buf: BytesMut) {
        let capacity = buf.capacity();
        let Some(index) = self.classes.index_of(capacity) else {
            self.drops.fetch_add(1, Ordering::Relaxed);
            debug!(capacity, "dropping buffer of foreign size");
            return;
        };

        buf.clear();

        let mut slot = self.slots[index].lock();
        if slot.len() >= self.max_retained {
            drop(slot);
            self.drops.fetch_add(1, Ordering::Relaxed);
            trace!(capacity, "class full, dropping buffer");
            return;
        }
        slot.push(buf);
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    /// Smallest class.
    pub fn min(&self) -> usize {
        self.classes.min()
    }

    /// Largest class (the ceiling).
    pub fn max(&self) -> usize {
        self.classes.max()
    }

    /// Iterates the declared class sizes, smallest first.
    pub fn classes(&self) -> impl Iterator<Item = usize> {
        self.classes.iter()
    }

    /// Number of idle buffers stored for `class`; 0 for unknown classes.
    pub fn retained(&self, class: usize) -> usize {
        self.classes
            .index_of(class)
            .map_or(0, |index| self.slots[index].lock().len())
    }

    /// Snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            retained: self.slots.iter().map(|slot| slot.lock().len()).sum(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            drops: self.drops.load(Ordering::Relaxed),
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CLASS_SIZE)
    }
}

/// Pool statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Idle buffers currently stored across all classes.
    pub retained: usize,
    /// `get` calls served from a free list.
    pub hits: usize,
    /// `get` calls that allocated.
    pub misses: usize,
    /// Buffers accepted by `put`.
    pub returns: usize,
    /// Buffers `put` refused (foreign size or class full).
    pub drops: usize,
}

impl PoolStats {
    /// Fraction of `get` calls served without allocating (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
