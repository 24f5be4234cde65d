//! Configuration for buffer pooling and the transport that consumes it.
//!
//! - [`PoolConfig`] - Size-class bounds and retention for a [`Pool`](crate::Pool)
//! - [`TcpOptions`] - Socket tuning knobs handed to the surrounding transport
//!
//! # Example
//!
//! ```
//! use netbuf::{Pool, PoolConfig};
//!
//! let config = PoolConfig::new(64, 64 * 1024)?.with_max_retained(32);
//! let pool = Pool::with_config(config)?;
//! assert_eq!(pool.max(), 64 * 1024);
//! # Ok::<(), netbuf::Error>(())
//! ```

use std::time::Duration;

use crate::error::Error;

/// Default smallest size class (1 byte).
pub const DEFAULT_MIN_CLASS_SIZE: usize = 1;

/// Default largest size class (64 KiB).
pub const DEFAULT_MAX_CLASS_SIZE: usize = 64 * 1024;

/// Configuration for a size-classed pool.
///
/// Both bounds are rounded to powers of two when the pool is built: the
/// floor is rounded up, the ceiling is rounded down. The floor must not
/// exceed the ceiling after rounding.
///
/// # Example
///
/// ```
/// use netbuf::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_min_size(256)
///     .with_max_size(1 << 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Requested smallest class in bytes.
    min_size: usize,

    /// Requested ceiling in bytes.
    max_size: usize,

    /// Buffers kept per class before `put` starts dropping them.
    max_retained: Option<usize>,
}

impl PoolConfig {
    /// Creates a configuration with the given floor and ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if:
    /// - `max_size` is zero
    /// - the floor rounded up to a power of two exceeds the ceiling rounded
    ///   down to a power of two
    pub fn new(min_size: usize, max_size: usize) -> Result<Self, Error> {
        let config = Self {
            min_size,
            max_size,
            max_retained: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration with the default floor and the given ceiling.
    pub fn with_ceiling(max_size: usize) -> Result<Self, Error> {
        Self::new(DEFAULT_MIN_CLASS_SIZE, max_size)
    }

    /// Sets the smallest class.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the ceiling.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Caps the number of idle buffers kept per class.
    pub fn with_max_retained(mut self, count: usize) -> Self {
        self.max_retained = Some(count);
        self
    }

    /// Returns the requested smallest class.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the requested ceiling.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the per-class retention cap, if any.
    pub fn max_retained(&self) -> Option<usize> {
        self.max_retained
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use netbuf::PoolConfig;
    ///
    /// assert!(PoolConfig::default().with_max_size(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_size == 0 {
            return Err(Error::InvalidConfig {
                message: "pool ceiling must be non-zero",
            });
        }

        let floor = self.min_size.max(1).checked_next_power_of_two();
        let ceiling = crate::pool::class::floor_power_of_two(self.max_size);
        match floor {
            Some(floor) if floor <= ceiling => Ok(()),
            _ => Err(Error::InvalidConfig {
                message: "smallest class cannot exceed the pool ceiling",
            }),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_CLASS_SIZE,
            max_size: DEFAULT_MAX_CLASS_SIZE,
            max_retained: None,
        }
    }
}

/// Socket options for a TCP transport.
///
/// Buffer sizes of zero leave the operating system default in place; a
/// `linger` of `None` does the same for `SO_LINGER`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use netbuf::TcpOptions;
///
/// let opts = TcpOptions::default()
///     .with_timeout(Duration::from_secs(2))
///     .with_read_buffer_size(16 * 1024);
/// assert!(opts.no_delay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case", default))]
pub struct TcpOptions {
    /// Connect timeout.
    pub timeout: Duration,
    /// Enables TCP keep-alive probes.
    pub keep_alive: bool,
    /// Interval between keep-alive probes.
    pub keep_alive_period: Duration,
    /// `SO_LINGER`; `None` keeps the system default.
    pub linger: Option<Duration>,
    /// Disables Nagle's algorithm.
    #[cfg_attr(feature = "serde", serde(rename = "nodelay"))]
    pub no_delay: bool,
    /// Kernel socket buffer size for both directions.
    #[cfg_attr(feature = "serde", serde(rename = "sockbuf"))]
    pub sock_buf: usize,
    /// Size of the buffer used for each read.
    #[cfg_attr(feature = "serde", serde(rename = "readBufferSize"))]
    pub read_buffer_size: usize,
    /// Size of the buffer used for each write.
    #[cfg_attr(feature = "serde", serde(rename = "writeBufferSize"))]
    pub write_buffer_size: usize,
}

impl TcpOptions {
    /// Sets the connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables keep-alive with the given period.
    pub fn with_keep_alive(mut self, enabled: bool, period: Duration) -> Self {
        self.keep_alive = enabled;
        self.keep_alive_period = period;
        self
    }

    /// Sets `SO_LINGER`.
    pub fn with_linger(mut self, linger: Option<Duration>) -> Self {
        self.linger = linger;
        self
    }

    /// Sets `TCP_NODELAY`.
    pub fn with_no_delay(mut self, no_delay: bool) -> Self {
        self.no_delay = no_delay;
        self
    }

    /// Sets the kernel socket buffer size.
    pub fn with_sock_buf(mut self, size: usize) -> Self {
        self.sock_buf = size;
        self
    }

    /// Sets the per-read buffer size.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Sets the per-write buffer size.
    pub fn with_write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size;
        self
    }

    /// Validates the current options.
    pub fn validate(&self) -> Result<(), Error> {
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig {
                message: "timeout must be non-zero",
            });
        }
        if self.keep_alive && self.keep_alive_period.is_zero() {
            return Err(Error::InvalidConfig {
                message: "keep-alive period must be non-zero when keep-alive is enabled",
            });
        }
        Ok(())
    }
}

impl Default for TcpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            keep_alive: true,
            keep_alive_period: Duration::from_secs(60),
            linger: None,
            no_delay: true,
            sock_buf: 0,
            read_buffer_size: 0,
            write_buffer_size: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.min_size(), DEFAULT_MIN_CLASS_SIZE);
        assert_eq!(config.max_size(), DEFAULT_MAX_CLASS_SIZE);
        assert_eq!(config.max_retained(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = PoolConfig::default()
            .with_min_size(512)
            .with_max_size(8192)
            .with_max_retained(4);

        assert_eq!(config.min_size(), 512);
        assert_eq!(config.max_size(), 8192);
        assert_eq!(config.max_retained(), Some(4));
    }

    #[test]
    fn test_invalid_config_zero_ceiling() {
        assert!(PoolConfig::new(1, 0).is_err());
        assert!(PoolConfig::with_ceiling(0).is_err());
    }

    #[test]
    fn test_invalid_config_floor_above_ceiling() {
        // 100 rounds up to 128, 100 rounds down to 64
        assert!(PoolConfig::new(100, 100).is_err());
        assert!(PoolConfig::new(64, 100).is_ok());
    }

    #[test]
    fn test_zero_floor_is_treated_as_one() {
        assert!(PoolConfig::new(0, 1).is_ok());
    }

    #[test]
    fn test_tcp_defaults() {
        let opts = TcpOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert!(opts.keep_alive);
        assert_eq!(opts.keep_alive_period, Duration::from_secs(60));
        assert_eq!(opts.linger, None);
        assert!(opts.no_delay);
        assert_eq!(opts.read_buffer_size, 0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_tcp_builder_and_validate() {
        let opts = TcpOptions::default()
            .with_keep_alive(true, Duration::ZERO)
            .with_linger(Some(Duration::from_secs(1)));
        assert!(opts.validate().is_err());

        let opts = opts.with_keep_alive(false, Duration::ZERO);
        assert!(opts.validate().is_ok());
        assert_eq!(opts.linger, Some(Duration::from_secs(1)));

        let opts = TcpOptions::default().with_timeout(Duration::ZERO);
        assert!(opts.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_tcp_options_json_names() {
        let json = serde_json::to_value(TcpOptions::default()).unwrap();
        assert!(json.get("keep-alive").is_some());
        assert!(json.get("keep-alive-period").is_some());
        assert!(json.get("nodelay").is_some());
        assert!(json.get("sockbuf").is_some());
        assert!(json.get("readBufferSize").is_some());
        assert!(json.get("writeBufferSize").is_some());
        assert!(json.get("no-delay").is_none());

        let opts: TcpOptions =
            serde_json::from_str(r#"{"nodelay": false, "readBufferSize": 4096}"#).unwrap();
        assert!(!opts.no_delay);
        assert_eq!(opts.read_buffer_size, 4096);
        assert!(opts.keep_alive);
    }
}
