//! Error types for netbuf.

use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a pool or extracting bytes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The message value is not one of the supported source kinds.
    #[error("unrecognized type: {type_name}")]
    UnrecognizedType {
        /// Rust type name of the rejected value.
        type_name: &'static str,
    },

    /// A write-to source reported a byte count that does not match what the
    /// stealer actually captured.
    #[error("short write: source reported {reported} bytes, captured {captured}")]
    ShortWrite {
        /// Count returned by the source.
        reported: u64,
        /// Bytes held by the stealer.
        captured: usize,
    },

    /// An I/O error raised by a reader or write-to source.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl Error {
    /// Builds an [`Error::UnrecognizedType`] naming the type of `value`.
    pub fn unrecognized<T: ?Sized>(value: &T) -> Self {
        Error::UnrecognizedType {
            type_name: std::any::type_name_of_val(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_unrecognized_names_type() {
        let err = Error::unrecognized(&42i32);
        assert_eq!(err.to_string(), "unrecognized type: i32");
    }

    #[test]
    fn test_display_short_write() {
        let err = Error::ShortWrite {
            reported: 4,
            captured: 3,
        };
        let s = err.to_string();
        assert!(s.contains("short write"));
        assert!(s.contains("reported 4"));
        assert!(s.contains("captured 3"));
    }

    #[test]
    fn test_io_source_is_kept() {
        use std::error::Error as _;

        let err = Error::from(io::Error::other("boom"));
        assert!(err.source().is_some());
    }
}
