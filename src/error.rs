//! The crate's single error type.
//!
//! Ropes are immutable values, so almost every failure here is a programmer
//! error at a precondition boundary (a bad index, a negative repeat count)
//! rather than a recoverable runtime condition. The panicking primary API
//! (`Index`, `insert`, `delete`, ...) and the checked `try_`-prefixed API
//! both bottom out in the same [`RopeError`].

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Errors produced by fallible `Rope` operations.
#[derive(Debug)]
pub enum RopeError {
    /// An index or range fell outside `0..=len` (or `0..len` for element
    /// access).
    OutOfRange { index: usize, len: usize },
    /// An argument violated a documented precondition that isn't expressible
    /// purely as a range (e.g. a negative repeat count).
    InvalidArgument(String),
    /// Writing the rope's contents to a sink failed.
    Io(io::Error),
}

impl fmt::Display for RopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RopeError::OutOfRange { index, len } => {
                write!(f, "index {} out of range for rope of length {}", index, len)
            }
            RopeError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            RopeError::Io(e) => write!(f, "write failed: {}", e),
        }
    }
}

impl StdError for RopeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RopeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RopeError {
    fn from(e: io::Error) -> Self {
        RopeError::Io(e)
    }
}

/// Convenience alias for the crate's fallible operations.
pub type Result<T> = std::result::Result<T, RopeError>;

#[inline]
pub(crate) fn out_of_range(index: usize, len: usize) -> RopeError {
    RopeError::OutOfRange { index, len }
}
