//! Error type for ring buffer lifecycle operations
//!
//! Only initialization and resize can fail. Data movement never returns an
//! error: a short count from `read`/`write` is flow control, not failure.
//!
//! Each variant maps to a negative errno-style code via [`Error::code`] so
//! callers bridging to C-style result codes can forward it unchanged.

use thiserror::Error;

/// `EINVAL`
pub const EINVAL: i32 = 22;

/// `ENOMEM`
pub const ENOMEM: i32 = 12;

/// Result alias used by fallible ring buffer operations
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by [`RingBuffer`](crate::RingBuffer) lifecycle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument was rejected before any state was touched
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the call
        reason: &'static str,
    },

    /// The storage allocator could not provide a block
    #[error("out of memory: failed to allocate {requested} bytes")]
    OutOfMemory {
        /// Size of the block that was requested
        requested: usize,
    },
}

impl Error {
    pub(crate) const fn invalid(reason: &'static str) -> Self {
        Error::InvalidArgument { reason }
    }

    /// Negative errno-style code for this error
    ///
    /// ```
    /// use circbuf::Error;
    ///
    /// assert_eq!(Error::OutOfMemory { requested: 64 }.code(), -12);
    /// ```
    pub const fn code(&self) -> i32 {
        match self {
            Error::InvalidArgument { .. } => -EINVAL,
            Error::OutOfMemory { .. } => -ENOMEM,
        }
    }

    /// Returns true for [`Error::InvalidArgument`]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Returns true for [`Error::OutOfMemory`]
    pub const fn is_out_of_memory(&self) -> bool {
        matches!(self, Error::OutOfMemory { .. })
    }
}
