//! Ring buffer configuration
//!
//! Selects capacity and what happens when a producer outruns the consumer.

use core::fmt;

use crate::error::{Error, Result};

/// What to do with incoming bytes that do not fit in the free space
///
/// # Quick Selection Guide
/// - **Lossless streams (protocol framing)**: `Reject`, and act on short writes
/// - **Telemetry / logs where the newest data matters**: `Overwrite`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverflowPolicy {
    /// Copy what fits and drop the excess (backpressure)
    #[default]
    Reject,

    /// Evict the oldest resident bytes to make room
    ///
    /// Needs exclusive access to the buffer.
    Overwrite,
}

impl OverflowPolicy {
    /// Returns a human-readable name for this policy
    pub fn name(&self) -> &'static str {
        match self {
            OverflowPolicy::Reject => "reject",
            OverflowPolicy::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for an owned ring buffer
///
/// # Examples
/// ```rust
/// use circbuf::{OverflowPolicy, RingBuffer, RingBufferCfg};
///
/// let cfg = RingBufferCfg {
///     capacity: 256,
///     overflow: OverflowPolicy::Overwrite,
/// };
/// let rb = RingBuffer::from_cfg(&cfg).unwrap();
/// assert_eq!(rb.capacity(), 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingBufferCfg {
    /// Size of the backing storage in bytes
    pub capacity: usize,

    /// Policy applied by [`RingBuffer::push`](crate::RingBuffer::push)
    #[cfg_attr(feature = "serde", serde(default))]
    pub overflow: OverflowPolicy,
}

impl RingBufferCfg {
    /// Validates the configuration
    ///
    /// Returns `Err` if capacity is 0.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::invalid("ring buffer capacity must be > 0"));
        }
        Ok(())
    }
}

impl Default for RingBufferCfg {
    /// Returns `capacity: 1024` with [`OverflowPolicy::Reject`]
    fn default() -> Self {
        RingBufferCfg {
            capacity: 1024,
            overflow: OverflowPolicy::Reject,
        }
    }
}

impl fmt::Display for RingBufferCfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RingBuffer(capacity={}, overflow={})",
            self.capacity, self.overflow
        )
    }
}
