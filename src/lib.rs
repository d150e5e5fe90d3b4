//! # circbuf - Circular Byte Buffer
//!
//! A fixed-capacity ring of bytes for moving data between a producer and a
//! consumer that run at different rates: serial drivers, sensor feeds,
//! protocol framing layers.
//!
//! ## Design
//!
//! - One contiguous block, either owned (allocated through a
//!   [`StorageAllocator`]) or borrowed from the caller (e.g. a DMA region)
//! - Monotonic write and read cursors; occupancy is their difference, the
//!   physical offset is the cursor modulo capacity
//! - Bounded writes drop what does not fit (backpressure); `overwrite`
//!   evicts the oldest bytes instead
//! - No allocation on the data path, no internal locking
//! - One writer and one reader can run concurrently through
//!   [`RingBuffer::split`]; operations that move both cursors take `&mut`
//!
//! ## Example
//!
//! ```
//! use circbuf::RingBuffer;
//!
//! let mut rb = RingBuffer::new(4).unwrap();
//! assert_eq!(rb.write(b"ABCD"), 4);
//! assert_eq!(rb.write(b"EF"), 0); // full, nothing copied
//!
//! assert_eq!(rb.overwrite(b"EF"), 2); // two oldest bytes evicted
//!
//! let mut out = [0u8; 4];
//! assert_eq!(rb.read(&mut out), 4);
//! assert_eq!(&out, b"CDEF");
//! ```
//!
//! Borrowed storage:
//!
//! ```
//! use circbuf::RingBuffer;
//!
//! let mut dma = [0u8; 64];
//! let mut rb = RingBuffer::from_borrowed(&mut dma).unwrap();
//! rb.write(b"frame");
//! assert!(rb.resize(128).is_err()); // borrowed blocks keep their size
//! ```

#![warn(missing_docs)]

mod cfg;
mod error;
mod io;
mod ring_buffer;
mod split;
mod storage;

pub use cfg::{OverflowPolicy, RingBufferCfg};
pub use error::{Error, Result, EINVAL, ENOMEM};
pub use ring_buffer::{PushOutcome, RingBuffer};
pub use split::{Reader, Writer};
pub use storage::{Heap, StorageAllocator};
