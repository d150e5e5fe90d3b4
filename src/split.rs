//! Writer and reader halves of a split [`RingBuffer`]
//!
//! One writer and one reader can run on different threads without locking.
//! Each half owns one cursor; the other cursor is only observed, so a stale
//! value makes a half see less space or less data than there really is,
//! never more.

use std::fmt;

use crate::ring_buffer::RingBuffer;
use crate::storage::StorageAllocator;

/// Producer half of a split [`RingBuffer`]
///
/// Advances only the write cursor. Not `Clone`: to have several producers,
/// share it behind a lock.
pub struct Writer<'r, 'a, A: StorageAllocator> {
    ring: &'r RingBuffer<'a, A>,
}

impl<'r, 'a, A: StorageAllocator> Writer<'r, 'a, A> {
    pub(crate) fn new(ring: &'r RingBuffer<'a, A>) -> Self {
        Writer { ring }
    }

    /// Append as much of `source` as fits, see [`RingBuffer::write`]
    pub fn write(&mut self, source: &[u8]) -> usize {
        // Safety: a ring is split at most once at a time and the writer half is
        // not `Clone`, so this is the only writer.
        unsafe { self.ring.produce(source) }
    }

    /// Get the free space, possibly under-reported
    pub fn free_space(&self) -> usize {
        self.ring.free_space()
    }

    /// Check if there is no free space
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Get the capacity in bytes
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

/// Consumer half of a split [`RingBuffer`]
///
/// Advances only the read cursor. Not `Clone`: to have several consumers,
/// share it behind a lock.
pub struct Reader<'r, 'a, A: StorageAllocator> {
    ring: &'r RingBuffer<'a, A>,
}

impl<'r, 'a, A: StorageAllocator> Reader<'r, 'a, A> {
    pub(crate) fn new(ring: &'r RingBuffer<'a, A>) -> Self {
        Reader { ring }
    }

    /// See [`RingBuffer::peek`]
    pub fn peek(&self, destination: &mut [u8]) -> usize {
        self.ring.peek(destination)
    }

    /// See [`RingBuffer::read`]
    pub fn read(&mut self, destination: &mut [u8]) -> usize {
        // Safety: the reader half is unique, see `Writer::write`.
        unsafe { self.ring.consume(destination) }
    }

    /// See [`RingBuffer::skip`]
    pub fn skip(&mut self, max_bytes: usize) -> usize {
        // Safety: the reader half is unique.
        unsafe { self.ring.discard(max_bytes) }
    }

    /// See [`RingBuffer::as_slices`]
    ///
    /// The slices borrow the reader, so the bytes stay resident while they
    /// are alive.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        self.ring.as_slices()
    }

    /// Get the number of resident bytes, possibly under-reported
    pub fn occupancy(&self) -> usize {
        self.ring.occupancy()
    }

    /// Check if no bytes are resident
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Get the capacity in bytes
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

impl<A: StorageAllocator> fmt::Debug for Writer<'_, '_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer").field("ring", self.ring).finish()
    }
}

impl<A: StorageAllocator> fmt::Debug for Reader<'_, '_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader").field("ring", self.ring).finish()
    }
}
