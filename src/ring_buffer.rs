use std::cmp;
use std::fmt;
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::cfg::{OverflowPolicy, RingBufferCfg};
use crate::error::{Error, Result};
use crate::split::{Reader, Writer};
use crate::storage::{BorrowedBlock, Heap, OwnedBlock, Storage, StorageAllocator};

/// Copy `dst.len()` bytes out of the ring, starting at logical position `cursor`.
///
/// The source range may straddle the physical end of storage, in which case it
/// is copied as two contiguous segments.
///
/// # Safety
/// `base` must be valid for reads of `capacity` bytes, `dst.len() <= capacity`,
/// and nobody may write the source range during the call.
unsafe fn copy_out(base: *const u8, capacity: usize, cursor: usize, dst: &mut [u8]) {
    if dst.is_empty() {
        return;
    }

    let offset = cursor % capacity;
    let head = cmp::min(dst.len(), capacity - offset);

    unsafe {
        ptr::copy_nonoverlapping(base.add(offset), dst.as_mut_ptr(), head);
        ptr::copy_nonoverlapping(base, dst.as_mut_ptr().add(head), dst.len() - head);
    }
}

/// Copy `src` into the ring, starting at logical position `cursor`.
///
/// # Safety
/// `base` must be valid for writes of `capacity` bytes, `src.len() <= capacity`,
/// and nobody may read or write the destination range during the call.
unsafe fn copy_in(base: *mut u8, capacity: usize, cursor: usize, src: &[u8]) {
    if src.is_empty() {
        return;
    }

    let offset = cursor % capacity;
    let head = cmp::min(src.len(), capacity - offset);

    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), base.add(offset), head);
        ptr::copy_nonoverlapping(src.as_ptr().add(head), base, src.len() - head);
    }
}

/// Result of [`RingBuffer::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PushOutcome {
    /// Bytes of the source now resident in the buffer
    pub written: usize,
    /// Previously resident bytes discarded to make room
    pub evicted: usize,
}

/// Fixed-capacity circular byte buffer
///
/// - Storage is either owned (allocated through a [`StorageAllocator`]) or
///   borrowed from the caller
/// - Write and read cursors only ever increase; the physical offset is the
///   cursor modulo capacity
/// - No internal locking; see [`RingBuffer::split`] for concurrent use
///
/// The cursors are `usize` and wrap on overflow. When the capacity is not a
/// power of two the physical offset jumps at that point; after 2^64 bytes on
/// 64-bit targets this is accepted as a limitation.
pub struct RingBuffer<'a, A: StorageAllocator = Heap> {
    storage: Storage<'a, A>,
    /// Next logical position to write; only the writer advances it
    write_cursor: AtomicUsize,
    /// Next logical position to read; only the reader advances it
    read_cursor: AtomicUsize,
}

impl<'a> RingBuffer<'a, Heap> {
    /// Initialize a ring buffer
    ///
    /// # Arguments
    /// * `storage` - Caller-owned block to use as-is (e.g. a DMA region), or
    ///   `None` to allocate `capacity` bytes from the heap
    /// * `capacity` - Size of the ring in bytes
    ///
    /// # Returns
    /// * `Ok(RingBuffer)` on success
    /// * `Err(Error::InvalidArgument)` if a block is given with zero capacity,
    ///   or the block is shorter than `capacity`
    /// * `Err(Error::OutOfMemory)` if allocation fails
    pub fn init(storage: Option<&'a mut [u8]>, capacity: usize) -> Result<Self> {
        Self::init_in(storage, capacity, Heap)
    }

    /// Create a ring buffer owning `capacity` heap bytes
    pub fn new(capacity: usize) -> Result<Self> {
        Self::new_in(capacity, Heap)
    }

    /// Create a ring buffer over the whole of a caller-owned block
    ///
    /// The block is never freed by the ring buffer and cannot be resized.
    pub fn from_borrowed(storage: &'a mut [u8]) -> Result<Self> {
        let capacity = storage.len();
        Self::init(Some(storage), capacity)
    }

    /// Create an owned ring buffer from a validated configuration
    pub fn from_cfg(cfg: &RingBufferCfg) -> Result<Self> {
        cfg.validate()?;
        Self::new(cfg.capacity)
    }
}

impl<'a, A: StorageAllocator> RingBuffer<'a, A> {
    /// Same as [`RingBuffer::init`], allocating owned storage from `alloc`
    pub fn init_in(storage: Option<&'a mut [u8]>, capacity: usize, alloc: A) -> Result<Self> {
        let storage = match storage {
            Some(_) if capacity == 0 => {
                return Err(reject("borrowed storage with zero capacity"));
            }
            Some(block) if block.len() < capacity => {
                return Err(reject("borrowed storage shorter than capacity"));
            }
            Some(block) => Storage::Borrowed(BorrowedBlock::new(&mut block[..capacity])),
            None => Storage::Owned(OwnedBlock::allocate(capacity, alloc)?),
        };

        Ok(RingBuffer {
            storage,
            write_cursor: AtomicUsize::new(0),
            read_cursor: AtomicUsize::new(0),
        })
    }

    /// Create a ring buffer owning `capacity` bytes from `alloc`
    pub fn new_in(capacity: usize, alloc: A) -> Result<Self> {
        Self::init_in(None, capacity, alloc)
    }

    /// Tear the buffer down, freeing the storage if it is owned
    ///
    /// Equivalent to dropping the buffer. Borrowed storage is handed back to
    /// its owner untouched.
    pub fn teardown(self) {
        drop(self);
    }

    /// Discard all resident bytes
    ///
    /// Only the cursors move; storage content is left as is.
    pub fn reset(&mut self) {
        *self.write_cursor.get_mut() = 0;
        *self.read_cursor.get_mut() = 0;
    }

    /// Get the capacity in bytes
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Get the number of resident bytes
    pub fn occupancy(&self) -> usize {
        let read = self.read_cursor.load(Ordering::Acquire);
        let write = self.write_cursor.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// Alias for [`occupancy`](Self::occupancy)
    pub fn len(&self) -> usize {
        self.occupancy()
    }

    /// Get the number of bytes that can be written without eviction
    pub fn free_space(&self) -> usize {
        self.capacity() - self.occupancy()
    }

    /// Check if no bytes are resident
    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    /// Check if there is no free space
    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }

    /// Check if the storage was allocated by this buffer
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    /// Check if the storage was supplied by the caller
    pub fn is_borrowed(&self) -> bool {
        !self.storage.is_owned()
    }

    /// Copy the oldest resident bytes into `destination` without consuming them
    ///
    /// # Returns
    /// Number of bytes copied: `min(destination.len(), occupancy())`
    pub fn peek(&self, destination: &mut [u8]) -> usize {
        let read = self.read_cursor.load(Ordering::Acquire);
        let write = self.write_cursor.load(Ordering::Acquire);
        let len = cmp::min(destination.len(), write.wrapping_sub(read));

        // Safety: [read, read + len) is resident, and the writer never touches
        // resident bytes.
        unsafe {
            copy_out(
                self.storage.as_mut_ptr(),
                self.capacity(),
                read,
                &mut destination[..len],
            )
        };
        len
    }

    /// Copy the oldest resident bytes into `destination` and consume them
    ///
    /// # Returns
    /// Number of bytes read. Less than `destination.len()` means the buffer
    /// ran empty.
    pub fn read(&mut self, destination: &mut [u8]) -> usize {
        // Safety: `&mut self` makes us the only reader.
        unsafe { self.consume(destination) }
    }

    /// Discard up to `max_bytes` of the oldest resident bytes
    ///
    /// # Returns
    /// Number of bytes discarded
    pub fn skip(&mut self, max_bytes: usize) -> usize {
        // Safety: `&mut self` makes us the only reader.
        unsafe { self.discard(max_bytes) }
    }

    /// Append as much of `source` as fits
    ///
    /// Bytes beyond the free space are dropped. This is backpressure, not an
    /// error: compare the returned count with `source.len()`.
    ///
    /// # Returns
    /// Number of leading bytes of `source` written
    pub fn write(&mut self, source: &[u8]) -> usize {
        // Safety: `&mut self` makes us the only writer.
        unsafe { self.produce(source) }
    }

    /// Append `source`, evicting the oldest resident bytes if needed
    ///
    /// If `source` is longer than the capacity only its last `capacity()`
    /// bytes are kept. Eviction happens before the copy, so afterwards the
    /// buffer always ends with the (possibly truncated) source.
    ///
    /// Both cursors move, so this needs exclusive access: it is not
    /// available on the halves returned by [`split`](Self::split).
    ///
    /// # Returns
    /// Number of previously resident bytes evicted
    pub fn overwrite(&mut self, source: &[u8]) -> usize {
        let capacity = self.capacity();

        let source = match source.len().checked_sub(capacity) {
            Some(excess) => &source[excess..],
            None => source,
        };

        let evicted = source.len().saturating_sub(self.free_space());
        if evicted > 0 {
            let read = self.read_cursor.get_mut();
            *read = read.wrapping_add(evicted);

            #[cfg(feature = "tracing")]
            tracing::trace!(evicted, capacity, "overwrite evicted resident bytes");
        }

        let write = *self.write_cursor.get_mut();
        // Safety: after eviction [write, write + len) is free space, and `&mut
        // self` excludes every other reader and writer.
        unsafe { copy_in(self.storage.as_mut_ptr(), capacity, write, source) };
        *self.write_cursor.get_mut() = write.wrapping_add(source.len());

        evicted
    }

    /// Append `source` according to an [`OverflowPolicy`]
    pub fn push(&mut self, source: &[u8], policy: OverflowPolicy) -> PushOutcome {
        match policy {
            OverflowPolicy::Reject => PushOutcome {
                written: self.write(source),
                evicted: 0,
            },
            OverflowPolicy::Overwrite => {
                let written = cmp::min(source.len(), self.capacity());
                let evicted = self.overwrite(source);
                PushOutcome { written, evicted }
            }
        }
    }

    /// Change the capacity of an owned buffer
    ///
    /// Resident bytes keep their order and move to the start of the new block.
    /// When shrinking below the current occupancy the oldest bytes are dropped.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(Error::InvalidArgument)` if the storage is borrowed
    /// * `Err(Error::OutOfMemory)` if allocation fails; the buffer is unchanged
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        let Storage::Owned(block) = &mut self.storage else {
            return Err(reject("cannot resize borrowed storage"));
        };

        let fresh = block.allocate_sibling(new_capacity)?;

        let read = *self.read_cursor.get_mut();
        let write = *self.write_cursor.get_mut();
        let resident = write.wrapping_sub(read);
        let len = cmp::min(resident, new_capacity);
        let dropped = resident - len;

        // Safety: `fresh` is a separate block of `new_capacity >= len` bytes, and
        // [read + dropped, write) is resident in the old block.
        unsafe {
            let dst = slice::from_raw_parts_mut(fresh.as_mut_ptr(), len);
            copy_out(block.as_mut_ptr(), block.len(), read.wrapping_add(dropped), dst);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            old_capacity = block.len(),
            new_capacity,
            dropped,
            "resized ring buffer"
        );

        block.replace(fresh);
        *self.read_cursor.get_mut() = 0;
        *self.write_cursor.get_mut() = len;

        Ok(())
    }

    /// Get the resident bytes as two contiguous slices, oldest first
    ///
    /// The second slice is empty unless the data wraps around the physical end
    /// of storage.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        let read = self.read_cursor.load(Ordering::Acquire);
        let write = self.write_cursor.load(Ordering::Acquire);
        let len = write.wrapping_sub(read);
        if len == 0 {
            return (&[], &[]);
        }

        let capacity = self.capacity();
        let offset = read % capacity;
        let head = cmp::min(len, capacity - offset);
        let base = self.storage.as_mut_ptr().cast_const();

        // Safety: both ranges are resident, and nothing writes resident bytes
        // while a shared borrow of the buffer is alive.
        unsafe {
            (
                slice::from_raw_parts(base.add(offset), head),
                slice::from_raw_parts(base, len - head),
            )
        }
    }

    /// Split into a writer half and a reader half
    ///
    /// With exactly one writer and one reader no locking is needed: each half
    /// only advances its own cursor, and a stale view of the other cursor only
    /// ever under-reports free space or resident data. To share a half between
    /// several threads, put it behind a lock.
    ///
    /// While the halves are alive the buffer is mutably borrowed, which rules
    /// out [`overwrite`](Self::overwrite), [`resize`](Self::resize) and
    /// [`reset`](Self::reset).
    pub fn split(&mut self) -> (Writer<'_, 'a, A>, Reader<'_, 'a, A>) {
        let ring: &Self = self;
        (Writer::new(ring), Reader::new(ring))
    }

    /// Write path shared by [`RingBuffer::write`] and [`Writer`].
    ///
    /// # Safety
    /// The caller must be the only writer for the duration of the call.
    pub(crate) unsafe fn produce(&self, source: &[u8]) -> usize {
        let capacity = self.capacity();
        let write = self.write_cursor.load(Ordering::Relaxed);
        let read = self.read_cursor.load(Ordering::Acquire);
        let len = cmp::min(source.len(), capacity - write.wrapping_sub(read));

        // Safety: [write, write + len) is free space; the reader never touches it.
        unsafe { copy_in(self.storage.as_mut_ptr(), capacity, write, &source[..len]) };
        self.write_cursor
            .store(write.wrapping_add(len), Ordering::Release);

        len
    }

    /// Read path shared by [`RingBuffer::read`] and [`Reader`].
    ///
    /// # Safety
    /// The caller must be the only reader for the duration of the call.
    pub(crate) unsafe fn consume(&self, destination: &mut [u8]) -> usize {
        let len = self.peek(destination);
        let read = self.read_cursor.load(Ordering::Relaxed);
        self.read_cursor
            .store(read.wrapping_add(len), Ordering::Release);
        len
    }

    /// Skip path shared by [`RingBuffer::skip`] and [`Reader`].
    ///
    /// # Safety
    /// The caller must be the only reader for the duration of the call.
    pub(crate) unsafe fn discard(&self, max_bytes: usize) -> usize {
        let len = cmp::min(max_bytes, self.occupancy());
        let read = self.read_cursor.load(Ordering::Relaxed);
        self.read_cursor
            .store(read.wrapping_add(len), Ordering::Release);
        len
    }
}

fn reject(reason: &'static str) -> Error {
    #[cfg(feature = "tracing")]
    tracing::debug!(reason, "rejected ring buffer argument");
    Error::invalid(reason)
}

impl<A: StorageAllocator> fmt::Debug for RingBuffer<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("storage", &self.storage)
            .field("write_cursor", &self.write_cursor)
            .field("read_cursor", &self.read_cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::CountingAlloc;

    fn drain<A: StorageAllocator>(rb: &mut RingBuffer<'_, A>) -> Vec<u8> {
        let mut out = vec![0u8; rb.occupancy()];
        let n = rb.read(&mut out);
        out.truncate(n);
        out
    }

    #[test]
    fn test_create_ring_buffer() {
        let rb = RingBuffer::new(16).unwrap();
        assert_eq!(rb.capacity(), 16);
        assert_eq!(rb.occupancy(), 0);
        assert_eq!(rb.free_space(), 16);
        assert!(rb.is_empty());
        assert!(!rb.is_full());
        assert!(rb.is_owned());
    }

    #[test]
    fn test_init_rejects_borrowed_zero_capacity() {
        let mut backing = [0u8; 8];
        let err = RingBuffer::init(Some(&mut backing[..]), 0).unwrap_err();
        assert_eq!(err.code(), -22);

        let mut empty: [u8; 0] = [];
        assert!(RingBuffer::from_borrowed(&mut empty)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_init_rejects_short_borrowed_block() {
        let mut backing = [0u8; 4];
        let err = RingBuffer::init(Some(&mut backing[..]), 5).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_init_borrowed_uses_prefix() {
        let mut backing = [0u8; 8];
        {
            let mut rb = RingBuffer::init(Some(&mut backing[..]), 4).unwrap();
            assert!(rb.is_borrowed());
            assert_eq!(rb.capacity(), 4);
            assert_eq!(rb.write(b"WXYZ!"), 4);
        }
        assert_eq!(&backing, b"WXYZ\0\0\0\0");
    }

    #[test]
    fn test_init_out_of_memory() {
        let alloc = CountingAlloc {
            limit: Some(16),
            ..Default::default()
        };
        let err = RingBuffer::new_in(17, alloc).unwrap_err();
        assert_eq!(err, Error::OutOfMemory { requested: 17 });
        assert_eq!(err.code(), -12);
    }

    #[test]
    fn test_zero_capacity_owned_buffer() {
        let mut rb = RingBuffer::new(0).unwrap();
        assert_eq!(rb.capacity(), 0);
        assert!(rb.is_empty());
        assert!(rb.is_full());
        assert_eq!(rb.write(b"abc"), 0);
        assert_eq!(rb.overwrite(b"abc"), 0);
        assert_eq!(rb.read(&mut [0u8; 3]), 0);
        assert_eq!(rb.as_slices(), (&[][..], &[][..]));
    }

    #[test]
    fn test_teardown_frees_owned_only() {
        let alloc = CountingAlloc::default();
        let rb = RingBuffer::new_in(32, alloc.clone()).unwrap();
        assert_eq!(alloc.live(), 1);
        rb.teardown();
        assert_eq!(alloc.live(), 0);

        let mut backing = [7u8; 4];
        let rb = RingBuffer::init_in(Some(&mut backing[..]), 4, alloc.clone()).unwrap();
        assert_eq!(alloc.live(), 0);
        rb.teardown();
        assert_eq!(alloc.live(), 0);
        assert_eq!(backing, [7u8; 4]);
    }

    #[test]
    fn test_single_threaded_roundtrip() {
        let mut rb = RingBuffer::new(8).unwrap();
        assert_eq!(rb.write(b"ABCDE"), 5);
        assert_eq!(rb.occupancy(), 5);
        assert_eq!(rb.free_space(), 3);

        let mut out = [0u8; 3];
        assert_eq!(rb.read(&mut out), 3);
        assert_eq!(&out, b"ABC");
        assert_eq!(rb.occupancy(), 2);
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.write(b"hello");

        let mut out = [0u8; 8];
        for _ in 0..3 {
            assert_eq!(rb.peek(&mut out), 5);
            assert_eq!(&out[..5], b"hello");
            assert_eq!(rb.occupancy(), 5);
            assert_eq!(rb.free_space(), 3);
        }
    }

    #[test]
    fn test_write_backpressure() {
        let mut rb = RingBuffer::new(4).unwrap();
        assert_eq!(rb.write(b"ABCD"), 4);
        assert!(rb.is_full());
        assert_eq!(rb.write(b"EF"), 0);
        assert_eq!(drain(&mut rb), b"ABCD");

        rb.write(b"XY");
        assert_eq!(rb.write(b"1234"), 2);
        assert_eq!(drain(&mut rb), b"XY12");
    }

    #[test]
    fn test_wraparound_read_write() {
        let mut rb = RingBuffer::new(5).unwrap();
        rb.write(b"abc");
        assert_eq!(rb.skip(2), 2);
        assert_eq!(rb.write(b"defg"), 4);

        let (head, tail) = rb.as_slices();
        assert_eq!(head, b"cde");
        assert_eq!(tail, b"fg");
        assert_eq!(drain(&mut rb), b"cdefg");
    }

    #[test]
    fn test_skip_clamps_to_occupancy() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.write(b"abc");
        assert_eq!(rb.skip(10), 3);
        assert!(rb.is_empty());
        assert_eq!(rb.skip(1), 0);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.write(b"abcd");
        rb.reset();
        assert!(rb.is_empty());
        assert_eq!(rb.free_space(), 4);
        assert_eq!(rb.write(b"zz"), 2);
        assert_eq!(drain(&mut rb), b"zz");
    }

    #[test]
    fn test_overwrite_evicts_oldest() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.write(b"ABCD");
        assert_eq!(rb.overwrite(b"EF"), 2);
        assert_eq!(drain(&mut rb), b"CDEF");
    }

    #[test]
    fn test_overwrite_full_replacement() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.write(b"ABCD");
        assert_eq!(rb.overwrite(b"WXYZ"), 4);
        assert_eq!(drain(&mut rb), b"WXYZ");
    }

    #[test]
    fn test_overwrite_truncates_long_source() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.write(b"ab");
        assert_eq!(rb.overwrite(b"0123456"), 2);
        assert_eq!(drain(&mut rb), b"3456");
    }

    #[test]
    fn test_overwrite_without_eviction() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.write(b"ab");
        assert_eq!(rb.overwrite(b"cd"), 0);
        assert_eq!(drain(&mut rb), b"abcd");
    }

    #[test]
    fn test_overwrite_across_wraparound() {
        let mut rb = RingBuffer::new(5).unwrap();
        rb.write(b"abcd");
        rb.skip(3);
        // resident: "d" at offset 3, write offset 4
        assert_eq!(rb.overwrite(b"EFGHI"), 1);
        assert_eq!(rb.as_slices(), (&b"E"[..], &b"FGHI"[..]));
    }

    #[test]
    fn test_push_policies() {
        let mut rb = RingBuffer::new(4).unwrap();
        assert_eq!(
            rb.push(b"abcdef", OverflowPolicy::Reject),
            PushOutcome { written: 4, evicted: 0 }
        );
        assert_eq!(
            rb.push(b"xy", OverflowPolicy::Overwrite),
            PushOutcome { written: 2, evicted: 2 }
        );
        assert_eq!(drain(&mut rb), b"cdxy");
    }

    #[test]
    fn test_resize_shrink_drops_oldest() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.write(b"ABCDEF");
        rb.resize(4).unwrap();
        assert_eq!(rb.capacity(), 4);
        assert_eq!(rb.occupancy(), 4);
        assert_eq!(drain(&mut rb), b"CDEF");
    }

    #[test]
    fn test_resize_grow_preserves_wrapped_data() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.write(b"abcd");
        rb.skip(2);
        rb.write(b"ef");
        rb.resize(10).unwrap();

        assert_eq!(rb.as_slices(), (&b"cdef"[..], &b""[..]));
        assert_eq!(rb.write(b"123456"), 6);
        assert!(rb.is_full());
        assert_eq!(drain(&mut rb), b"cdef123456");
    }

    #[test]
    fn test_resize_borrowed_rejected() {
        let mut backing = [0u8; 8];
        let mut rb = RingBuffer::from_borrowed(&mut backing).unwrap();
        rb.write(b"abc");
        let err = rb.resize(16).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(rb.capacity(), 8);
        assert_eq!(drain(&mut rb), b"abc");
    }

    #[test]
    fn test_resize_failure_leaves_buffer_usable() {
        let alloc = CountingAlloc {
            limit: Some(8),
            ..Default::default()
        };
        let mut rb = RingBuffer::new_in(8, alloc.clone()).unwrap();
        rb.write(b"abcdef");
        rb.skip(4);
        rb.write(b"ghij");

        let err = rb.resize(64).unwrap_err();
        assert_eq!(err, Error::OutOfMemory { requested: 64 });
        assert_eq!(rb.capacity(), 8);
        assert_eq!(alloc.live(), 1);
        assert_eq!(drain(&mut rb), b"efghij");
    }

    #[test]
    fn test_resize_frees_old_block() {
        let alloc = CountingAlloc::default();
        let mut rb = RingBuffer::new_in(8, alloc.clone()).unwrap();
        rb.resize(16).unwrap();
        rb.resize(2).unwrap();
        assert_eq!(alloc.live(), 1);
        rb.resize(0).unwrap();
        assert_eq!(alloc.live(), 0);
        rb.resize(3).unwrap();
        assert_eq!(alloc.live(), 1);
    }

    #[test]
    fn test_cursor_counter_wraparound() {
        let mut rb = RingBuffer::new(8).unwrap();
        *rb.write_cursor.get_mut() = usize::MAX - 2;
        *rb.read_cursor.get_mut() = usize::MAX - 2;
        assert_eq!(rb.write(b"abcdef"), 6);
        assert_eq!(rb.occupancy(), 6);
        assert_eq!(rb.free_space(), 2);
        assert_eq!(drain(&mut rb), b"abcdef");
    }

    #[test]
    fn test_from_cfg() {
        let rb = RingBuffer::from_cfg(&RingBufferCfg::default()).unwrap();
        assert_eq!(rb.capacity(), 1024);

        let cfg = RingBufferCfg {
            capacity: 0,
            ..Default::default()
        };
        assert!(RingBuffer::from_cfg(&cfg).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_debug_hides_contents() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.write(b"zz");
        let text = format!("{rb:?}");
        assert!(text.contains("Owned"));
        assert!(text.contains("write_cursor: 2"));
    }
}
