use std::{alloc::Layout, fmt, marker::PhantomData, ptr::NonNull};

use crate::error::{Error, Result};

/// Capability used to obtain and release owned ring storage.
///
/// The ring buffer only cares whether an allocation succeeded; the strategy
/// behind it (global heap, a static pool, DMA-capable memory) is up to the
/// implementor.
///
/// # Safety
///
/// A pointer returned by [`allocate`](Self::allocate) must be valid for reads
/// and writes of `len` bytes and must stay valid until it is passed back to
/// [`deallocate`](Self::deallocate) with the same `len`. Blocks handed out by
/// separate calls must not overlap.
pub unsafe trait StorageAllocator {
    /// Allocate a block of `len` bytes, `None` on exhaustion.
    ///
    /// Never called with `len == 0`.
    fn allocate(&self, len: usize) -> Option<NonNull<u8>>;

    /// Release a block previously returned by [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `block` must come from this allocator with the same `len`, and must not
    /// be used afterwards.
    unsafe fn deallocate(&self, block: NonNull<u8>, len: usize);
}

/// The global heap, through [`std::alloc`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heap;

unsafe impl StorageAllocator for Heap {
    fn allocate(&self, len: usize) -> Option<NonNull<u8>> {
        let layout = Layout::array::<u8>(len).ok()?;
        // Safety: `len` is nonzero per the trait contract.
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    unsafe fn deallocate(&self, block: NonNull<u8>, len: usize) {
        // Safety: the same layout was accepted by `allocate`.
        unsafe {
            let layout = Layout::from_size_align_unchecked(len, 1);
            std::alloc::dealloc(block.as_ptr(), layout);
        }
    }
}

/// A block obtained from an allocator that has not been attached to a
/// [`Storage`] yet.
pub(crate) struct Allocation {
    ptr: NonNull<u8>,
    len: usize,
}

impl Allocation {
    pub(crate) fn as_mut_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

fn allocate_with<A: StorageAllocator>(alloc: &A, len: usize) -> Result<Allocation> {
    if len == 0 {
        return Ok(Allocation {
            ptr: NonNull::dangling(),
            len,
        });
    }

    match alloc.allocate(len) {
        Some(ptr) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(len, "allocated ring storage");
            Ok(Allocation { ptr, len })
        }
        None => {
            #[cfg(feature = "tracing")]
            tracing::warn!(len, "ring storage allocation failed");
            Err(Error::OutOfMemory { requested: len })
        }
    }
}

/// Storage allocated by, and freed through, an injected allocator.
pub(crate) struct OwnedBlock<A: StorageAllocator> {
    ptr: NonNull<u8>,
    len: usize,
    alloc: A,
}

impl<A: StorageAllocator> OwnedBlock<A> {
    pub(crate) fn allocate(len: usize, alloc: A) -> Result<Self> {
        let Allocation { ptr, len } = allocate_with(&alloc, len)?;
        Ok(Self { ptr, len, alloc })
    }

    pub(crate) fn as_mut_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Allocate a new block from the same allocator, leaving `self` alone.
    pub(crate) fn allocate_sibling(&self, len: usize) -> Result<Allocation> {
        allocate_with(&self.alloc, len)
    }

    /// Swap in `fresh` and free the block it replaces.
    pub(crate) fn replace(&mut self, fresh: Allocation) {
        self.release();
        self.ptr = fresh.ptr;
        self.len = fresh.len;
    }

    fn release(&mut self) {
        if self.len != 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(len = self.len, "freeing ring storage");
            // Safety: ptr/len came from `self.alloc` and are replaced or dropped right after.
            unsafe { self.alloc.deallocate(self.ptr, self.len) };
        }
    }
}

impl<A: StorageAllocator> Drop for OwnedBlock<A> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Caller-supplied storage; never reclaimed here.
pub(crate) struct BorrowedBlock<'a> {
    ptr: NonNull<u8>,
    len: usize,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> BorrowedBlock<'a> {
    pub(crate) fn new(block: &'a mut [u8]) -> Self {
        Self {
            len: block.len(),
            // A slice pointer is never null.
            ptr: NonNull::from(block).cast(),
            _marker: PhantomData,
        }
    }
}

/// Backing memory of a ring, tagged with who is responsible for freeing it.
///
/// Only the [`Storage::Owned`] arm carries an allocator, so a borrowed block
/// can never reach `deallocate`.
pub(crate) enum Storage<'a, A: StorageAllocator> {
    Owned(OwnedBlock<A>),
    Borrowed(BorrowedBlock<'a>),
}

impl<A: StorageAllocator> Storage<'_, A> {
    pub(crate) fn as_mut_ptr(&self) -> *mut u8 {
        match self {
            Storage::Owned(block) => block.as_mut_ptr(),
            Storage::Borrowed(block) => block.ptr.as_ptr(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Storage::Owned(block) => block.len(),
            Storage::Borrowed(block) => block.len,
        }
    }

    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }
}

impl<A: StorageAllocator> fmt::Debug for Storage<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.is_owned() { "Owned" } else { "Borrowed" };
        f.debug_struct(tag)
            .field("ptr", &self.as_mut_ptr())
            .field("len", &self.len())
            .finish()
    }
}

// Safety: the storage is a plain byte block; access to it is coordinated by
// the ring buffer's cursors and `&mut` receivers.
unsafe impl<A: StorageAllocator + Send> Send for Storage<'_, A> {}
unsafe impl<A: StorageAllocator + Sync> Sync for Storage<'_, A> {}
