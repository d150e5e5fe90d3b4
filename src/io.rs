//! `std::io` adapters
//!
//! Writes are short when the buffer is full, and `Ok(0)` once nothing fits,
//! so `write_all` reports [`io::ErrorKind::WriteZero`] instead of blocking.
//! Reads return `Ok(0)` on an empty buffer.

use std::io;

use crate::ring_buffer::RingBuffer;
use crate::split::{Reader, Writer};
use crate::storage::StorageAllocator;

impl<A: StorageAllocator> io::Write for RingBuffer<'_, A> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(RingBuffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<A: StorageAllocator> io::Read for RingBuffer<'_, A> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(RingBuffer::read(self, buf))
    }
}

impl<A: StorageAllocator> io::Write for Writer<'_, '_, A> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Writer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<A: StorageAllocator> io::Read for Reader<'_, '_, A> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Reader::read(self, buf))
    }
}
