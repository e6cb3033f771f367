/*
 * @file ring.rs
 * @brief Ring storage and lap-counted index arithmetic
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Fixed-size storage shared by the receive and transmit buffers.
//!
//! Indices are counters kept modulo `limit`, the largest multiple of the
//! capacity that fits in a `usize`. The storage position of a counter is
//! `counter % capacity`, equal counters mean empty, and a buffer holding
//! exactly `capacity` unread bytes is still distinguishable from an empty one.

use crate::error::{Error, Result};
use core::sync::atomic::{AtomicU8, Ordering};

/// Caller-provided byte region plus the index geometry derived from its length.
#[derive(Debug)]
pub(crate) struct Ring<'a> {
    cells: &'a [AtomicU8],
    limit: usize,
}

impl<'a> Ring<'a> {
    /// Takes exclusive ownership of `storage` for the lifetime `'a`.
    ///
    /// # Arguments
    /// * `storage` - Backing bytes; its length becomes the capacity
    ///
    /// # Returns
    /// * `Result<Self>` - `Error::EmptyStorage` for a zero-length region
    pub(crate) fn new(storage: &'a mut [u8]) -> Result<Self> {
        if storage.is_empty() {
            return Err(Error::EmptyStorage);
        }
        let capacity = storage.len();
        // SAFETY: `AtomicU8` has the same size and alignment as `u8`, and the
        // unique borrow guarantees nothing else touches the bytes for `'a`.
        let cells =
            unsafe { core::slice::from_raw_parts(storage.as_mut_ptr().cast::<AtomicU8>(), capacity) };
        Ok(Self {
            cells,
            limit: capacity * (usize::MAX / capacity),
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Storage position of an index counter, always in `[0, capacity)`.
    pub(crate) fn position(&self, counter: usize) -> usize {
        counter % self.cells.len()
    }

    /// Moves a counter forward by `n`, wrapping at the lap limit.
    pub(crate) fn advance(&self, counter: usize, n: usize) -> usize {
        let n = n % self.limit;
        if counter >= self.limit - n {
            counter - (self.limit - n)
        } else {
            counter + n
        }
    }

    /// Moves a counter back by `n`, wrapping at the lap limit.
    pub(crate) fn retreat(&self, counter: usize, n: usize) -> usize {
        let n = n % self.limit;
        if counter >= n {
            counter - n
        } else {
            self.limit - (n - counter)
        }
    }

    /// Number of bytes between a read counter and a write counter.
    pub(crate) fn distance(&self, read: usize, write: usize) -> usize {
        if write >= read {
            write - read
        } else {
            self.limit - read + write
        }
    }

    /// Copies `data` into storage starting at `counter`, wrapping at the end.
    ///
    /// # Details
    /// At most `capacity` bytes are meaningful; callers trim longer input
    /// before calling.
    pub(crate) fn write(&self, counter: usize, data: &[u8]) {
        let pos = self.position(counter);
        let first = data.len().min(self.capacity() - pos);
        let (head, tail) = data.split_at(first);
        store_bytes(&self.cells[pos..pos + first], head);
        store_bytes(&self.cells[..tail.len()], tail);
    }

    /// Copies `out.len()` bytes out of storage starting at `counter`.
    pub(crate) fn read(&self, counter: usize, out: &mut [u8]) {
        let pos = self.position(counter);
        let first = out.len().min(self.capacity() - pos);
        let (head, tail) = out.split_at_mut(first);
        load_bytes(&self.cells[pos..pos + first], head);
        load_bytes(&self.cells[..tail.len()], tail);
    }

    /// Borrows `len` contiguous bytes starting at storage position `pos`.
    pub(crate) fn chunk(&self, pos: usize, len: usize) -> Chunk<'a> {
        let cells: &'a [AtomicU8] = self.cells;
        Chunk {
            cells: &cells[pos..pos + len],
            offset: pos,
        }
    }
}

fn store_bytes(cells: &[AtomicU8], bytes: &[u8]) {
    for (cell, &byte) in cells.iter().zip(bytes) {
        cell.store(byte, Ordering::Relaxed);
    }
}

fn load_bytes(cells: &[AtomicU8], out: &mut [u8]) {
    for (slot, cell) in out.iter_mut().zip(cells) {
        *slot = cell.load(Ordering::Relaxed);
    }
}

/// One contiguous run of transmit storage handed to the hardware.
///
/// # Details
/// The run never wraps past the end of storage. It stays valid for the
/// storage lifetime `'a`, so a platform may hold on to it until the transfer
/// finishes, either feeding a FIFO byte by byte through [`Chunk::get`] or
/// pointing a DMA channel at [`Chunk::as_ptr`].
#[derive(Clone, Copy, Debug)]
pub struct Chunk<'a> {
    cells: &'a [AtomicU8],
    offset: usize,
}

impl<'a> Chunk<'a> {
    /// Position of the first byte within the buffer storage.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Address of the first byte, for DMA-style transfers.
    pub fn as_ptr(&self) -> *const u8 {
        self.cells.as_ptr().cast()
    }

    /// Byte at index `i` of the run.
    ///
    /// # Arguments
    /// * `i` - Offset from the start of the run
    ///
    /// # Returns
    /// * `Option<u8>` - `None` past the end of the run
    pub fn get(&self, i: usize) -> Option<u8> {
        self.cells.get(i).map(|cell| cell.load(Ordering::Relaxed))
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + 'a {
        let cells: &'a [AtomicU8] = self.cells;
        cells.iter().map(|cell| cell.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_storage_rejected() {
        let mut storage: [u8; 0] = [];
        assert_eq!(Ring::new(&mut storage).unwrap_err(), Error::EmptyStorage);
    }

    #[test]
    fn test_limit_is_multiple_of_capacity() {
        let mut storage = [0u8; 7];
        let ring = Ring::new(&mut storage).unwrap();
        assert_eq!(ring.limit % 7, 0);
        assert!(usize::MAX - ring.limit < 7);
    }

    #[test]
    fn test_advance_wraps_at_limit() {
        let mut storage = [0u8; 8];
        let ring = Ring::new(&mut storage).unwrap();
        let last = ring.limit - 1;
        assert_eq!(ring.advance(last, 1), 0);
        assert_eq!(ring.advance(last, 3), 2);
        assert_eq!(ring.position(ring.advance(last, 3)), 2);
        assert_eq!(ring.position(last), 7);
    }

    #[test]
    fn test_distance_across_limit() {
        let mut storage = [0u8; 8];
        let ring = Ring::new(&mut storage).unwrap();
        let read = ring.limit - 2;
        let write = ring.advance(read, 5);
        assert_eq!(ring.distance(read, write), 5);
        assert_eq!(ring.retreat(write, 5), read);
    }

    #[test]
    fn test_write_read_wraps() {
        let mut storage = [0u8; 4];
        let ring = Ring::new(&mut storage).unwrap();
        ring.write(3, &[1, 2, 3]);
        let mut out = [0u8; 3];
        ring.read(3, &mut out);
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(ring.chunk(0, 2).iter().collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn test_chunk_accessors() {
        let mut storage = [9u8, 8, 7, 6];
        let ring = Ring::new(&mut storage).unwrap();
        let chunk = ring.chunk(1, 2);
        assert_eq!(chunk.offset(), 1);
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.get(0), Some(8));
        assert_eq!(chunk.get(2), None);
    }
}
