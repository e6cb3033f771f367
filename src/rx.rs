/*
 * @file rx.rs
 * @brief Receive ring buffer filled from the UART interrupt
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

//! FILE: rx.rs
//!
//! DESCRIPTION:
//! Receive Ring Buffer.
//!
//! BRIEF:
//! The interrupt pushes one byte per event through [`RxProducer`]; the main
//! loop drains batches through [`RxConsumer`]. The write index belongs to
//! the interrupt and the read index to the main loop.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: December 2, 2025
//! UPDATE DATE: December 2, 2025

use crate::config::OverflowPolicy;
use crate::error::{Error, Result};
use crate::ring::Ring;
use crate::shared::{SharedFlag, SharedIndex};

/// Fixed-capacity FIFO between the receive interrupt and the main loop.
///
/// # Details
/// Built once from caller storage and split into one handle per role.
/// The buffer itself only offers read-only snapshots.
///
/// # Fields
/// * `ring` - Storage and index geometry
/// * `write` - Producer-owned counter, advanced by the interrupt
/// * `read` - Consumer-owned counter, advanced by `drain`
/// * `overflowed` - Set when bytes were lost or rejected
/// * `policy` - Overwrite or reject when full
#[derive(Debug)]
pub struct RxRingBuffer<'a> {
    ring: Ring<'a>,
    write: SharedIndex,
    read: SharedIndex,
    overflowed: SharedFlag,
    policy: OverflowPolicy,
}

impl<'a> RxRingBuffer<'a> {
    /// Creates an overwriting receive buffer over `storage`.
    ///
    /// # Arguments
    /// * `storage` - Backing bytes; its length is the capacity
    ///
    /// # Returns
    /// * `Result<Self>` - `Error::EmptyStorage` when `storage` is empty
    pub fn new(storage: &'a mut [u8]) -> Result<Self> {
        Self::with_policy(storage, OverflowPolicy::Overwrite)
    }

    /// Creates a receive buffer with an explicit overflow policy.
    ///
    /// # Arguments
    /// * `storage` - Backing bytes; its length is the capacity
    /// * `policy` - What `on_byte_received` does when the buffer is full
    ///
    /// # Returns
    /// * `Result<Self>` - `Error::EmptyStorage` when `storage` is empty
    pub fn with_policy(storage: &'a mut [u8], policy: OverflowPolicy) -> Result<Self> {
        Ok(Self {
            ring: Ring::new(storage)?,
            write: SharedIndex::new(0),
            read: SharedIndex::new(0),
            overflowed: SharedFlag::new(false),
            policy,
        })
    }

    /// Splits the buffer into its interrupt-side and main-loop-side handles.
    pub fn split(&mut self) -> (RxProducer<'_, 'a>, RxConsumer<'_, 'a>) {
        let buffer = &*self;
        (RxProducer { buffer }, RxConsumer { buffer })
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Storage position of the next byte the interrupt will write.
    pub fn write_index(&self) -> usize {
        self.ring.position(self.write.snapshot())
    }

    /// Storage position of the next byte `drain` will return.
    pub fn read_index(&self) -> usize {
        self.ring.position(self.read.snapshot())
    }

    /// Number of unread bytes, capped at the capacity after an overrun.
    pub fn len(&self) -> usize {
        let (read, write) = critical_section::with(|cs| (self.read.read(cs), self.write.read(cs)));
        self.ring.distance(read, write).min(self.capacity())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interrupt-side handle: the only writer of received bytes.
#[derive(Debug)]
pub struct RxProducer<'b, 'a> {
    buffer: &'b RxRingBuffer<'a>,
}

impl RxProducer<'_, '_> {
    /// Stores one received byte.
    ///
    /// # Details
    /// Runs in interrupt context. Under `Overwrite` there is no bounds check
    /// and unread bytes may be overwritten. Under `Reject` a full buffer drops
    /// the byte and raises the overflow flag.
    ///
    /// # Arguments
    /// * `byte` - Byte delivered by the UART
    ///
    /// # Returns
    /// * `Result<()>` - `Error::Overflow` only under `Reject`
    pub fn on_byte_received(&mut self, byte: u8) -> Result<()> {
        let rx = self.buffer;
        let write = rx.write.get();
        if rx.policy == OverflowPolicy::Reject
            && rx.ring.distance(rx.read.get(), write) >= rx.ring.capacity()
        {
            rx.overflowed.set(true);
            return Err(Error::Overflow {
                requested: 1,
                available: 0,
            });
        }
        rx.ring.write(write, &[byte]);
        rx.write.store(rx.ring.advance(write, 1));
        Ok(())
    }
}

/// Main-loop handle: the only reader of received bytes.
#[derive(Debug)]
pub struct RxConsumer<'b, 'a> {
    buffer: &'b RxRingBuffer<'a>,
}

impl RxConsumer<'_, '_> {
    /// Copies up to `out.len()` received bytes into `out`.
    ///
    /// # Details
    /// Snapshots the write index inside a critical section, then copies in
    /// FIFO order until caught up or `out` is full. If the interrupt lapped
    /// the reader, the oldest bytes are skipped so the newest `capacity`
    /// bytes are returned, and the overflow flag is raised.
    ///
    /// # Arguments
    /// * `out` - Destination; its length is the batch limit
    ///
    /// # Returns
    /// * `usize` - Bytes copied, zero when nothing is pending
    pub fn drain(&mut self, out: &mut [u8]) -> usize {
        let rx = self.buffer;
        let target = rx.write.snapshot();
        let mut read = rx.read.get();
        let mut available = rx.ring.distance(read, target);
        if available == 0 {
            return 0;
        }
        if available > rx.ring.capacity() {
            warn!("rx overrun, {=usize} bytes lost", available - rx.ring.capacity());
            available = rx.ring.capacity();
            read = rx.ring.retreat(target, available);
            rx.overflowed.set(true);
        }
        let count = available.min(out.len());
        rx.ring.read(read, &mut out[..count]);
        rx.read.store(rx.ring.advance(read, count));
        count
    }

    /// Bytes waiting to be drained.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Returns and clears the overflow flag.
    ///
    /// # Returns
    /// * `bool` - true if bytes were lost or rejected since the last call
    pub fn take_overflow(&mut self) -> bool {
        self.buffer.overflowed.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empty_returns_zero() {
        let mut storage = [0u8; 8];
        let mut rx = RxRingBuffer::new(&mut storage).unwrap();
        let (_, mut consumer) = rx.split();
        let mut out = [0u8; 4];
        assert_eq!(consumer.drain(&mut out), 0);
    }

    #[test]
    fn test_bytes_drain_in_order() {
        let mut storage = [0u8; 8];
        let mut rx = RxRingBuffer::new(&mut storage).unwrap();
        let (mut producer, mut consumer) = rx.split();
        for byte in b"abc" {
            producer.on_byte_received(*byte).unwrap();
        }
        let mut out = [0u8; 8];
        assert_eq!(consumer.drain(&mut out), 3);
        assert_eq!(&out[..3], b"abc");
        assert_eq!(consumer.drain(&mut out), 0);
    }

    #[test]
    fn test_drain_respects_max_len() {
        let mut storage = [0u8; 8];
        let mut rx = RxRingBuffer::new(&mut storage).unwrap();
        let (mut producer, mut consumer) = rx.split();
        for byte in 1..=6 {
            producer.on_byte_received(byte).unwrap();
        }
        let mut out = [0u8; 4];
        assert_eq!(consumer.drain(&mut out), 4);
        assert_eq!(out, [1, 2, 3, 4]);
        assert_eq!(consumer.drain(&mut out), 2);
        assert_eq!(&out[..2], [5, 6]);
    }

    #[test]
    fn test_zero_length_drain_leaves_data() {
        let mut storage = [0u8; 4];
        let mut rx = RxRingBuffer::new(&mut storage).unwrap();
        let (mut producer, mut consumer) = rx.split();
        producer.on_byte_received(9).unwrap();
        assert_eq!(consumer.drain(&mut []), 0);
        assert_eq!(consumer.pending(), 1);
    }

    #[test]
    fn test_full_capacity_is_readable() {
        let mut storage = [0u8; 4];
        let mut rx = RxRingBuffer::new(&mut storage).unwrap();
        let (mut producer, mut consumer) = rx.split();
        for byte in 1..=4 {
            producer.on_byte_received(byte).unwrap();
        }
        let mut out = [0u8; 8];
        assert_eq!(consumer.drain(&mut out), 4);
        assert_eq!(&out[..4], [1, 2, 3, 4]);
        assert!(!consumer.take_overflow());
    }

    #[test]
    fn test_overwrite_keeps_newest() {
        let mut storage = [0u8; 4];
        let mut rx = RxRingBuffer::new(&mut storage).unwrap();
        {
            let (mut producer, mut consumer) = rx.split();
            for byte in 1..=6 {
                producer.on_byte_received(byte).unwrap();
            }
            let mut out = [0u8; 8];
            assert_eq!(consumer.drain(&mut out), 4);
            assert_eq!(&out[..4], [3, 4, 5, 6]);
            assert!(consumer.take_overflow());
            assert!(!consumer.take_overflow());
        }
        assert_eq!(rx.write_index(), 2);
        assert_eq!(rx.read_index(), 2);
        assert!(rx.is_empty());
    }

    #[test]
    fn test_reject_policy_drops_new_bytes() {
        let mut storage = [0u8; 2];
        let mut rx = RxRingBuffer::with_policy(&mut storage, OverflowPolicy::Reject).unwrap();
        let (mut producer, mut consumer) = rx.split();
        producer.on_byte_received(1).unwrap();
        producer.on_byte_received(2).unwrap();
        assert_eq!(
            producer.on_byte_received(3),
            Err(Error::Overflow {
                requested: 1,
                available: 0
            })
        );
        let mut out = [0u8; 4];
        assert_eq!(consumer.drain(&mut out), 2);
        assert_eq!(&out[..2], [1, 2]);
        assert!(consumer.take_overflow());
        producer.on_byte_received(4).unwrap();
        assert_eq!(consumer.drain(&mut out), 1);
        assert_eq!(out[0], 4);
    }

    #[test]
    fn test_indices_wrap() {
        let mut storage = [0u8; 3];
        let mut rx = RxRingBuffer::new(&mut storage).unwrap();
        let mut out = [0u8; 3];
        {
            let (mut producer, mut consumer) = rx.split();
            for byte in 0..5 {
                producer.on_byte_received(byte).unwrap();
                assert_eq!(consumer.drain(&mut out), 1);
                assert_eq!(out[0], byte);
            }
        }
        assert_eq!(rx.write_index(), 2);
        assert_eq!(rx.read_index(), 2);
    }
}
