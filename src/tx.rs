/*
 * @file tx.rs
 * @brief Transmit ring buffer and its transmission state machine
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

//! FILE: tx.rs
//!
//! DESCRIPTION:
//! Transmit Ring Buffer.
//!
//! BRIEF:
//! The main loop enqueues batches through [`TxProducer`]; the completion
//! interrupt re-arms the hardware through [`TxCompletion`] until the buffer
//! is drained. Each hardware transfer covers one contiguous run of storage,
//! so data crossing the end of storage goes out in two transfers.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: December 2, 2025
//! UPDATE DATE: December 2, 2025

use crate::config::OverflowPolicy;
use crate::error::{Error, Result};
use crate::ring::{Chunk, Ring};
use crate::shared::{SharedCounter, SharedFlag, SharedIndex};

/// Platform primitive that starts a non-blocking hardware transfer.
///
/// # Details
/// Completion is reported later by the platform raising
/// [`crate::UartEvent::TransferComplete`]. The buffer never calls
/// `start_transmit` again before that completion arrives.
pub trait AsyncTransmit<'a> {
    /// Begins transmitting `chunk`.
    ///
    /// # Arguments
    /// * `chunk` - Contiguous run of transmit storage, valid for `'a`
    fn start_transmit(&self, chunk: Chunk<'a>);
}

/// Transmission state of a [`TxRingBuffer`].
///
/// # Variants
/// * `Idle` - No hardware transfer outstanding
/// * `Active` - A transfer was started and has not completed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    Idle,
    Active,
}

/// Fixed-capacity FIFO drained by asynchronous hardware transfers.
///
/// # Fields
/// * `ring` - Storage and index geometry
/// * `write` - Main-loop-owned counter, advanced by `enqueue`
/// * `read` - Next byte to hand to hardware, advanced when a run starts
/// * `tail` - First byte of the outstanding run, caught up on completion
/// * `active` - True while a transfer is outstanding
/// * `failures` - Transfers the platform reported as failed
/// * `policy` - Overwrite or reject when full
/// * `transmitter` - Platform transmit primitive
#[derive(Debug)]
pub struct TxRingBuffer<'a, T> {
    ring: Ring<'a>,
    write: SharedIndex,
    read: SharedIndex,
    tail: SharedIndex,
    active: SharedFlag,
    failures: SharedCounter,
    policy: OverflowPolicy,
    transmitter: T,
}

impl<'a, T: AsyncTransmit<'a>> TxRingBuffer<'a, T> {
    /// Creates an overwriting transmit buffer over `storage`.
    ///
    /// # Arguments
    /// * `storage` - Backing bytes; its length is the capacity
    /// * `transmitter` - Platform transmit primitive
    ///
    /// # Returns
    /// * `Result<Self>` - `Error::EmptyStorage` when `storage` is empty
    pub fn new(storage: &'a mut [u8], transmitter: T) -> Result<Self> {
        Self::with_policy(storage, transmitter, OverflowPolicy::Overwrite)
    }

    /// Creates a transmit buffer with an explicit overflow policy.
    pub fn with_policy(
        storage: &'a mut [u8],
        transmitter: T,
        policy: OverflowPolicy,
    ) -> Result<Self> {
        Ok(Self {
            ring: Ring::new(storage)?,
            write: SharedIndex::new(0),
            read: SharedIndex::new(0),
            tail: SharedIndex::new(0),
            active: SharedFlag::new(false),
            failures: SharedCounter::new(),
            policy,
            transmitter,
        })
    }

    /// Splits the buffer into its main-loop-side and interrupt-side handles.
    pub fn split(&mut self) -> (TxProducer<'_, 'a, T>, TxCompletion<'_, 'a, T>) {
        let buffer = &*self;
        (TxProducer { buffer }, TxCompletion { buffer })
    }

    /// Hands the next contiguous run of pending bytes to the hardware.
    ///
    /// # Details
    /// Called from either context. The run ends at whichever comes first:
    /// the write index or the end of storage. Bytes after the wrap go out
    /// on the next completion.
    ///
    /// # Preconditions
    /// No transfer may be outstanding. The interrupt path guarantees this by
    /// only calling after a completion; a main-loop caller must first have
    /// observed `active == false`. The flag is not re-checked here.
    fn retrigger_transmission(&self) {
        self.active.set(true);
        let write = self.write.get();
        let mut read = self.read.get();
        let mut pending = self.ring.distance(read, write);
        if pending > self.ring.capacity() {
            warn!(
                "tx overrun, {=usize} unsent bytes overwritten",
                pending - self.ring.capacity()
            );
            pending = self.ring.capacity();
            read = self.ring.retreat(write, pending);
            self.tail.store(read);
        }
        if pending == 0 {
            self.active.set(false);
            return;
        }
        let start = self.ring.position(read);
        let run = pending.min(self.ring.capacity() - start);
        self.read.store(self.ring.advance(read, run));
        trace!("tx run at {=usize}, {=usize} bytes", start, run);
        self.transmitter.start_transmit(self.ring.chunk(start, run));
    }

    /// Clears the activity flag and re-arms if bytes are still pending.
    fn finish_transfer(&self) {
        self.active.set(false);
        let read = self.read.get();
        self.tail.store(read);
        if self.write.get() == read {
            return;
        }
        self.retrigger_transmission();
    }
}

impl<'a, T> TxRingBuffer<'a, T> {
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Storage position of the next byte `enqueue` will write.
    pub fn write_index(&self) -> usize {
        self.ring.position(self.write.snapshot())
    }

    /// Storage position of the next byte to hand to hardware.
    pub fn read_index(&self) -> usize {
        self.ring.position(self.read.snapshot())
    }

    /// Bytes enqueued but not yet handed to hardware.
    pub fn pending(&self) -> usize {
        let (read, write) = critical_section::with(|cs| (self.read.read(cs), self.write.read(cs)));
        self.ring.distance(read, write).min(self.capacity())
    }

    pub fn is_transmitting(&self) -> bool {
        self.active.snapshot()
    }

    pub fn state(&self) -> TxState {
        if self.is_transmitting() {
            TxState::Active
        } else {
            TxState::Idle
        }
    }

    /// Number of transfers the platform reported as failed.
    pub fn failed_transfers(&self) -> usize {
        self.failures.get()
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    /// Bytes that can be enqueued without touching unsent or in-flight data.
    fn free(&self, write: usize) -> usize {
        let tail = self.tail.snapshot();
        self.capacity()
            .saturating_sub(self.ring.distance(tail, write))
    }
}

/// Main-loop handle: the only writer of bytes to transmit.
#[derive(Debug)]
pub struct TxProducer<'b, 'a, T> {
    buffer: &'b TxRingBuffer<'a, T>,
}

impl<'a, T: AsyncTransmit<'a>> TxProducer<'_, 'a, T> {
    /// Queues `data` for transmission and starts the hardware if idle.
    ///
    /// # Details
    /// Copies into storage from the write index with wraparound, then
    /// publishes the new write index and samples the activity flag in one
    /// critical section. If no transfer was outstanding, the first run is
    /// started from here. Under `Overwrite` nothing is checked against the
    /// read index; input longer than the capacity keeps only its last
    /// `capacity` bytes.
    ///
    /// # Arguments
    /// * `data` - Bytes to send
    ///
    /// # Returns
    /// * `Result<()>` - `Error::Overflow` only under `Reject`
    pub fn enqueue(&mut self, data: &[u8]) -> Result<()> {
        let tx = self.buffer;
        if data.is_empty() {
            return Ok(());
        }
        let write = tx.write.get();
        if tx.policy == OverflowPolicy::Reject {
            let available = tx.free(write);
            if data.len() > available {
                return Err(Error::Overflow {
                    requested: data.len(),
                    available,
                });
            }
        }
        let skip = data.len().saturating_sub(tx.capacity());
        tx.ring.write(tx.ring.advance(write, skip), &data[skip..]);
        let new_write = tx.ring.advance(write, data.len());
        let was_active = critical_section::with(|cs| {
            tx.write.publish(cs, new_write);
            tx.active.read(cs)
        });
        if !was_active {
            tx.retrigger_transmission();
        }
        Ok(())
    }

    /// Free space under the current policy's accounting.
    pub fn available(&self) -> usize {
        self.buffer.free(self.buffer.write.get())
    }
}

/// Interrupt-side handle: receives hardware completion events.
#[derive(Debug)]
pub struct TxCompletion<'b, 'a, T> {
    buffer: &'b TxRingBuffer<'a, T>,
}

impl<'a, T: AsyncTransmit<'a>> TxCompletion<'_, 'a, T> {
    /// Handles a successful transfer completion.
    ///
    /// # Details
    /// Runs in interrupt context. Goes idle when the read index has caught
    /// up with the write index, otherwise starts the next run.
    pub fn on_transmit_complete(&mut self) {
        self.buffer.finish_transfer();
    }

    /// Handles a transfer the platform reports as failed.
    ///
    /// # Details
    /// The failed run is not resent. Remaining bytes are still re-armed so
    /// the queue keeps draining.
    ///
    /// # Returns
    /// * `Result<()>` - Always `Error::TransferFailed`
    pub fn on_transfer_failed(&mut self) -> Result<()> {
        self.buffer.failures.increment();
        warn!("tx transfer failed, {=usize} total", self.buffer.failures.get());
        self.buffer.finish_transfer();
        Err(Error::TransferFailed)
    }

    pub fn transmitter(&self) -> &T {
        &self.buffer.transmitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        runs: RefCell<Vec<(usize, Vec<u8>)>>,
    }

    impl<'a> AsyncTransmit<'a> for Recorder {
        fn start_transmit(&self, chunk: Chunk<'a>) {
            self.runs.borrow_mut().push((chunk.offset(), chunk.iter().collect()));
        }
    }

    #[test]
    fn test_idle_enqueue_starts_one_run() {
        let mut storage = [0u8; 8];
        let mut tx = TxRingBuffer::new(&mut storage, Recorder::default()).unwrap();
        {
            let (mut producer, mut completion) = tx.split();
            producer.enqueue(&[1, 2, 3, 4, 5]).unwrap();
            assert_eq!(
                *completion.transmitter().runs.borrow(),
                vec![(0, vec![1, 2, 3, 4, 5])]
            );
            completion.on_transmit_complete();
        }
        assert_eq!(tx.read_index(), 5);
        assert_eq!(tx.write_index(), 5);
        assert_eq!(tx.state(), TxState::Idle);
        assert_eq!(tx.transmitter().runs.borrow().len(), 1);
    }

    #[test]
    fn test_wrapped_data_needs_two_runs() {
        let mut storage = [0u8; 8];
        let mut tx = TxRingBuffer::new(&mut storage, Recorder::default()).unwrap();
        {
            let (mut producer, mut completion) = tx.split();
            producer.enqueue(&[0; 6]).unwrap();
            completion.on_transmit_complete();
            producer.enqueue(&[10, 11, 12, 13, 14]).unwrap();
            assert_eq!(completion.transmitter().runs.borrow()[1], (6, vec![10, 11]));
            completion.on_transmit_complete();
            assert_eq!(
                completion.transmitter().runs.borrow()[2],
                (0, vec![12, 13, 14])
            );
            completion.on_transmit_complete();
        }
        assert_eq!(tx.read_index(), 3);
        assert_eq!(tx.write_index(), 3);
        assert_eq!(tx.state(), TxState::Idle);
    }

    #[test]
    fn test_enqueue_while_active_waits_for_completion() {
        let mut storage = [0u8; 8];
        let mut tx = TxRingBuffer::new(&mut storage, Recorder::default()).unwrap();
        let (mut producer, mut completion) = tx.split();
        producer.enqueue(b"ab").unwrap();
        producer.enqueue(b"cd").unwrap();
        assert_eq!(completion.transmitter().runs.borrow().len(), 1);
        completion.on_transmit_complete();
        assert_eq!(completion.transmitter().runs.borrow()[1], (2, b"cd".to_vec()));
    }

    #[test]
    fn test_empty_enqueue_stays_idle() {
        let mut storage = [0u8; 4];
        let mut tx = TxRingBuffer::new(&mut storage, Recorder::default()).unwrap();
        {
            let (mut producer, _) = tx.split();
            producer.enqueue(&[]).unwrap();
        }
        assert_eq!(tx.state(), TxState::Idle);
        assert!(tx.transmitter().runs.borrow().is_empty());
    }

    #[test]
    fn test_full_buffer_sends_whole_storage() {
        let mut storage = [0u8; 4];
        let mut tx = TxRingBuffer::new(&mut storage, Recorder::default()).unwrap();
        let (mut producer, _) = tx.split();
        producer.enqueue(&[1, 2, 3, 4]).unwrap();
        assert_eq!(
            producer.buffer.transmitter().runs.borrow()[0],
            (0, vec![1, 2, 3, 4])
        );
    }

    #[test]
    fn test_oversize_enqueue_keeps_tail() {
        let mut storage = [0u8; 4];
        let mut tx = TxRingBuffer::new(&mut storage, Recorder::default()).unwrap();
        let (mut producer, mut completion) = tx.split();
        producer.enqueue(&[1, 2, 3, 4, 5, 6]).unwrap();
        completion.on_transmit_complete();
        let runs = completion.transmitter().runs.borrow();
        let sent: Vec<u8> = runs.iter().flat_map(|(_, bytes)| bytes.clone()).collect();
        assert_eq!(sent, [3, 4, 5, 6]);
    }

    #[test]
    fn test_reject_policy_refuses_oversize() {
        let mut storage = [0u8; 4];
        let mut tx =
            TxRingBuffer::with_policy(&mut storage, Recorder::default(), OverflowPolicy::Reject)
                .unwrap();
        let (mut producer, mut completion) = tx.split();
        producer.enqueue(&[1, 2, 3]).unwrap();
        assert_eq!(
            producer.enqueue(&[4, 5]),
            Err(Error::Overflow {
                requested: 2,
                available: 1
            })
        );
        completion.on_transmit_complete();
        assert_eq!(producer.available(), 4);
        producer.enqueue(&[4, 5]).unwrap();
    }

    #[test]
    fn test_failed_transfer_still_drains() {
        let mut storage = [0u8; 8];
        let mut tx = TxRingBuffer::new(&mut storage, Recorder::default()).unwrap();
        {
            let (mut producer, mut completion) = tx.split();
            producer.enqueue(b"xy").unwrap();
            producer.enqueue(b"z").unwrap();
            assert_eq!(completion.on_transfer_failed(), Err(Error::TransferFailed));
            assert_eq!(completion.transmitter().runs.borrow()[1], (2, b"z".to_vec()));
            completion.on_transmit_complete();
        }
        assert_eq!(tx.failed_transfers(), 1);
        assert_eq!(tx.state(), TxState::Idle);
    }
}
