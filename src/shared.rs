/*
 * @file shared.rs
 * @brief Cross-context index and flag discipline
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

//! FILE: shared.rs
//!
//! DESCRIPTION:
//! State shared between the interrupt and the main loop.
//!
//! BRIEF:
//! Every field here is owned by exactly one execution context. The owner
//! reads it with `get()` and publishes with `store()`; the other context
//! reads it with `snapshot()`, which runs inside `critical_section::with`.
//! Read-modify-write helpers always take a critical section so they work on
//! cores without atomic swap (thumbv6m).
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: December 2, 2025
//! UPDATE DATE: December 2, 2025

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use critical_section::CriticalSection;

/// Ring index owned by one context and observed by the other.
#[derive(Debug, Default)]
pub struct SharedIndex(AtomicUsize);

impl SharedIndex {
    /// Creates an index starting at `value`.
    pub const fn new(value: usize) -> Self {
        Self(AtomicUsize::new(value))
    }

    /// Reads the index without masking interrupts.
    ///
    /// # Details
    /// Valid from the owning context, and from the interrupt for fields the
    /// main loop owns, since the main loop cannot preempt an interrupt.
    ///
    /// # Returns
    /// * `usize` - Current counter value
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Publishes a new value from the owning context.
    ///
    /// # Arguments
    /// * `value` - Counter value to make visible to the other context
    pub fn store(&self, value: usize) {
        self.0.store(value, Ordering::Release);
    }

    /// Takes a consistent snapshot from the non-owning context.
    ///
    /// # Returns
    /// * `usize` - Counter value read inside a critical section
    pub fn snapshot(&self) -> usize {
        critical_section::with(|cs| self.read(cs))
    }

    /// Reads the index inside a critical section the caller already holds.
    ///
    /// # Arguments
    /// * `_cs` - Token proving interrupts are masked
    ///
    /// # Returns
    /// * `usize` - Current counter value
    pub fn read(&self, _cs: CriticalSection<'_>) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Writes the index inside a critical section the caller already holds.
    ///
    /// # Arguments
    /// * `_cs` - Token proving interrupts are masked
    /// * `value` - New counter value
    pub fn publish(&self, _cs: CriticalSection<'_>, value: usize) {
        self.0.store(value, Ordering::Release);
    }
}

/// Boolean owned by one context and observed by the other.
#[derive(Debug, Default)]
pub struct SharedFlag(AtomicBool);

impl SharedFlag {
    pub const fn new(value: bool) -> Self {
        Self(AtomicBool::new(value))
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }

    /// Takes a consistent snapshot from the non-owning context.
    pub fn snapshot(&self) -> bool {
        critical_section::with(|cs| self.read(cs))
    }

    /// Reads the flag inside a critical section the caller already holds.
    pub fn read(&self, _cs: CriticalSection<'_>) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns the flag and clears it as one indivisible step.
    ///
    /// # Returns
    /// * `bool` - Value before clearing
    pub fn take(&self) -> bool {
        critical_section::with(|_| {
            let value = self.0.load(Ordering::Acquire);
            self.0.store(false, Ordering::Release);
            value
        })
    }
}

/// Monotonic event counter, incremented by one context and read by any.
#[derive(Debug, Default)]
pub struct SharedCounter(AtomicUsize);

impl SharedCounter {
    pub const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    /// Adds one, wrapping on overflow.
    pub fn increment(&self) {
        critical_section::with(|_| {
            let value = self.0.load(Ordering::Relaxed);
            self.0.store(value.wrapping_add(1), Ordering::Release);
        });
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}
