/*
 * @file transmitter.rs
 * @brief Interrupt-fed UART0 TX FIFO transmitter
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

//! FILE: transmitter.rs
//!
//! DESCRIPTION:
//! RP2350 Asynchronous UART Transmitter.
//!
//! BRIEF:
//! Implements the ring buffer's transmit primitive on the PL011 TX FIFO.
//! A chunk is primed into the FIFO when started and topped up from the
//! UART interrupt; it counts as complete once every byte is in the FIFO.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: December 2, 2025
//! UPDATE DATE: December 2, 2025

use crate::hardware::uart_regs;
use core::cell::Cell;
use critical_section::Mutex;
use uart_ring::{AsyncTransmit, Chunk};

/// Chunk being pushed into the TX FIFO and how far it got.
#[derive(Clone, Copy)]
struct Pending {
    chunk: Chunk<'static>,
    sent: usize,
}

/// Transmit primitive that feeds UART0's TX FIFO from interrupt context.
///
/// # Details
/// Holds at most one outstanding chunk. The ring buffer guarantees a new
/// chunk is only started after the previous one completed.
///
/// # Fields
/// * `pending` - Outstanding chunk, `None` when idle
pub struct FifoTransmitter {
    pending: Mutex<Cell<Option<Pending>>>,
}

/// Public methods for FifoTransmitter
impl FifoTransmitter {
    /// Creates an idle transmitter.
    ///
    /// # Returns
    /// * `Self` - Transmitter with no outstanding chunk
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(None)),
        }
    }

    /// Tops up the TX FIFO from the outstanding chunk.
    ///
    /// # Details
    /// Called from the UART interrupt. Masks the TX interrupt once the
    /// chunk is fully queued.
    ///
    /// # Returns
    /// * `bool` - true when the outstanding chunk just finished
    pub fn service(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.pending.borrow(cs);
            let Some(mut pending) = cell.get() else {
                mask_tx_irq();
                return false;
            };
            fill_fifo(&mut pending);
            if pending.sent == pending.chunk.len() {
                cell.set(None);
                mask_tx_irq();
                true
            } else {
                cell.set(Some(pending));
                false
            }
        })
    }

    /// Returns `true` while a chunk is outstanding.
    pub fn is_busy(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get().is_some())
    }
}

impl AsyncTransmit<'static> for FifoTransmitter {
    /// Primes the FIFO and arms the interrupt that finishes the chunk.
    ///
    /// # Details
    /// The UART interrupt is pended in software so a chunk that fits in
    /// the FIFO still produces a completion.
    ///
    /// # Arguments
    /// * `chunk` - Contiguous run of transmit ring storage
    fn start_transmit(&self, chunk: Chunk<'static>) {
        critical_section::with(|cs| {
            let mut pending = Pending { chunk, sent: 0 };
            fill_fifo(&mut pending);
            self.pending.borrow(cs).set(Some(pending));
            unmask_tx_irq();
        });
        pend_uart_irq();
    }
}

/// Writes chunk bytes until the FIFO is full or the chunk is exhausted.
///
/// # Arguments
/// * `pending` - Outstanding chunk, advanced in place
fn fill_fifo(pending: &mut Pending) {
    let uart = uart_regs();
    while uart.uartfr().read().txff().bit_is_clear() {
        let Some(byte) = pending.chunk.get(pending.sent) else {
            break;
        };
        uart.uartdr().write(|w| unsafe { w.data().bits(byte) });
        pending.sent += 1;
    }
}

/// Enables the TX FIFO level interrupt.
fn unmask_tx_irq() {
    uart_regs().uartimsc().modify(|_, w| w.txim().set_bit());
}

/// Disables the TX FIFO level interrupt.
fn mask_tx_irq() {
    uart_regs().uartimsc().modify(|_, w| w.txim().clear_bit());
}

/// Requests the UART0 interrupt on ARM targets.
#[cfg(target_arch = "arm")]
fn pend_uart_irq() {
    cortex_m::peripheral::NVIC::pend(crate::hal::pac::Interrupt::UART0_IRQ);
}

/// No interrupt controller to pend on non-ARM hosts.
#[cfg(not(target_arch = "arm"))]
fn pend_uart_irq() {}
