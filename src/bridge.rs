/*
 * @file bridge.rs
 * @brief Application context owning the UART receive and transmit rings
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

//! Ties both rings to one UART.
//!
//! [`UartBridge`] is built once at startup and split into an
//! [`InterruptContext`], handed to the UART interrupt handler, and a
//! [`MainContext`], kept by the main loop.

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::rx::{RxConsumer, RxProducer, RxRingBuffer};
use crate::tx::{AsyncTransmit, TxCompletion, TxProducer, TxRingBuffer};

/// Hardware events the platform delivers from interrupt context.
///
/// # Variants
/// * `ByteReceived` - One byte taken from the hardware receive FIFO
/// * `TransferComplete` - The last started transfer finished
/// * `TransferFailed` - The last started transfer was aborted by the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartEvent {
    ByteReceived(u8),
    TransferComplete,
    TransferFailed,
}

/// Receive and transmit rings for one UART.
#[derive(Debug)]
pub struct UartBridge<'a, T> {
    rx: RxRingBuffer<'a>,
    tx: TxRingBuffer<'a, T>,
}

impl<'a, T: AsyncTransmit<'a>> UartBridge<'a, T> {
    /// Builds both rings over caller storage.
    ///
    /// # Details
    /// Call once, before the UART interrupt is enabled.
    ///
    /// # Arguments
    /// * `rx_storage` - Receive ring bytes
    /// * `tx_storage` - Transmit ring bytes
    /// * `transmitter` - Platform transmit primitive
    /// * `config` - Overflow policy per direction
    ///
    /// # Returns
    /// * `Result<Self>` - `Error::EmptyStorage` if either region is empty
    pub fn new(
        rx_storage: &'a mut [u8],
        tx_storage: &'a mut [u8],
        transmitter: T,
        config: BridgeConfig,
    ) -> Result<Self> {
        Ok(Self {
            rx: RxRingBuffer::with_policy(rx_storage, config.rx_policy)?,
            tx: TxRingBuffer::with_policy(tx_storage, transmitter, config.tx_policy)?,
        })
    }

    /// Splits into the interrupt-side and main-loop-side contexts.
    pub fn split(&mut self) -> (InterruptContext<'_, 'a, T>, MainContext<'_, 'a, T>) {
        let (rx_producer, rx_consumer) = self.rx.split();
        let (tx_producer, tx_completion) = self.tx.split();
        (
            InterruptContext {
                rx: rx_producer,
                tx: tx_completion,
            },
            MainContext {
                rx: rx_consumer,
                tx: tx_producer,
            },
        )
    }
}

impl<'a, T> UartBridge<'a, T> {
    pub fn rx(&self) -> &RxRingBuffer<'a> {
        &self.rx
    }

    pub fn tx(&self) -> &TxRingBuffer<'a, T> {
        &self.tx
    }
}

/// Interrupt-side half: produces received bytes, consumes completions.
#[derive(Debug)]
pub struct InterruptContext<'b, 'a, T> {
    rx: RxProducer<'b, 'a>,
    tx: TxCompletion<'b, 'a, T>,
}

impl<'a, T: AsyncTransmit<'a>> InterruptContext<'_, 'a, T> {
    /// Dispatches one platform event.
    ///
    /// # Arguments
    /// * `event` - Event raised by the UART interrupt
    ///
    /// # Returns
    /// * `Result<()>` - Overflow under a rejecting receive policy, or a
    ///   failed transfer
    pub fn on_event(&mut self, event: UartEvent) -> Result<()> {
        match event {
            UartEvent::ByteReceived(byte) => self.rx.on_byte_received(byte),
            UartEvent::TransferComplete => {
                self.tx.on_transmit_complete();
                Ok(())
            }
            UartEvent::TransferFailed => self.tx.on_transfer_failed(),
        }
    }

    pub fn transmitter(&self) -> &T {
        self.tx.transmitter()
    }
}

/// Main-loop half: consumes received bytes, produces bytes to send.
#[derive(Debug)]
pub struct MainContext<'b, 'a, T> {
    rx: RxConsumer<'b, 'a>,
    tx: TxProducer<'b, 'a, T>,
}

impl<'a, T: AsyncTransmit<'a>> MainContext<'_, 'a, T> {
    /// Copies up to `out.len()` received bytes into `out`.
    pub fn drain(&mut self, out: &mut [u8]) -> usize {
        self.rx.drain(out)
    }

    /// Queues `data` for transmission.
    pub fn enqueue(&mut self, data: &[u8]) -> Result<()> {
        self.tx.enqueue(data)
    }

    /// Sends back whatever arrived since the last call.
    ///
    /// # Details
    /// One pass of the echo loop: drain at most `scratch.len()` bytes and,
    /// if any came in, enqueue them for transmission.
    ///
    /// # Arguments
    /// * `scratch` - Batch buffer; its length bounds one pass
    ///
    /// # Returns
    /// * `Result<usize>` - Bytes echoed in this pass
    pub fn echo(&mut self, scratch: &mut [u8]) -> Result<usize> {
        let count = self.rx.drain(scratch);
        if count > 0 {
            debug!("echo {=usize} bytes", count);
            self.tx.enqueue(&scratch[..count])?;
        }
        Ok(count)
    }

    /// Returns and clears the receive overflow flag.
    pub fn take_overflow(&mut self) -> bool {
        self.rx.take_overflow()
    }

    pub fn rx_pending(&self) -> usize {
        self.rx.pending()
    }

    pub fn tx_available(&self) -> usize {
        self.tx.available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ECHO_CHUNK;
    use crate::error::Error;
    use crate::ring::Chunk;
    use core::cell::RefCell;

    #[derive(Default)]
    struct Wire {
        sent: RefCell<Vec<u8>>,
    }

    impl<'a> AsyncTransmit<'a> for Wire {
        fn start_transmit(&self, chunk: Chunk<'a>) {
            self.sent.borrow_mut().extend(chunk.iter());
        }
    }

    #[test]
    fn test_echo_round_trip() {
        let mut rx_storage = [0u8; 16];
        let mut tx_storage = [0u8; 16];
        let mut bridge = UartBridge::new(
            &mut rx_storage,
            &mut tx_storage,
            Wire::default(),
            BridgeConfig::default(),
        )
        .unwrap();
        let (mut isr, mut main) = bridge.split();
        for byte in b"hello" {
            isr.on_event(UartEvent::ByteReceived(*byte)).unwrap();
        }
        let mut scratch = [0u8; DEFAULT_ECHO_CHUNK];
        assert_eq!(main.echo(&mut scratch).unwrap(), 5);
        assert_eq!(main.echo(&mut scratch).unwrap(), 0);
        isr.on_event(UartEvent::TransferComplete).unwrap();
        assert_eq!(*isr.transmitter().sent.borrow(), b"hello");
    }

    #[test]
    fn test_echo_batches_by_scratch_len() {
        let mut rx_storage = [0u8; 32];
        let mut tx_storage = [0u8; 32];
        let mut bridge = UartBridge::new(
            &mut rx_storage,
            &mut tx_storage,
            Wire::default(),
            BridgeConfig::default(),
        )
        .unwrap();
        let (mut isr, mut main) = bridge.split();
        for byte in 0..25u8 {
            isr.on_event(UartEvent::ByteReceived(byte)).unwrap();
        }
        let mut scratch = [0u8; DEFAULT_ECHO_CHUNK];
        assert_eq!(main.echo(&mut scratch).unwrap(), 10);
        assert_eq!(main.rx_pending(), 15);
        assert_eq!(main.echo(&mut scratch).unwrap(), 10);
        assert_eq!(main.echo(&mut scratch).unwrap(), 5);
        assert_eq!(isr.transmitter().sent.borrow().len(), 10);
        isr.on_event(UartEvent::TransferComplete).unwrap();
        isr.on_event(UartEvent::TransferComplete).unwrap();
        assert_eq!(*isr.transmitter().sent.borrow(), (0..25u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_failed_event_is_reported() {
        let mut rx_storage = [0u8; 4];
        let mut tx_storage = [0u8; 4];
        let mut bridge = UartBridge::new(
            &mut rx_storage,
            &mut tx_storage,
            Wire::default(),
            BridgeConfig::default(),
        )
        .unwrap();
        {
            let (mut isr, mut main) = bridge.split();
            main.enqueue(b"ok").unwrap();
            assert_eq!(
                isr.on_event(UartEvent::TransferFailed),
                Err(Error::TransferFailed)
            );
        }
        assert_eq!(bridge.tx().failed_transfers(), 1);
    }

    #[test]
    fn test_empty_storage_rejected() {
        let mut rx_storage = [0u8; 4];
        let mut tx_storage: [u8; 0] = [];
        let result = UartBridge::new(
            &mut rx_storage,
            &mut tx_storage,
            Wire::default(),
            BridgeConfig::default(),
        );
        assert!(matches!(result, Err(Error::EmptyStorage)));
    }

    #[test]
    fn test_strict_rx_reports_overflow() {
        let mut rx_storage = [0u8; 1];
        let mut tx_storage = [0u8; 4];
        let mut bridge = UartBridge::new(
            &mut rx_storage,
            &mut tx_storage,
            Wire::default(),
            BridgeConfig::strict(),
        )
        .unwrap();
        let (mut isr, mut main) = bridge.split();
        isr.on_event(UartEvent::ByteReceived(1)).unwrap();
        assert!(isr.on_event(UartEvent::ByteReceived(2)).is_err());
        assert!(main.take_overflow());
        let mut out = [0u8; 4];
        assert_eq!(main.drain(&mut out), 1);
        assert_eq!(out[0], 1);
    }
}
