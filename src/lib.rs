/*
 * @file lib.rs
 * @brief UART ring buffer library root
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

//! UART Ring - interrupt-safe receive and transmit buffers for a UART.
//!
//! The library bridges two execution contexts:
//! - a UART interrupt that delivers one received byte at a time and reports
//!   when an outbound transfer has finished
//! - a cooperative main loop that drains received data and queues data to send
//!
//! Each direction is a fixed-capacity ring over caller-provided storage with
//! exactly one producer and one consumer. Cross-context reads go through
//! `critical-section`, so the crate runs on any core with an implementation.
//!
//! # Example
//! ```
//! use uart_ring::{AsyncTransmit, BridgeConfig, Chunk, UartBridge, UartEvent};
//!
//! struct Discard;
//!
//! impl<'a> AsyncTransmit<'a> for Discard {
//!     fn start_transmit(&self, _chunk: Chunk<'a>) {}
//! }
//!
//! let mut rx = [0u8; 64];
//! let mut tx = [0u8; 64];
//! let mut bridge = UartBridge::new(&mut rx, &mut tx, Discard, BridgeConfig::default()).unwrap();
//! let (mut isr, mut main) = bridge.split();
//!
//! isr.on_event(UartEvent::ByteReceived(b'A')).unwrap();
//! let mut scratch = [0u8; 10];
//! assert_eq!(main.echo(&mut scratch).unwrap(), 1);
//! isr.on_event(UartEvent::TransferComplete).unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod bridge;
pub mod config;
pub mod error;
mod ring;
pub mod rx;
pub mod shared;
pub mod tx;

pub use bridge::{InterruptContext, MainContext, UartBridge, UartEvent};
pub use config::{BridgeConfig, OverflowPolicy};
pub use error::{Error, Result};
pub use ring::Chunk;
pub use rx::{RxConsumer, RxProducer, RxRingBuffer};
pub use tx::{AsyncTransmit, TxCompletion, TxProducer, TxRingBuffer, TxState};
