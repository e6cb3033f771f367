/*
 * @file types.rs
 * @brief Concrete peripheral types used by the firmware
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

use crate::hal;
use crate::transmitter::FifoTransmitter;
use hal::gpio::bank0::{Gpio0, Gpio1, Gpio16};
use hal::gpio::{FunctionSioOutput, FunctionUart, Pin, PullDown};
use hal::uart::{Enabled, UartPeripheral};
use uart_ring::{InterruptContext, MainContext, UartBridge};

/// UART0 TX/RX pins on GPIO0/GPIO1.
pub type AppUartPins = (
    Pin<Gpio0, FunctionUart, PullDown>,
    Pin<Gpio1, FunctionUart, PullDown>,
);

/// Enabled UART0 peripheral.
pub type AppUart = UartPeripheral<Enabled, hal::pac::UART0, AppUartPins>;

/// Overflow indicator LED on GPIO16.
pub type LedPin = Pin<Gpio16, FunctionSioOutput, PullDown>;

/// Bridge over the statically allocated ring storage.
pub type AppBridge = UartBridge<'static, FifoTransmitter>;

/// Interrupt-side half of the bridge.
pub type AppIsrContext = InterruptContext<'static, 'static, FifoTransmitter>;

/// Main-loop half of the bridge.
pub type AppMainContext = MainContext<'static, 'static, FifoTransmitter>;
