/*
 * @file irq.rs
 * @brief UART interrupt handler feeding the ring buffers
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

use crate::globals;
use crate::hal;
use crate::hal::pac::interrupt;
use crate::hardware::uart_regs;
use crate::types::AppIsrContext;
use defmt::warn;
use uart_ring::{Error, UartEvent};

/// UART0 interrupt handler.
///
/// # Details
/// Moves every byte waiting in the RX FIFO into the receive ring, then tops
/// up the TX FIFO and reports a completed chunk to the transmit ring, which
/// may start the next one.
///
/// # Safety
/// Must be registered exactly once by the startup code.
#[interrupt]
unsafe fn UART0_IRQ() {
    let uart = uart_regs();
    globals::with_irq_context(|ctx| {
        drain_fifo(uart, ctx);
        service_tx(ctx);
    });
    clear_interrupts(uart);
}

/// Enables the UART0 interrupt at the NVIC level when supported.
pub fn enable_uart_irq() {
    unmask_uart_irq();
}

/// Unmasks the UART0 interrupt in the NVIC on ARM targets.
#[cfg(target_arch = "arm")]
fn unmask_uart_irq() {
    unsafe {
        cortex_m::peripheral::NVIC::unmask(hal::pac::Interrupt::UART0_IRQ);
    }
}

/// No interrupt controller to configure on non-ARM hosts.
#[cfg(not(target_arch = "arm"))]
fn unmask_uart_irq() {}

/// Delivers pending RX bytes to the receive ring one event at a time.
///
/// # Parameters
/// * `uart` - Pointer to the UART register block.
/// * `ctx` - Interrupt-side bridge context.
fn drain_fifo(uart: &hal::pac::uart0::RegisterBlock, ctx: &mut AppIsrContext) {
    while uart.uartfr().read().rxfe().bit_is_clear() {
        let byte = uart.uartdr().read().data().bits();
        report(ctx.on_event(UartEvent::ByteReceived(byte)));
    }
}

/// Advances the outstanding transmit chunk and signals its completion.
///
/// # Parameters
/// * `ctx` - Interrupt-side bridge context.
fn service_tx(ctx: &mut AppIsrContext) {
    if ctx.transmitter().service() {
        report(ctx.on_event(UartEvent::TransferComplete));
    }
}

/// Logs a rejected event; the ring has already recorded it.
fn report(result: uart_ring::Result<()>) {
    match result {
        Ok(()) | Err(Error::Overflow { .. }) => {}
        Err(err) => warn!("UART event failed: {}", err),
    }
}

/// Clears the interrupt status bits that triggered this handler.
///
/// # Parameters
/// * `uart` - Pointer to the UART register block.
fn clear_interrupts(uart: &hal::pac::uart0::RegisterBlock) {
    uart.uarticr().write(|w| {
        w.rxic().bit(true);
        w.rtic().bit(true);
        w.txic().bit(true);
        w
    });
}
