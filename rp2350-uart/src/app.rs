/*
 * @file app.rs
 * @brief Main-loop UART echo over the ring buffers
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

use crate::config::{ECHO_CHUNK, MSG_OVERFLOW, READY_MSG};
use crate::hardware::Runtime;
use crate::types::AppMainContext;
use core::hint::spin_loop;
use defmt::{debug, info, warn};
use embedded_hal::digital::OutputPin;

/// Queues the ready banner so the host knows the MCU is alive.
///
/// # Parameters
/// * `ctx` - Main-loop half of the bridge.
pub fn send_ready(ctx: &mut AppMainContext) {
    if let Err(err) = ctx.enqueue(READY_MSG) {
        warn!("ready banner not queued: {}", err);
    }
}

/// Runs the infinite echo loop.
///
/// # Parameters
/// * `runtime` - Peripherals kept alive by the loop.
/// * `ctx` - Main-loop half of the bridge.
///
/// # Returns
/// `!` because bare-metal firmware never exits.
pub fn run(runtime: &mut Runtime, ctx: &mut AppMainContext) -> ! {
    let mut scratch = [0u8; ECHO_CHUNK];
    info!("echo loop running, {} byte batches", ECHO_CHUNK);
    loop {
        echo_pending(ctx, &mut scratch);
        report_overflow(runtime, ctx);
        spin_loop();
    }
}

/// Echoes one batch of received bytes back out.
///
/// # Parameters
/// * `ctx` - Main-loop half of the bridge.
/// * `scratch` - Batch buffer reused across passes.
fn echo_pending(ctx: &mut AppMainContext, scratch: &mut [u8]) {
    match ctx.echo(scratch) {
        Ok(0) => {}
        Ok(count) => debug!("echoed {} bytes", count),
        Err(err) => warn!("echo dropped: {}", err),
    }
}

/// Lights the LED and notifies the host if received bytes were lost.
///
/// # Parameters
/// * `runtime` - Provides the indicator LED.
/// * `ctx` - Main-loop half of the bridge.
fn report_overflow(runtime: &mut Runtime, ctx: &mut AppMainContext) {
    if ctx.take_overflow() {
        warn!("RX ring overflowed, oldest bytes were lost");
        runtime.led.set_high().ok();
        ctx.enqueue(MSG_OVERFLOW).ok();
    }
}
