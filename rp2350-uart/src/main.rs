/*
 * @file main.rs
 * @brief UART ring echo firmware entry point
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

#![no_std]
#![no_main]

mod app;
mod config;
mod globals;
mod hardware;
mod irq;
mod transmitter;
mod types;

use config::{RX_BUF_SIZE, TX_BUF_SIZE};
use cortex_m::singleton;
use defmt::*;
use defmt_rtt as _;
use hal::entry;
#[cfg(target_arch = "arm")]
use panic_probe as _;
#[cfg(rp2350)]
pub use rp235x_hal as hal;
use transmitter::FifoTransmitter;
use types::AppBridge;
use uart_ring::{BridgeConfig, UartBridge};

/// Boots the UART echo firmware and never returns.
///
/// # Details
/// Brings up the hardware, builds the bridge over static storage, hands the
/// interrupt half to the UART IRQ, and runs the main half forever.
///
/// # Returns
/// `!` because bare-metal firmware does not exit to a caller.
#[entry]
fn main() -> ! {
    info!("UART ring echo start");
    let mut runtime = hardware::build_runtime();
    let bridge = build_bridge();
    let (isr, mut ctx) = bridge.split();
    globals::install(isr);
    irq::enable_uart_irq();
    app::send_ready(&mut ctx);
    app::run(&mut runtime, &mut ctx);
}

/// Allocates ring storage and the bridge in static memory.
///
/// # Returns
/// A `'static` bridge, built exactly once.
fn build_bridge() -> &'static mut AppBridge {
    let rx_storage = unwrap!(singleton!(: [u8; RX_BUF_SIZE] = [0; RX_BUF_SIZE]));
    let tx_storage = unwrap!(singleton!(: [u8; TX_BUF_SIZE] = [0; TX_BUF_SIZE]));
    let bridge = unwrap!(UartBridge::new(
        rx_storage,
        tx_storage,
        FifoTransmitter::new(),
        BridgeConfig::default(),
    ));
    info!("rings ready: rx {} bytes, tx {} bytes", RX_BUF_SIZE, TX_BUF_SIZE);
    unwrap!(singleton!(: AppBridge = bridge))
}

/// Tell the Boot ROM about our application
#[unsafe(link_section = ".start_block")]
#[used]
#[cfg(rp2350)]
pub static IMAGE_DEF: hal::block::ImageDef = hal::block::ImageDef::secure_exe();

/// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [hal::binary_info::EntryAddr; 5] = [
    hal::binary_info::rp_cargo_bin_name!(),
    hal::binary_info::rp_cargo_version!(),
    hal::binary_info::rp_program_description!(c"UART Ring Echo"),
    hal::binary_info::rp_cargo_homepage_url!(),
    hal::binary_info::rp_program_build_attribute!(),
];
