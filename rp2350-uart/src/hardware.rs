/*
 * @file hardware.rs
 * @brief Clock, GPIO, and UART bring-up for the RP2350
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

use crate::config;
use crate::hal::{self, Clock};
use crate::types::{AppUart, AppUartPins, LedPin};
use embedded_hal::digital::OutputPin;
use fugit::RateExtU32;
use hal::gpio::Pins;
use hal::uart::{DataBits, FifoWatermark, StopBits, UartConfig, UartPeripheral};

/// Peripherals owned by the main loop once the bridge is running.
///
/// # Details
/// The UART is kept alive here; after bring-up all traffic goes through the
/// ring buffers and the UART0 interrupt.
pub struct Runtime {
    pub uart: AppUart,
    pub led: LedPin,
}

/// Consumes the PAC and constructs the runtime peripherals.
///
/// # Returns
/// A [`Runtime`] with clocks running, the LED off, and UART0 enabled with
/// its receive interrupt unmasked at the peripheral.
pub fn build_runtime() -> Runtime {
    let mut pac = take_peripherals();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let clocks = init_system_clocks(
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    );
    let sio = hal::Sio::new(pac.SIO);
    let pins = Pins::new(pac.IO_BANK0, pac.PADS_BANK0, sio.gpio_bank0, &mut pac.RESETS);
    let mut led = pins.gpio16.into_push_pull_output();
    led.set_low().ok();
    let uart_pins = (
        pins.gpio0.into_function::<hal::gpio::FunctionUart>(),
        pins.gpio1.into_function::<hal::gpio::FunctionUart>(),
    );
    let uart = configure_uart(pac.UART0, &mut pac.RESETS, &clocks, uart_pins);
    Runtime { uart, led }
}

/// Returns a shared reference to the UART0 register block.
///
/// # Details
/// The interrupt handler and the transmitter drive the FIFOs directly;
/// this helper confines the raw-pointer dereference to one place.
pub fn uart_regs() -> &'static hal::pac::uart0::RegisterBlock {
    unsafe { &*hal::pac::UART0::ptr() }
}

/// Takes ownership of the RP235x PAC peripherals.
fn take_peripherals() -> hal::pac::Peripherals {
    hal::pac::Peripherals::take().unwrap()
}

/// Sets up the system clocks from the external crystal.
///
/// # Parameters
/// * `xosc` - Crystal oscillator peripheral.
/// * `clocks` - CLOCKS block handle.
/// * `pll_sys` - System PLL peripheral.
/// * `pll_usb` - USB PLL peripheral.
/// * `resets` - Reset controller used during bring-up.
/// * `watchdog` - Watchdog used by the clock init routine.
///
/// # Returns
/// A configured [`hal::clocks::ClocksManager`].
fn init_system_clocks(
    xosc: hal::pac::XOSC,
    clocks: hal::pac::CLOCKS,
    pll_sys: hal::pac::PLL_SYS,
    pll_usb: hal::pac::PLL_USB,
    resets: &mut hal::pac::RESETS,
    watchdog: &mut hal::Watchdog,
) -> hal::clocks::ClocksManager {
    hal::clocks::init_clocks_and_plls(
        config::XTAL_FREQ_HZ,
        xosc,
        clocks,
        pll_sys,
        pll_usb,
        resets,
        watchdog,
    )
    .unwrap()
}

/// Enables UART0 at 8N1 with both FIFOs and the receive interrupt.
///
/// # Details
/// The TX interrupt stays masked here; the transmitter unmasks it only
/// while a chunk is outstanding.
///
/// # Parameters
/// * `uart` - Raw UART0 peripheral.
/// * `resets` - Reset controller for enabling the block.
/// * `clocks` - Clock manager that yields the peripheral clock rate.
/// * `pins` - UART TX/RX pin pair already switched into UART function.
///
/// # Returns
/// A fully configured [`AppUart`].
fn configure_uart(
    uart: hal::pac::UART0,
    resets: &mut hal::pac::RESETS,
    clocks: &hal::clocks::ClocksManager,
    pins: AppUartPins,
) -> AppUart {
    let mut uart = UartPeripheral::new(uart, pins, resets)
        .enable(
            UartConfig::new(config::UART_BAUD.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();
    uart.set_fifos(true);
    uart.set_rx_watermark(FifoWatermark::Bytes4);
    uart.set_tx_watermark(FifoWatermark::Bytes4);
    uart.enable_rx_interrupt();
    uart
}
