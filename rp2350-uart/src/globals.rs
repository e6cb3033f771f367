/*
 * @file globals.rs
 * @brief Interrupt-side bridge context shared with the UART IRQ
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

use crate::types::AppIsrContext;
use core::cell::RefCell;
use critical_section::Mutex;

static IRQ_CONTEXT: Mutex<RefCell<Option<AppIsrContext>>> = Mutex::new(RefCell::new(None));

/// Hands the interrupt-side half of the bridge to the UART interrupt.
///
/// # Parameters
/// * `context` - Interrupt context split off the bridge at startup.
pub fn install(context: AppIsrContext) {
    critical_section::with(|cs| IRQ_CONTEXT.borrow_ref_mut(cs).replace(context));
}

/// Runs `f` against the installed interrupt context.
///
/// # Parameters
/// * `f` - Work to perform with exclusive access to the context.
///
/// # Returns
/// `Some` result, or `None` if the interrupt fired before [`install`].
pub fn with_irq_context<R>(f: impl FnOnce(&mut AppIsrContext) -> R) -> Option<R> {
    critical_section::with(|cs| IRQ_CONTEXT.borrow_ref_mut(cs).as_mut().map(f))
}
