/*
 * @file error.rs
 * @brief Error type for the UART ring buffers
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

use thiserror::Error;

/// Conditions reported by the ring buffers.
///
/// # Details
/// None of these are fatal. With the default overwrite policy the only
/// variant a caller ever sees outside construction is `TransferFailed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The write would not fit in the free space of a rejecting buffer.
    #[error("ring buffer overflow: {requested} bytes requested, {available} free")]
    Overflow { requested: usize, available: usize },
    /// The platform reported that an asynchronous transfer did not complete.
    #[error("asynchronous transfer failed")]
    TransferFailed,
    /// A ring buffer was handed a zero-length storage region.
    #[error("ring buffer storage must not be empty")]
    EmptyStorage,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_message() {
        let err = Error::Overflow {
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "ring buffer overflow: 5 bytes requested, 2 free"
        );
    }

    #[test]
    fn test_transfer_failed_message() {
        assert_eq!(
            Error::TransferFailed.to_string(),
            "asynchronous transfer failed"
        );
    }
}
