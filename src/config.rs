/*
 * @file config.rs
 * @brief Buffer policies and default sizes
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

pub const DEFAULT_RX_CAPACITY: usize = 2000;
pub const DEFAULT_TX_CAPACITY: usize = 3000;
pub const DEFAULT_ECHO_CHUNK: usize = 10;

/// What a buffer does when a write does not fit.
///
/// # Variants
/// * `Overwrite` - Write anyway; the oldest unread bytes are lost
/// * `Reject` - Refuse the write and report `Error::Overflow`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    #[default]
    Overwrite,
    Reject,
}

/// Per-direction policies for a [`crate::UartBridge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    pub rx_policy: OverflowPolicy,
    pub tx_policy: OverflowPolicy,
}

impl BridgeConfig {
    /// Configuration that rejects writes in both directions instead of overwriting.
    pub const fn strict() -> Self {
        Self {
            rx_policy: OverflowPolicy::Reject,
            tx_policy: OverflowPolicy::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_overwrites() {
        let config = BridgeConfig::default();
        assert_eq!(config.rx_policy, OverflowPolicy::Overwrite);
        assert_eq!(config.tx_policy, OverflowPolicy::Overwrite);
    }

    #[test]
    fn test_strict_rejects() {
        let config = BridgeConfig::strict();
        assert_eq!(config.rx_policy, OverflowPolicy::Reject);
        assert_eq!(config.tx_policy, OverflowPolicy::Reject);
    }
}
