//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use uart_ring::{AsyncTransmit, Chunk};

/// One `start_transmit` call as the hardware would have seen it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

/// Transmitter that records every run and panics on overlapping transfers.
#[derive(Debug, Default)]
pub struct RecordingTransmitter {
    outstanding: Cell<bool>,
    runs: RefCell<Vec<Run>>,
}

impl RecordingTransmitter {
    /// Marks the outstanding transfer as finished, as the hardware would.
    pub fn finish(&self) {
        assert!(self.outstanding.replace(false), "no transfer outstanding");
    }

    pub fn is_outstanding(&self) -> bool {
        self.outstanding.get()
    }

    pub fn runs(&self) -> Vec<Run> {
        self.runs.borrow().clone()
    }

    /// Every byte handed to hardware so far, in transfer order.
    pub fn sent(&self) -> Vec<u8> {
        self.runs
            .borrow()
            .iter()
            .flat_map(|run| run.bytes.iter().copied())
            .collect()
    }
}

impl<'a> AsyncTransmit<'a> for RecordingTransmitter {
    fn start_transmit(&self, chunk: Chunk<'a>) {
        assert!(
            !self.outstanding.replace(true),
            "transfer started while another was outstanding"
        );
        self.runs.borrow_mut().push(Run {
            offset: chunk.offset(),
            bytes: chunk.iter().collect(),
        });
    }
}
