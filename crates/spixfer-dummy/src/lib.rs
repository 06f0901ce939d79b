//! spixfer-dummy - In-memory SPI bus for testing
//!
//! This crate provides a dummy SPI bus that answers transfers from memory.
//! It's useful for testing the transfer loop without real hardware.

use spixfer_core::error::{Error, Result};
use spixfer_core::{SpiBus, Transfer};

/// What the dummy device shifts back on MISO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DummyResponse {
    /// Echo every transmitted byte, like MOSI wired to MISO
    #[default]
    Loopback,
    /// Answer every byte with the same value (0xFF for a floating bus)
    Fill(u8),
}

/// Configuration for the dummy bus
#[derive(Debug, Clone, Default)]
pub struct DummyConfig {
    /// Response pattern
    pub response: DummyResponse,
    /// Fail the transfer with this 0-based index
    pub fail_on: Option<usize>,
}

impl DummyConfig {
    /// Loopback device that never fails
    pub fn loopback() -> Self {
        Self::default()
    }

    /// Device answering every byte with `value`
    pub fn fill(value: u8) -> Self {
        Self {
            response: DummyResponse::Fill(value),
            ..Default::default()
        }
    }

    /// Make the transfer with index `index` fail
    pub fn with_failure_on(mut self, index: usize) -> Self {
        self.fail_on = Some(index);
        self
    }
}

/// A transfer as seen by the dummy device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransfer {
    /// Bytes received on MOSI
    pub tx: Vec<u8>,
    /// Requested clock speed
    pub speed_hz: u32,
}

/// Dummy SPI bus
///
/// Records every attempted transfer and every requested delay.
#[derive(Debug, Default)]
pub struct DummySpi {
    config: DummyConfig,
    transfers: Vec<RecordedTransfer>,
    delays: Vec<u64>,
}

impl DummySpi {
    /// Create a new dummy bus with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        Self {
            config,
            transfers: Vec::new(),
            delays: Vec::new(),
        }
    }

    /// Transfers attempted so far, failed ones included
    pub fn transfers(&self) -> &[RecordedTransfer] {
        &self.transfers
    }

    /// Delays requested so far, in nanoseconds
    pub fn delays(&self) -> &[u64] {
        &self.delays
    }
}

impl SpiBus for DummySpi {
    fn transfer(&mut self, xfer: &mut Transfer) -> Result<()> {
        let index = self.transfers.len();
        self.transfers.push(RecordedTransfer {
            tx: xfer.tx.to_vec(),
            speed_hz: xfer.speed_hz,
        });

        if self.config.fail_on == Some(index) {
            log::debug!("dummy: Failing transfer {}", index);
            return Err(Error::TransferFailed(std::io::Error::other(
                "injected transfer failure",
            )));
        }

        let (tx, rx) = xfer.buffers_mut();
        match self.config.response {
            DummyResponse::Loopback => rx.copy_from_slice(tx),
            DummyResponse::Fill(value) => rx.fill(value),
        }
        Ok(())
    }

    fn delay_ns(&mut self, ns: u64) {
        // No delay needed for in-memory transfers
        self.delays.push(ns);
    }
}
