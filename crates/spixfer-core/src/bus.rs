//! SPI bus trait and transfer request
//!
//! A [`Transfer`] owns both of its buffers. Backends borrow them only for the
//! duration of [`SpiBus::transfer`], so no kernel descriptor or raw pointer
//! outlives a single call.

use crate::error::Result;

/// Maximum number of bytes in one transfer
pub const MAX_TRANSFER_SIZE: usize = 256;

/// Word size used for every transfer
pub const BITS_PER_WORD: u8 = 8;

/// Fixed-capacity byte buffer holding one direction of a transfer
pub type Payload = heapless::Vec<u8, MAX_TRANSFER_SIZE>;

/// One full-duplex SPI transfer
///
/// `tx` and `rx` always have the same length: the number of bytes clocked
/// out is the number of bytes clocked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Bytes shifted out on MOSI
    pub tx: Payload,
    /// Bytes shifted in on MISO, zeroed before the transfer
    pub rx: Payload,
    /// Clock speed for this transfer in Hz
    pub speed_hz: u32,
}

impl Transfer {
    /// Create a transfer for `tx` with a zeroed receive buffer of equal length
    pub fn new(tx: Payload, speed_hz: u32) -> Self {
        let mut rx = tx.clone();
        rx.iter_mut().for_each(|b| *b = 0);
        Self { tx, rx, speed_hz }
    }

    /// Number of bytes in each direction
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    /// Whether the transfer moves no bytes at all
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }

    /// Split into the transmit slice and the mutable receive slice
    pub fn buffers_mut(&mut self) -> (&[u8], &mut [u8]) {
        (self.tx.as_slice(), self.rx.as_mut_slice())
    }
}

/// An SPI controller that can perform full-duplex transfers
///
/// Implementations block until the transfer has completed.
pub trait SpiBus {
    /// Clock `xfer.tx` out and fill `xfer.rx` with what was clocked in
    fn transfer(&mut self, xfer: &mut Transfer) -> Result<()>;

    /// Wait between transfers
    ///
    /// Best-effort; an interrupted wait is not resumed.
    fn delay_ns(&mut self, ns: u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroes_receive_buffer() {
        let tx = Payload::from_slice(&[0xAA, 0xBB, 0xCC]).unwrap();
        let xfer = Transfer::new(tx, 1_000_000);
        assert_eq!(xfer.len(), 3);
        assert_eq!(xfer.rx.as_slice(), &[0, 0, 0]);
        assert_eq!(xfer.speed_hz, 1_000_000);
    }

    #[test]
    fn test_empty_transfer() {
        let xfer = Transfer::new(Payload::new(), 500_000);
        assert!(xfer.is_empty());
        assert!(xfer.rx.is_empty());
    }

    #[test]
    fn test_buffers_mut() {
        let tx = Payload::from_slice(&[1, 2]).unwrap();
        let mut xfer = Transfer::new(tx, 0);
        let (tx, rx) = xfer.buffers_mut();
        rx.copy_from_slice(tx);
        assert_eq!(xfer.rx.as_slice(), &[1, 2]);
    }
}
