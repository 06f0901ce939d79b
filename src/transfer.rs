//! The transfer loop
//!
//! Walks the payload/delay stream, performs one transfer per payload on any
//! [`SpiBus`] and dumps both directions:
//!
//! ```text
//! <MOSI> 0A 0B
//! <MISO> 0A 0B
//!
//! ```

use spixfer_core::hex::{decode_payload, format_dump};
use spixfer_core::{ArgStream, SpiBus, Transfer};
use std::io::Write;
use thiserror::Error;

/// Errors that end the transfer loop
#[derive(Debug, Error)]
pub enum RunError {
    /// Payload rejected or transfer failed
    #[error(transparent)]
    Spi(#[from] spixfer_core::Error),

    /// Could not write the dump
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Settings shared by every transfer in one run
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Clock speed handed to the bus for each transfer
    pub speed_hz: u32,
    /// Strict payload and delay parsing
    pub strict: bool,
}

/// Run every step of `tokens` on `bus`, writing the dump to `out`
///
/// Stops at the first error; blocks already written for earlier transfers
/// stay written. Returns the number of completed transfers.
pub fn run_transfers<B, W, S>(
    bus: &mut B,
    out: &mut W,
    tokens: &[S],
    options: RunOptions,
) -> Result<usize, RunError>
where
    B: SpiBus + ?Sized,
    W: Write + ?Sized,
    S: AsRef<str>,
{
    let mut completed = 0;

    for step in ArgStream::new(tokens, options.strict) {
        let payload = decode_payload(step.payload, options.strict)?;
        let mut xfer = Transfer::new(payload, options.speed_hz);

        log::debug!(
            "Transfer {}: {} bytes at {} Hz",
            completed,
            xfer.len(),
            xfer.speed_hz
        );
        bus.transfer(&mut xfer)?;

        if let Some(ns) = step.delay_ns {
            log::debug!("Delaying {} ns", ns);
            bus.delay_ns(ns);
        }

        writeln!(out, "<MOSI> {}", format_dump(&xfer.tx))?;
        writeln!(out, "<MISO> {}", format_dump(&xfer.rx))?;
        writeln!(out)?;
        completed += 1;
    }

    out.flush()?;
    Ok(completed)
}
