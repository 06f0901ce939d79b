//! spixfer-core - Backend-neutral pieces of the spixfer transfer tool
//!
//! This crate holds everything that does not touch a real SPI controller:
//!
//! - [`bus::SpiBus`], the trait every backend (Linux spidev, dummy) implements
//! - [`bus::Transfer`], one full-duplex transfer request
//! - [`speed`], the permissive clock speed parser (`4.1M`, `500K`, `1e6`)
//! - [`hex`], the payload codec and the MOSI/MISO dump format
//! - [`args`], the walker over the `<payload> [<delay>] <payload> ...` stream
//!
//! # Example
//!
//! ```
//! use spixfer_core::{hex, speed, Transfer};
//!
//! let speed_hz = speed::to_speed_hz(speed::parse_clock_speed("1.5M"));
//! assert_eq!(speed_hz, 1_500_000);
//!
//! let payload = hex::decode_payload("0A1B2C", false)?;
//! let xfer = Transfer::new(payload, speed_hz);
//! assert_eq!(xfer.tx.as_slice(), &[0x0A, 0x1B, 0x2C]);
//! assert_eq!(xfer.rx.as_slice(), &[0, 0, 0]);
//! # Ok::<(), spixfer_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod args;
pub mod bus;
pub mod error;
pub mod hex;
pub mod speed;

pub use args::{ArgStream, Step};
pub use bus::{Payload, SpiBus, Transfer, BITS_PER_WORD, MAX_TRANSFER_SIZE};
pub use error::{Error, Result};
