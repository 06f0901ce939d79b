//! spixfer-linux-spi - Linux spidev support
//!
//! This crate lets spixfer drive SPI controllers through the Linux spidev
//! character devices at `/dev/spidevX.Y`, where X is the bus number and Y is
//! the chip select.
//!
//! Every transfer is a single `SPI_IOC_MESSAGE(1)` ioctl: full duplex, 8 bits
//! per word, no inter-transfer delay, with the clock speed carried in the
//! transfer itself rather than set on the device.
//!
//! # Example
//!
//! ```no_run
//! use spixfer_core::{hex, SpiBus, Transfer};
//! use spixfer_linux_spi::{LinuxSpi, LinuxSpiConfig};
//!
//! let config = LinuxSpiConfig::new("/dev/spidev0.0").with_mode(0);
//! let mut spi = LinuxSpi::open(&config)?;
//!
//! let mut xfer = Transfer::new(hex::decode_payload("9F000000", true)?, 1_000_000);
//! spi.transfer(&mut xfer)?;
//! println!("{}", hex::format_dump(&xfer.rx));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with spidev support enabled (`CONFIG_SPI_SPIDEV`)
//! - Read/write access to `/dev/spidevX.Y` device
//! - May require adding user to `spi` group or using udev rules

pub mod device;
pub mod error;

// Re-exports
pub use device::{LinuxSpi, LinuxSpiConfig, MAX_MODE};
pub use error::{LinuxSpiError, Result};
