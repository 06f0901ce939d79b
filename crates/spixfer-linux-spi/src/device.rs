//! Linux SPI device implementation
//!
//! This module provides the `LinuxSpi` struct that implements the `SpiBus`
//! trait using Linux's spidev interface.

use crate::error::{LinuxSpiError, Result};

use spixfer_core::error::Result as CoreResult;
use spixfer_core::hex::encode_hex;
use spixfer_core::{SpiBus, Transfer, BITS_PER_WORD};

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path to kernel spidev buffer size parameter
const BUF_SIZE_SYSFS: &str = "/sys/module/spidev/parameters/bufsiz";

/// Highest SPI mode number (CPOL=1, CPHA=1)
pub const MAX_MODE: u8 = 3;

/// Linux spidev ioctl constants
mod ioctl {
    use nix::{ioctl_write_buf, ioctl_write_ptr};

    // SPI ioctl magic number
    const SPI_IOC_MAGIC: u8 = b'k';

    // SPI ioctl type numbers
    const SPI_IOC_TYPE_MESSAGE: u8 = 0;
    const SPI_IOC_TYPE_MODE: u8 = 1;

    ioctl_write_ptr!(spi_ioc_wr_mode, SPI_IOC_MAGIC, SPI_IOC_TYPE_MODE, u8);

    // SPI_IOC_MESSAGE(n) = _IOW(SPI_IOC_MAGIC, 0, char[n * sizeof(struct spi_ioc_transfer)])
    ioctl_write_buf!(
        spi_ioc_message,
        SPI_IOC_MAGIC,
        SPI_IOC_TYPE_MESSAGE,
        super::SpiIocTransfer
    );
}

/// SPI transfer structure for ioctl
/// This must match the kernel's struct spi_ioc_transfer layout
#[repr(C)]
#[derive(Debug, Default, Clone)]
struct SpiIocTransfer {
    tx_buf: u64,          // __u64 tx_buf
    rx_buf: u64,          // __u64 rx_buf
    len: u32,             // __u32 len
    speed_hz: u32,        // __u32 speed_hz
    delay_usecs: u16,     // __u16 delay_usecs
    bits_per_word: u8,    // __u8 bits_per_word
    cs_change: u8,        // __u8 cs_change
    tx_nbits: u8,         // __u8 tx_nbits
    rx_nbits: u8,         // __u8 rx_nbits
    word_delay_usecs: u8, // __u8 word_delay_usecs
    _pad: u8,             // padding
}

/// Configuration for opening a Linux SPI device
#[derive(Debug, Clone, Default)]
pub struct LinuxSpiConfig {
    /// Device path (e.g., "/dev/spidev0.0")
    pub device: PathBuf,
    /// SPI mode (0-`MAX_MODE`) to apply after opening; `None` keeps the current mode
    pub mode: Option<u8>,
}

impl LinuxSpiConfig {
    /// Create a new configuration with the given device path
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    /// Set the SPI mode (0-`MAX_MODE`)
    pub fn with_mode(mut self, mode: u8) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Linux SPI bus using spidev interface
///
/// The device file is closed when this value is dropped.
pub struct LinuxSpi {
    /// File handle for spidev device
    file: File,
    /// Maximum kernel buffer size
    max_kernel_buf_size: usize,
}

impl LinuxSpi {
    /// Open a Linux SPI device with the given configuration
    pub fn open(config: &LinuxSpiConfig) -> Result<Self> {
        if config.device.as_os_str().is_empty() {
            return Err(LinuxSpiError::NoDevice);
        }

        log::debug!("linux_spi: Opening device {}", config.device.display());

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.device)
            .map_err(|e| LinuxSpiError::OpenFailed {
                path: config.device.clone(),
                source: e,
            })?;

        if let Some(mode) = config.mode {
            if mode > MAX_MODE {
                return Err(LinuxSpiError::InvalidParameter(format!(
                    "Invalid SPI mode: {} (must be 0-{})",
                    mode, MAX_MODE
                )));
            }
            let fd = file.as_raw_fd();
            unsafe {
                ioctl::spi_ioc_wr_mode(fd, &mode).map_err(|e| LinuxSpiError::SetModeFailed {
                    mode,
                    source: std::io::Error::from_raw_os_error(e as i32),
                })?;
            }
            log::debug!("linux_spi: Set mode {}", mode);
        }

        let max_kernel_buf_size = get_max_kernel_buf_size();
        log::info!(
            "linux_spi: Opened {} (max transfer {} bytes)",
            config.device.display(),
            max_kernel_buf_size
        );

        Ok(Self {
            file,
            max_kernel_buf_size,
        })
    }

    /// Open a device without changing its mode
    pub fn open_device(device: impl AsRef<Path>) -> Result<Self> {
        Self::open(&LinuxSpiConfig::new(device.as_ref()))
    }

    /// Perform one full-duplex transfer with SPI_IOC_MESSAGE(1)
    ///
    /// The kernel descriptor borrows `tx` and `rx` only for this call.
    fn spi_transfer(&mut self, tx: &[u8], rx: &mut [u8], speed_hz: u32) -> Result<()> {
        if tx.len() != rx.len() {
            return Err(LinuxSpiError::InvalidParameter(format!(
                "tx/rx length mismatch ({} != {})",
                tx.len(),
                rx.len()
            )));
        }
        if tx.len() > self.max_kernel_buf_size {
            return Err(LinuxSpiError::TransferTooLarge {
                len: tx.len(),
                max: self.max_kernel_buf_size,
            });
        }

        let transfer = SpiIocTransfer {
            tx_buf: tx.as_ptr() as u64,
            rx_buf: rx.as_mut_ptr() as u64,
            len: tx.len() as u32,
            speed_hz,
            delay_usecs: 0,
            bits_per_word: BITS_PER_WORD,
            ..Default::default()
        };

        let fd = self.file.as_raw_fd();
        unsafe {
            ioctl::spi_ioc_message(fd, std::slice::from_ref(&transfer)).map_err(|e| {
                LinuxSpiError::TransferFailed(std::io::Error::from_raw_os_error(e as i32))
            })?;
        }

        Ok(())
    }
}

impl SpiBus for LinuxSpi {
    fn transfer(&mut self, xfer: &mut Transfer) -> CoreResult<()> {
        let speed_hz = xfer.speed_hz;
        let (tx, rx) = xfer.buffers_mut();
        log::trace!("linux_spi: tx {} @ {} Hz", encode_hex(tx), speed_hz);
        self.spi_transfer(tx, rx, speed_hz)?;
        log::trace!("linux_spi: rx {}", encode_hex(rx));
        Ok(())
    }

    fn delay_ns(&mut self, ns: u64) {
        std::thread::sleep(Duration::from_nanos(ns));
    }
}

/// Read the maximum kernel buffer size from sysfs, or use page size as fallback
fn get_max_kernel_buf_size() -> usize {
    if let Ok(content) = std::fs::read_to_string(BUF_SIZE_SYSFS) {
        if let Ok(size) = content.trim().parse::<usize>() {
            if size > 0 {
                log::debug!("linux_spi: Using buffer size {} from sysfs", size);
                return size;
            }
        }
        log::warn!("linux_spi: Invalid buffer size in {}", BUF_SIZE_SYSFS);
    } else {
        log::debug!("linux_spi: Cannot read {}, using page size", BUF_SIZE_SYSFS);
    }

    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;
    log::debug!("linux_spi: Using page size {} as buffer size", page_size);
    page_size
}
