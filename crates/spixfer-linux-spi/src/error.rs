//! Error types for Linux SPI operations

use spixfer_core::Error as CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Linux SPI specific errors
#[derive(Debug, Error)]
pub enum LinuxSpiError {
    /// Failed to open device
    #[error("Failed to open SPI device {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to set SPI mode
    #[error("Failed to set SPI mode to {mode}: {source}")]
    SetModeFailed {
        mode: u8,
        #[source]
        source: std::io::Error,
    },

    /// SPI transfer failed
    #[error("Failed to transfer SPI message: {0}")]
    TransferFailed(#[source] std::io::Error),

    /// Transfer longer than the spidev buffer
    #[error("Transfer of {len} bytes exceeds spidev buffer size of {max} bytes")]
    TransferTooLarge { len: usize, max: usize },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Device not specified
    #[error("No SPI device specified")]
    NoDevice,
}

impl From<LinuxSpiError> for CoreError {
    fn from(e: LinuxSpiError) -> Self {
        match e {
            LinuxSpiError::TransferFailed(source) => CoreError::TransferFailed(source),
            LinuxSpiError::TransferTooLarge { len, max } => CoreError::TransferTooLarge { len, max },
            other => CoreError::Bus(other.to_string()),
        }
    }
}

/// Result type for Linux SPI operations
pub type Result<T> = std::result::Result<T, LinuxSpiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_is_not_a_transfer_failure() {
        let err: CoreError = LinuxSpiError::InvalidParameter("tx/rx length mismatch (2 != 1)".into()).into();
        match &err {
            CoreError::Bus(msg) => assert_eq!(msg, "Invalid parameter: tx/rx length mismatch (2 != 1)"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!err.to_string().contains("Failed to transfer SPI message"));
    }

    #[test]
    fn test_kernel_errors_stay_transfer_failures() {
        let err: CoreError =
            LinuxSpiError::TransferFailed(std::io::Error::from_raw_os_error(libc::ENOTTY)).into();
        assert!(matches!(err, CoreError::TransferFailed(_)));

        let err: CoreError = LinuxSpiError::TransferTooLarge { len: 8, max: 4 }.into();
        assert!(matches!(err, CoreError::TransferTooLarge { len: 8, max: 4 }));

        let err: CoreError = LinuxSpiError::NoDevice.into();
        assert!(matches!(err, CoreError::Bus(_)));
    }
}
