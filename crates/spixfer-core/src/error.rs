//! Error types for spixfer-core

use thiserror::Error;

/// Errors raised while preparing or performing a transfer
#[derive(Debug, Error)]
pub enum Error {
    /// Payload token is longer than 512 hex characters
    #[error("Data to send exceeds maximum transfer size of 256 bytes ({len} hex characters given)")]
    PayloadTooLarge {
        /// Length of the token in characters
        len: usize,
    },

    /// Payload token does not describe a whole number of bytes
    #[error("Data to send has an odd number of hex characters ({len})")]
    OddPayloadLength {
        /// Length of the token in characters
        len: usize,
    },

    /// Non-hex character in a payload (strict mode only)
    #[error("Invalid hex digit {found:?} at position {position}")]
    InvalidHexDigit {
        /// Byte offset of the offending character
        position: usize,
        /// The offending character
        found: char,
    },

    /// Transfer is longer than the backend can move in one message
    #[error("Transfer of {len} bytes exceeds the bus limit of {max} bytes")]
    TransferTooLarge {
        /// Requested transfer length
        len: usize,
        /// Backend limit
        max: usize,
    },

    /// The backend reported a failed transfer
    #[error("Failed to transfer SPI message: {0}")]
    TransferFailed(#[source] std::io::Error),

    /// Backend error that is not a failed transfer (bad parameter, state)
    #[error("{0}")]
    Bus(String),
}

/// Result type for spixfer-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_error_message_is_verbatim() {
        let err = Error::Bus("Invalid parameter: tx/rx length mismatch (2 != 1)".into());
        assert_eq!(
            err.to_string(),
            "Invalid parameter: tx/rx length mismatch (2 != 1)"
        );
    }

    #[test]
    fn test_transfer_failed_message() {
        let err = Error::TransferFailed(std::io::Error::other("device busy"));
        assert_eq!(err.to_string(), "Failed to transfer SPI message: device busy");
    }
}
