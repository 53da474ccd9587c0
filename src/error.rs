//! Error types for the FINS bulk-read client.

use std::io;
use thiserror::Error;

/// Result type alias for FINS operations.
pub type Result<T> = std::result::Result<T, FinsError>;

/// Errors that can occur while reading PLC memory.
///
/// The block-read loop checks its preconditions in a fixed order before any
/// I/O happens: `NotInitialized`, `NoReadAddress`, `NoDataBlock`,
/// `NotConnected`, then address resolution. Transport and PLC errors are
/// propagated unchanged; the read loop adds no interpretation of its own.
#[derive(Debug, Error)]
pub enum FinsError {
    /// The client has no memory area table loaded.
    #[error("client not initialized: no memory area table loaded")]
    NotInitialized,

    /// The read address string is empty.
    #[error("no read address given")]
    NoReadAddress,

    /// The destination buffer cannot hold the requested number of values.
    #[error("no data block: destination cannot hold the requested values")]
    NoDataBlock,

    /// The client is not connected to a PLC.
    #[error("not connected")]
    NotConnected,

    /// The read address string could not be parsed.
    #[error("invalid read address")]
    InvalidReadAddress,

    /// The address does not resolve to a readable memory area.
    #[error("invalid read area")]
    InvalidReadArea,

    /// Invalid memory addressing.
    #[error("invalid addressing: {reason}")]
    InvalidAddressing {
        /// Description of the addressing error.
        reason: String,
    },

    /// Invalid parameter provided.
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// Reply data length does not match the requested chunk.
    #[error("reply body too short: expected {expected} data bytes, got {actual}")]
    BodyTooShort {
        /// Data byte count the requested chunk implies.
        expected: usize,
        /// Data byte count actually received.
        actual: usize,
    },

    /// Error returned by the PLC with main and sub codes.
    #[error("PLC error: main code 0x{main_code:02X}, sub code 0x{sub_code:02X}")]
    PlcError {
        /// Main error code from the PLC response.
        main_code: u8,
        /// Sub error code from the PLC response.
        sub_code: u8,
    },

    /// Invalid response received from the PLC.
    #[error("invalid response: {reason}")]
    InvalidResponse {
        /// Description of the response error.
        reason: String,
    },

    /// Service ID mismatch between request and response.
    #[error("SID mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    SidMismatch {
        /// Expected SID value.
        expected: u8,
        /// Received SID value.
        received: u8,
    },

    /// Communication timeout.
    #[error("communication timeout")]
    Timeout,

    /// I/O error during communication.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FinsError {
    /// Creates a new `InvalidAddressing` error.
    pub fn invalid_addressing(reason: impl Into<String>) -> Self {
        Self::InvalidAddressing {
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidParameter` error.
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `BodyTooShort` error.
    pub fn body_too_short(expected: usize, actual: usize) -> Self {
        Self::BodyTooShort { expected, actual }
    }

    /// Creates a new `PlcError` from main and sub codes.
    pub fn plc_error(main_code: u8, sub_code: u8) -> Self {
        Self::PlcError {
            main_code,
            sub_code,
        }
    }

    /// Creates a new `InvalidResponse` error.
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Creates a new `SidMismatch` error.
    pub fn sid_mismatch(expected: u8, received: u8) -> Self {
        Self::SidMismatch { expected, received }
    }
}
