//! FINS command framing for block reads.
//!
//! A block read is carried by the Memory Area Read command (function code
//! pair 01/01). Its body is six bytes: the area code, the 16-bit wire word
//! address, a bit-offset byte that is always zero for word access, and the
//! 16-bit transfer unit count. One [`BlockReadCommand`] covers one chunk of
//! a larger read; the chunk loop in [`Client`](crate::Client) issues as many
//! as the requested count needs.

use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, NodeAddress, FINS_HEADER_SIZE};

/// Memory Area Read command code (MRC).
pub(crate) const MRC_MEMORY_READ: u8 = 0x01;
/// Memory Area Read command sub-code (SRC).
pub(crate) const SRC_MEMORY_READ: u8 = 0x01;

/// Maximum number of 16-bit transfer units one read request may carry.
pub const MAX_WORDS_PER_COMMAND: u16 = 999;

/// One chunk's worth of a block read request.
///
/// # Example
///
/// ```
/// use omron_fins_bulk::{BlockReadCommand, NodeAddress};
///
/// let cmd = BlockReadCommand::new(
///     NodeAddress::new(0, 10, 0),
///     NodeAddress::new(0, 1, 0),
///     0x01,
///     0x82, // DM area
///     100,
///     10,
/// ).unwrap();
/// let bytes = cmd.to_bytes();
/// // bytes can now be sent over UDP
/// ```
#[derive(Debug, Clone)]
pub struct BlockReadCommand {
    header: FinsHeader,
    area_code: u8,
    wire_address: u32,
    units: u16,
}

impl BlockReadCommand {
    /// Creates a new block read command.
    ///
    /// # Arguments
    ///
    /// * `destination` - Destination node address
    /// * `source` - Source node address
    /// * `sid` - Service ID for request/response matching
    /// * `area_code` - FINS word-access code of the memory area
    /// * `wire_address` - Starting wire word address
    /// * `units` - Number of 16-bit transfer units (1-999)
    ///
    /// # Errors
    ///
    /// Returns an error if `units` is 0 or exceeds [`MAX_WORDS_PER_COMMAND`],
    /// or if `wire_address` does not fit the 16-bit wire address space.
    pub fn new(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        area_code: u8,
        wire_address: u32,
        units: u16,
    ) -> Result<Self> {
        if units == 0 {
            return Err(FinsError::invalid_parameter(
                "units",
                "must be greater than 0",
            ));
        }
        if units > MAX_WORDS_PER_COMMAND {
            return Err(FinsError::invalid_parameter(
                "units",
                format!("must not exceed {}", MAX_WORDS_PER_COMMAND),
            ));
        }
        if wire_address > 0xFFFF {
            return Err(FinsError::invalid_parameter(
                "wire_address",
                "exceeds the 16-bit wire address space",
            ));
        }

        Ok(Self {
            header: FinsHeader::new_command(destination, source, sid),
            area_code,
            wire_address,
            units,
        })
    }

    /// Returns the service ID.
    pub fn sid(&self) -> u8 {
        self.header.sid
    }

    /// Serializes the command to bytes for transmission.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FINS_HEADER_SIZE + 8);
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.push(MRC_MEMORY_READ);
        bytes.push(SRC_MEMORY_READ);
        bytes.push(self.area_code);
        bytes.push((self.wire_address >> 8) as u8);
        bytes.push((self.wire_address & 0xFF) as u8);
        bytes.push(0x00); // bit offset, always 0 for word access
        bytes.push((self.units >> 8) as u8);
        bytes.push((self.units & 0xFF) as u8);
        bytes
    }
}
