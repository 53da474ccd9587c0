//! FINS header structure and node addressing.
//!
//! Every FINS frame starts with a 10-byte header carrying routing
//! information and the service ID used to match replies to requests:
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | ICF | Information Control Field (0x80 command, 0xC0 response) |
//! | 1 | RSV | Reserved (always 0x00) |
//! | 2 | GCT | Gateway Count |
//! | 3-5 | DNA/DA1/DA2 | Destination network, node, unit |
//! | 6-8 | SNA/SA1/SA2 | Source network, node, unit |
//! | 9 | SID | Service ID |

use crate::error::{FinsError, Result};

/// FINS header size in bytes.
pub const FINS_HEADER_SIZE: usize = 10;

/// Node address for FINS communication.
///
/// Each node is identified by a network number (0 = local network), a node
/// number within the network, and a unit number within the node (0 = CPU).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAddress {
    /// Network address (0 = local network).
    pub network: u8,
    /// Node address within the network.
    pub node: u8,
    /// Unit address within the node (0 = CPU unit).
    pub unit: u8,
}

impl NodeAddress {
    /// Creates a new node address.
    pub fn new(network: u8, node: u8, unit: u8) -> Self {
        Self {
            network,
            node,
            unit,
        }
    }

    /// Creates a local node address (network 0, node 0, unit 0).
    pub fn local() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for NodeAddress {
    fn default() -> Self {
        Self::local()
    }
}

/// FINS command/response header (10 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinsHeader {
    /// Information Control Field (0x80 for commands, 0xC0 for responses).
    pub icf: u8,
    /// Reserved byte (always 0x00).
    pub rsv: u8,
    /// Gateway count (number of bridges the frame may still cross).
    pub gct: u8,
    /// Destination network address.
    pub dna: u8,
    /// Destination node address.
    pub da1: u8,
    /// Destination unit address.
    pub da2: u8,
    /// Source network address.
    pub sna: u8,
    /// Source node address.
    pub sa1: u8,
    /// Source unit address.
    pub sa2: u8,
    /// Service ID, used to match responses with requests.
    pub sid: u8,
}

impl FinsHeader {
    /// Creates a header for a command that expects a response.
    pub fn new_command(destination: NodeAddress, source: NodeAddress, sid: u8) -> Self {
        Self {
            icf: 0x80,
            rsv: 0x00,
            gct: 0x07,
            dna: destination.network,
            da1: destination.node,
            da2: destination.unit,
            sna: source.network,
            sa1: source.node,
            sa2: source.unit,
            sid,
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(self) -> [u8; FINS_HEADER_SIZE] {
        [
            self.icf, self.rsv, self.gct, self.dna, self.da1, self.da2, self.sna, self.sa1,
            self.sa2, self.sid,
        ]
    }

    /// Parses a header from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::InvalidResponse`] if the slice is too short.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < FINS_HEADER_SIZE {
            return Err(FinsError::invalid_response(format!(
                "header too short: expected {} bytes, got {}",
                FINS_HEADER_SIZE,
                data.len()
            )));
        }

        Ok(Self {
            icf: data[0],
            rsv: data[1],
            gct: data[2],
            dna: data[3],
            da1: data[4],
            da2: data[5],
            sna: data[6],
            sa1: data[7],
            sa2: data[8],
            sid: data[9],
        })
    }
}
