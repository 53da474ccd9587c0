//! Memory area definitions and the area lookup table.
//!
//! Each PLC memory area is identified on the wire by a one-byte area code,
//! and its word numbers do not necessarily start at wire address zero. The
//! [`AreaTable`] maps decoded address prefixes onto [`AreaDescriptor`] rows
//! that carry the area code, the addressable word range, and the wire-offset
//! correction. The table is an explicit, caller-owned value held by the
//! client configuration — swap it out for controllers with a different
//! memory map.
//!
//! # Example
//!
//! ```
//! use omron_fins_bulk::{decode_address, Access, AreaTable, MemoryArea};
//!
//! let areas = AreaTable::standard();
//! let address = decode_address("C100").unwrap();
//! let entry = areas.find_word_area(&address, Access::Read).unwrap();
//!
//! assert_eq!(entry.area, MemoryArea::CNT);
//! // Counter words live at wire address 0x8000 upward.
//! assert_eq!(entry.wire_address(&address), 0x8064);
//! ```

use crate::address::DecodedAddress;

/// Memory areas word-addressable on CS/CJ-series PLCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryArea {
    /// CIO (Core I/O) area - general purpose I/O and internal relays.
    CIO,
    /// WR (Work) area - work words.
    WR,
    /// HR (Holding) area - holding words that retain values.
    HR,
    /// AR (Auxiliary Relay) area - system status and control words.
    AR,
    /// DM (Data Memory) area - word-only data storage.
    DM,
    /// TIM area - timer present values.
    TIM,
    /// CNT area - counter present values.
    CNT,
}

impl MemoryArea {
    /// Returns the FINS code for word access to this memory area.
    ///
    /// Timers and counters share one code; the counter half of that address
    /// space is reached through the wire offset in its [`AreaDescriptor`].
    pub(crate) fn word_code(self) -> u8 {
        match self {
            MemoryArea::CIO => 0xB0,
            MemoryArea::WR => 0xB1,
            MemoryArea::HR => 0xB2,
            MemoryArea::AR => 0xB3,
            MemoryArea::DM => 0x82,
            MemoryArea::TIM | MemoryArea::CNT => 0x89,
        }
    }
}

impl std::fmt::Display for MemoryArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryArea::CIO => write!(f, "CIO"),
            MemoryArea::WR => write!(f, "WR"),
            MemoryArea::HR => write!(f, "HR"),
            MemoryArea::AR => write!(f, "AR"),
            MemoryArea::DM => write!(f, "DM"),
            MemoryArea::TIM => write!(f, "TIM"),
            MemoryArea::CNT => write!(f, "CNT"),
        }
    }
}

/// Capability required when resolving an address against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The area must be readable.
    Read,
    /// The area must be writable.
    Write,
}

/// Describes how one area's word numbers map onto the wire address space.
#[derive(Debug, Clone)]
pub struct AreaDescriptor {
    /// Memory area this entry describes.
    pub area: MemoryArea,
    /// Address prefix matched against decoded addresses.
    pub prefix: &'static str,
    /// Lowest word number addressable through this entry.
    pub low_id: u32,
    /// Highest word number addressable through this entry.
    pub high_id: u32,
    /// Wire address of `low_id`, shifted left 8 bits; the low byte holds the
    /// bit offset and is always zero for word areas.
    pub low_addr: u32,
    /// Whether the area can be read.
    pub readable: bool,
    /// Whether the area can be written.
    pub writable: bool,
}

impl AreaDescriptor {
    /// Wire word address of a decoded address resolved through this entry.
    ///
    /// The caller must have matched `address` against this entry first, so
    /// `address.word >= low_id` holds.
    pub fn wire_address(&self, address: &DecodedAddress) -> u32 {
        address.word + (self.low_addr >> 8) - self.low_id
    }
}

/// Lookup table from address prefixes to area descriptors.
#[derive(Debug, Clone, Default)]
pub struct AreaTable {
    entries: Vec<AreaDescriptor>,
}

impl AreaTable {
    /// The word-readable areas of a CS/CJ-series PLC.
    ///
    /// A000-A447 is read-only; A448 upward is read-write. Counter present
    /// values share the timer area code and start at wire address 0x8000.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                AreaDescriptor {
                    area: MemoryArea::CIO,
                    prefix: "CIO",
                    low_id: 0,
                    high_id: 6143,
                    low_addr: 0,
                    readable: true,
                    writable: true,
                },
                AreaDescriptor {
                    area: MemoryArea::WR,
                    prefix: "W",
                    low_id: 0,
                    high_id: 511,
                    low_addr: 0,
                    readable: true,
                    writable: true,
                },
                AreaDescriptor {
                    area: MemoryArea::HR,
                    prefix: "H",
                    low_id: 0,
                    high_id: 511,
                    low_addr: 0,
                    readable: true,
                    writable: true,
                },
                AreaDescriptor {
                    area: MemoryArea::AR,
                    prefix: "A",
                    low_id: 0,
                    high_id: 447,
                    low_addr: 0,
                    readable: true,
                    writable: false,
                },
                AreaDescriptor {
                    area: MemoryArea::AR,
                    prefix: "A",
                    low_id: 448,
                    high_id: 959,
                    low_addr: 448 << 8,
                    readable: true,
                    writable: true,
                },
                AreaDescriptor {
                    area: MemoryArea::DM,
                    prefix: "DM",
                    low_id: 0,
                    high_id: 32767,
                    low_addr: 0,
                    readable: true,
                    writable: true,
                },
                AreaDescriptor {
                    area: MemoryArea::TIM,
                    prefix: "T",
                    low_id: 0,
                    high_id: 4095,
                    low_addr: 0,
                    readable: true,
                    writable: true,
                },
                AreaDescriptor {
                    area: MemoryArea::CNT,
                    prefix: "C",
                    low_id: 0,
                    high_id: 4095,
                    low_addr: 0x8000 << 8,
                    readable: true,
                    writable: true,
                },
            ],
        }
    }

    /// An empty table. Reads against a client configured with it fail with
    /// [`FinsError::NotInitialized`](crate::FinsError::NotInitialized).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a table from custom descriptors.
    pub fn new(entries: Vec<AreaDescriptor>) -> Self {
        Self { entries }
    }

    /// Returns whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a decoded address to the area entry covering it.
    ///
    /// The entry must match the prefix exactly, cover the word number, and
    /// grant the requested capability. Returns `None` otherwise.
    pub fn find_word_area(
        &self,
        address: &DecodedAddress,
        access: Access,
    ) -> Option<&AreaDescriptor> {
        self.entries.iter().find(|entry| {
            entry.prefix == address.area
                && (entry.low_id..=entry.high_id).contains(&address.word)
                && match access {
                    Access::Read => entry.readable,
                    Access::Write => entry.writable,
                }
        })
    }
}
