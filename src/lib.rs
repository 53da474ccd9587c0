//! # Omron FINS bulk memory reads
//!
//! A Rust library for reading large blocks of memory from Omron PLCs over
//! the FINS (Factory Interface Network Service) protocol.
//!
//! A single FINS Memory Area Read request carries at most
//! [`MAX_WORDS_PER_COMMAND`] 16-bit words, so a bulk read of arbitrary size
//! has to be decomposed. That decomposition is what this crate does: it
//! splits a requested count into protocol-legal chunks, issues one request
//! per chunk, validates each reply's length, and reassembles the reply
//! bytes into native 16-bit or 32-bit integers in a caller-owned buffer.
//!
//! ## Quick start
//!
//! ```no_run
//! use omron_fins_bulk::{Client, ClientConfig};
//! use std::net::Ipv4Addr;
//!
//! fn main() -> omron_fins_bulk::Result<()> {
//!     let config = ClientConfig::new(Ipv4Addr::new(192, 168, 1, 250), 1, 0);
//!     let mut client = Client::new(config);
//!     client.connect()?;
//!
//!     // Read 1000 32-bit counters starting at DM100. Internally this is
//!     // three requests; the chunking is invisible to the caller.
//!     let mut counters = vec![0u32; 1000];
//!     client.read_u32_block("DM100", &mut counters, 1000)?;
//!
//!     // Signed reads share the same wire decoding.
//!     let mut deltas = vec![0i32; 10];
//!     client.read_i32_block("DM2100", &mut deltas, 10)?;
//!
//!     // Plain 16-bit word reads are chunked the same way.
//!     let mut flags = vec![0u16; 1500];
//!     client.read_u16_block("CIO0", &mut flags, 1500)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Addresses and memory areas
//!
//! Reads are addressed by strings such as `"DM100"`, `"CIO20"`, or
//! `"C500"`: an area prefix and a word number. The prefix is resolved
//! through the [`AreaTable`] held by the client configuration; the standard
//! table covers the word-readable areas of CS/CJ-series PLCs:
//!
//! | Prefix | Area | Words |
//! |--------|------|-------|
//! | `CIO` | Core I/O | 0-6143 |
//! | `W` | Work area | 0-511 |
//! | `H` | Holding area | 0-511 |
//! | `A` | Auxiliary area (A0-A447 read-only) | 0-959 |
//! | `DM` | Data Memory | 0-32767 |
//! | `T` | Timer present values | 0-4095 |
//! | `C` | Counter present values | 0-4095 |
//!
//! Controllers with a different memory map get a custom table via
//! [`ClientConfig::with_areas`].
//!
//! ## 32-bit value layout
//!
//! The PLC stores a 32-bit value as two 16-bit words with the LOW word at
//! the lower address, transmitted first. Reply bytes `11 22 33 44`
//! therefore decode to `0x33441122`, not to either conventional byte
//! order. This is the device's native storage order and is preserved
//! exactly; see [`utils`] for the word-pair helpers.
//!
//! ## Error handling
//!
//! Every operation returns [`Result<T, FinsError>`](Result); the library
//! never panics in public code. Precondition failures (`NotInitialized`,
//! `NoReadAddress`, `NoDataBlock`, `NotConnected`) are detected in a fixed
//! order before any I/O. Transport and PLC errors abort the remaining
//! chunks and propagate unchanged; values decoded before the failure stay
//! in the buffer, but the overall result is the error.
//!
//! The read loop performs no retries of its own — retry policy, like
//! timeouts, belongs to the transport exchange, which only retries the
//! bounded stale-packet case during SID matching.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod address;
mod chunk;
mod client;
mod command;
mod error;
mod header;
mod memory;
mod response;
mod transport;
pub mod utils;

// Public re-exports
pub use address::{decode_address, DecodedAddress};
pub use client::{Client, ClientConfig};
pub use command::{BlockReadCommand, MAX_WORDS_PER_COMMAND};
pub use error::{FinsError, Result};
pub use header::{FinsHeader, NodeAddress, FINS_HEADER_SIZE};
pub use memory::{Access, AreaDescriptor, AreaTable, MemoryArea};
pub use response::{FinsResponse, MIN_RESPONSE_SIZE};
pub use transport::{UdpTransport, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT, MAX_PACKET_SIZE};
