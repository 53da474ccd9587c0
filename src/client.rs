//! FINS client and the chunked block-read loop.
//!
//! [`Client`] holds everything a read needs: the transport (once connected),
//! the node addressing for command headers, and the caller-owned memory
//! area table. The block-read methods validate their inputs, resolve the
//! address, then loop: plan the next protocol-legal chunk, send one Memory
//! Area Read request, check and decode the reply, and advance through the
//! destination buffer until the requested count is done.
//!
//! # Example
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
//!     // 2000 32-bit values: split into protocol-legal chunks internally.
//!     let mut totals = vec![0u32; 2000];
//!     client.read_u32_block("DM0", &mut totals, 2000)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Thread safety
//!
//! The service ID counter is atomic, but concurrent reads on one client
//! interleave datagrams on the same socket and are not coordinated here;
//! serialize access externally if you share a client across threads.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use log::{debug, trace};

use crate::address::decode_address;
use crate::chunk::next_chunk_units;
use crate::command::{BlockReadCommand, MAX_WORDS_PER_COMMAND};
use crate::error::{FinsError, Result};
use crate::header::NodeAddress;
use crate::memory::{Access, AreaTable};
use crate::response::{decode_block, BlockValue, FinsResponse};
use crate::transport::{UdpTransport, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT};

/// Configuration for creating a FINS client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// PLC socket address.
    pub plc_addr: SocketAddr,
    /// Source node address (this client).
    pub source: NodeAddress,
    /// Destination node address (the PLC).
    pub destination: NodeAddress,
    /// Communication timeout.
    pub timeout: Duration,
    /// Memory area table used to resolve read addresses.
    pub areas: AreaTable,
}

impl ClientConfig {
    /// Creates a configuration with the default port, timeout, and the
    /// standard CS/CJ area table.
    ///
    /// # Example
    ///
    /// ```
    /// use omron_fins_bulk::ClientConfig;
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 1, 250), 1, 0);
    /// ```
    pub fn new(plc_ip: Ipv4Addr, source_node: u8, dest_node: u8) -> Self {
        Self {
            plc_addr: SocketAddr::from((plc_ip, DEFAULT_FINS_PORT)),
            source: NodeAddress::new(0, source_node, 0),
            destination: NodeAddress::new(0, dest_node, 0),
            timeout: DEFAULT_TIMEOUT,
            areas: AreaTable::standard(),
        }
    }

    /// Sets a custom PLC port (default is 9600).
    pub fn with_port(mut self, port: u16) -> Self {
        self.plc_addr.set_port(port);
        self
    }

    /// Sets a custom timeout (default is 2 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the memory area table.
    pub fn with_areas(mut self, areas: AreaTable) -> Self {
        self.areas = areas;
        self
    }

    /// Sets the source network address.
    pub fn with_source_network(mut self, network: u8) -> Self {
        self.source.network = network;
        self
    }

    /// Sets the destination network address.
    pub fn with_dest_network(mut self, network: u8) -> Self {
        self.destination.network = network;
        self
    }
}

/// FINS client for bulk memory reads.
///
/// Created unconnected; call [`connect`](Client::connect) before reading.
/// Block reads of any size are split into requests of at most
/// [`MAX_WORDS_PER_COMMAND`] transfer units each.
pub struct Client {
    transport: Option<UdpTransport>,
    plc_addr: SocketAddr,
    timeout: Duration,
    source: NodeAddress,
    destination: NodeAddress,
    areas: AreaTable,
    sid_counter: AtomicU8,
}

impl Client {
    /// Creates an unconnected client from the configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: None,
            plc_addr: config.plc_addr,
            timeout: config.timeout,
            source: config.source,
            destination: config.destination,
            areas: config.areas,
            sid_counter: AtomicU8::new(0),
        }
    }

    /// Opens the UDP transport to the PLC.
    ///
    /// Any datagrams left over from a previous session are discarded so
    /// they cannot be matched against the next request.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket cannot be created or configured.
    pub fn connect(&mut self) -> Result<()> {
        let transport = UdpTransport::new(self.plc_addr, self.timeout)?;
        transport.drain_pending();
        debug!("connected to PLC at {}", self.plc_addr);
        self.transport = Some(transport);
        Ok(())
    }

    /// Drops the transport; subsequent reads fail with
    /// [`FinsError::NotConnected`].
    pub fn close(&mut self) {
        self.transport = None;
    }

    /// Returns whether the client is connected.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Generates the next service ID.
    fn next_sid(&self) -> u8 {
        self.sid_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Sends a command and receives its response, matching by SID.
    ///
    /// A mismatched SID means a stale packet; pending datagrams are drained
    /// and the exchange retried a bounded number of times before giving up.
    fn send_receive_with_sid(&self, data: &[u8], expected_sid: u8) -> Result<FinsResponse> {
        const MAX_SID_RETRIES: usize = 3;

        let transport = self.transport.as_ref().ok_or(FinsError::NotConnected)?;
        let mut received = expected_sid;

        for attempt in 0..=MAX_SID_RETRIES {
            if attempt > 0 {
                transport.drain_pending();
            }

            let response_bytes = transport.send_receive(data)?;
            let response = FinsResponse::from_bytes(&response_bytes)?;

            if response.header.sid == expected_sid {
                return Ok(response);
            }

            received = response.header.sid;
            debug!(
                "stale reply: expected SID 0x{:02X}, received 0x{:02X}",
                expected_sid, response.header.sid
            );
        }

        Err(FinsError::sid_mismatch(expected_sid, received))
    }

    /// Reads `count` unsigned 32-bit values into `data`.
    ///
    /// `start` names the first word, e.g. `"DM100"`; each value occupies
    /// two consecutive words, low word first. The read is split into as
    /// many requests as the protocol maximum demands.
    ///
    /// A `count` of 0 succeeds immediately without touching the network.
    /// On error, values decoded from chunks completed before the failure
    /// remain in `data`, but the buffer as a whole must not be trusted.
    ///
    /// # Errors
    ///
    /// Preconditions, in order: [`FinsError::NotInitialized`] (empty area
    /// table), [`FinsError::NoReadAddress`] (empty address),
    /// [`FinsError::NoDataBlock`] (`data` shorter than `count`),
    /// [`FinsError::NotConnected`], [`FinsError::InvalidReadAddress`],
    /// [`FinsError::InvalidReadArea`]. After I/O starts:
    /// [`FinsError::BodyTooShort`] on a length-mismatched reply, and PLC or
    /// transport errors propagated unchanged.
    pub fn read_u32_block(&self, start: &str, data: &mut [u32], count: usize) -> Result<()> {
        self.read_block_into(start, data, count)
    }

    /// Reads `count` signed 32-bit values into `data`.
    ///
    /// Identical to [`read_u32_block`](Client::read_u32_block) except that
    /// each value's bit pattern is taken as two's-complement signed.
    pub fn read_i32_block(&self, start: &str, data: &mut [i32], count: usize) -> Result<()> {
        self.read_block_into(start, data, count)
    }

    /// Reads `count` unsigned 16-bit words into `data`.
    ///
    /// Same contract as [`read_u32_block`](Client::read_u32_block), one
    /// word per value.
    pub fn read_u16_block(&self, start: &str, data: &mut [u16], count: usize) -> Result<()> {
        self.read_block_into(start, data, count)
    }

    /// Reads `count` signed 16-bit words into `data`.
    pub fn read_i16_block(&self, start: &str, data: &mut [i16], count: usize) -> Result<()> {
        self.read_block_into(start, data, count)
    }

    /// The chunked read loop shared by all block-read entry points.
    fn read_block_into<T: BlockValue>(
        &self,
        start: &str,
        data: &mut [T],
        count: usize,
    ) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        if self.areas.is_empty() {
            return Err(FinsError::NotInitialized);
        }
        if start.is_empty() {
            return Err(FinsError::NoReadAddress);
        }
        if data.len() < count {
            return Err(FinsError::NoDataBlock);
        }
        if self.transport.is_none() {
            return Err(FinsError::NotConnected);
        }

        let address = decode_address(start).map_err(|_| FinsError::InvalidReadAddress)?;
        let area = self
            .areas
            .find_word_area(&address, Access::Read)
            .ok_or(FinsError::InvalidReadArea)?;

        let area_code = area.area.word_code();
        let mut wire_address = area.wire_address(&address);
        let mut offset = 0usize;
        let mut todo = count;

        while todo > 0 {
            debug_assert_eq!(offset + todo, count);

            let units = next_chunk_units(todo, T::WORDS_PER_VALUE, MAX_WORDS_PER_COMMAND);
            let values = usize::from(units / T::WORDS_PER_VALUE);
            let sid = self.next_sid();
            let command = BlockReadCommand::new(
                self.destination,
                self.source,
                sid,
                area_code,
                wire_address,
                units,
            )?;

            trace!(
                "chunk: {} unit(s) at wire address 0x{:04X}, {} value(s) to go",
                units,
                wire_address,
                todo
            );

            let response = self.send_receive_with_sid(&command.to_bytes(), sid)?;
            response.check_error()?;
            let words = response.block_words(units)?;
            data[offset..offset + values].copy_from_slice(&decode_block::<T>(&words));

            offset += values;
            todo -= values;
            wire_address += u32::from(units);
        }

        Ok(())
    }

    /// Returns the source node address.
    pub fn source(&self) -> NodeAddress {
        self.source
    }

    /// Returns the destination node address.
    pub fn destination(&self) -> NodeAddress {
        self.destination
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport)
            .field("plc_addr", &self.plc_addr)
            .field("source", &self.source)
            .field("destination", &self.destination)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::AreaTable;

    fn unconnected_client() -> Client {
        Client::new(ClientConfig::new(Ipv4Addr::new(127, 0, 0, 1), 1, 10))
    }

    fn connected_client() -> Client {
        // Connecting only binds the socket; no traffic happens until a
        // read passes all precondition checks.
        let mut client = unconnected_client();
        client.connect().unwrap();
        client
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new(Ipv4Addr::new(192, 168, 1, 250), 1, 0);
        assert_eq!(config.plc_addr.port(), DEFAULT_FINS_PORT);
        assert_eq!(config.source.node, 1);
        assert_eq!(config.destination.node, 0);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.areas.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new(Ipv4Addr::new(192, 168, 1, 250), 1, 0)
            .with_port(9601)
            .with_timeout(Duration::from_secs(5))
            .with_source_network(1)
            .with_dest_network(2);
        assert_eq!(config.plc_addr.port(), 9601);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.source.network, 1);
        assert_eq!(config.destination.network, 2);
    }

    #[test]
    fn test_zero_count_is_a_no_op() {
        // Succeeds before any validation: unconnected client, empty
        // address, empty buffer.
        let client = unconnected_client();
        let mut data: [u32; 0] = [];
        assert!(client.read_u32_block("", &mut data, 0).is_ok());
    }

    #[test]
    fn test_not_initialized_without_area_table() {
        let config = ClientConfig::new(Ipv4Addr::new(127, 0, 0, 1), 1, 10)
            .with_areas(AreaTable::empty());
        let client = Client::new(config);
        let mut data = [0u32; 1];
        let err = client.read_u32_block("DM0", &mut data, 1).unwrap_err();
        assert!(matches!(err, FinsError::NotInitialized));
    }

    #[test]
    fn test_empty_address_before_connection_check() {
        let client = unconnected_client();
        let mut data = [0u32; 1];
        let err = client.read_u32_block("", &mut data, 1).unwrap_err();
        assert!(matches!(err, FinsError::NoReadAddress));
    }

    #[test]
    fn test_short_buffer_is_no_data_block() {
        let client = unconnected_client();
        let mut data = [0u32; 2];
        let err = client.read_u32_block("DM0", &mut data, 3).unwrap_err();
        assert!(matches!(err, FinsError::NoDataBlock));
    }

    #[test]
    fn test_not_connected_checked_before_address_parse() {
        let client = unconnected_client();
        let mut data = [0u32; 1];
        // Even an unparseable address reports the connection state first.
        let err = client.read_u32_block("???", &mut data, 1).unwrap_err();
        assert!(matches!(err, FinsError::NotConnected));
    }

    #[test]
    fn test_invalid_read_address() {
        let client = connected_client();
        let mut data = [0u32; 1];
        for start in ["123", "DM", "DM1X"] {
            let err = client.read_u32_block(start, &mut data, 1).unwrap_err();
            assert!(matches!(err, FinsError::InvalidReadAddress), "{}", start);
        }
    }

    #[test]
    fn test_invalid_read_area() {
        let client = connected_client();
        let mut data = [0u32; 1];
        // Unknown prefix, and a word number past the area's range.
        for start in ["QQ99", "W512"] {
            let err = client.read_u32_block(start, &mut data, 1).unwrap_err();
            assert!(matches!(err, FinsError::InvalidReadArea), "{}", start);
        }
    }

    #[test]
    fn test_close_disconnects() {
        let mut client = connected_client();
        assert!(client.is_connected());
        client.close();
        assert!(!client.is_connected());
        let mut data = [0u32; 1];
        let err = client.read_u32_block("DM0", &mut data, 1).unwrap_err();
        assert!(matches!(err, FinsError::NotConnected));
    }

    #[test]
    fn test_sid_increments() {
        let client = unconnected_client();
        assert_eq!(client.next_sid(), 0);
        assert_eq!(client.next_sid(), 1);
        assert_eq!(client.next_sid(), 2);
    }

    #[test]
    fn test_client_debug() {
        let client = unconnected_client();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("Client"));
    }
}
