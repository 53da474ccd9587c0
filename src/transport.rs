//! UDP transport layer for FINS communication.
//!
//! Handles synchronous datagram exchange with a PLC: one socket, one remote
//! address, blocking send/receive with a timeout. The transport knows
//! nothing about FINS frames; framing and matching live above it.

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use log::debug;

use crate::error::{FinsError, Result};

/// Default FINS UDP port.
pub const DEFAULT_FINS_PORT: u16 = 9600;

/// Default timeout for UDP operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Maximum UDP packet size for FINS.
pub const MAX_PACKET_SIZE: usize = 2048;

/// UDP transport for FINS communication.
pub struct UdpTransport {
    socket: UdpSocket,
    remote_addr: SocketAddr,
}

impl UdpTransport {
    /// Creates a transport bound to an ephemeral local port and connected
    /// to the PLC address, with read and write timeouts applied.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket cannot be created or configured.
    pub fn new(plc_addr: SocketAddr, timeout: Duration) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(plc_addr)?;
        socket.set_read_timeout(Some(timeout))?;
        socket.set_write_timeout(Some(timeout))?;

        Ok(Self {
            socket,
            remote_addr: plc_addr,
        })
    }

    /// Creates a transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket cannot be created or configured.
    pub fn with_default_timeout(plc_addr: SocketAddr) -> Result<Self> {
        Self::new(plc_addr, DEFAULT_TIMEOUT)
    }

    /// Sends one frame and blocks for the reply.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::Timeout`] when no reply arrives within the
    /// configured timeout, or the underlying I/O error otherwise.
    pub fn send_receive(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.socket.send(data)?;

        let mut buffer = vec![0u8; MAX_PACKET_SIZE];
        match self.socket.recv(&mut buffer) {
            Ok(size) => {
                buffer.truncate(size);
                Ok(buffer)
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(FinsError::Timeout),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Err(FinsError::Timeout),
            Err(e) => Err(FinsError::Io(e)),
        }
    }

    /// Discards any datagrams already queued on the socket.
    ///
    /// Stale replies from an earlier exchange would otherwise be matched
    /// against the next request and fail the SID check.
    pub fn drain_pending(&self) {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        if self.socket.set_nonblocking(true).is_err() {
            return;
        }
        let mut drained = 0usize;
        while self.socket.recv(&mut buffer).is_ok() {
            drained += 1;
        }
        let _ = self.socket.set_nonblocking(false);
        if drained > 0 {
            debug!("drained {} stale packet(s)", drained);
        }
    }

    /// Returns the remote PLC address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }
}

impl std::fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpTransport")
            .field("remote_addr", &self.remote_addr)
            .field("local_addr", &self.socket.local_addr().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_FINS_PORT, 9600);
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(2));
        assert_eq!(MAX_PACKET_SIZE, 2048);
    }

    #[test]
    fn test_transport_creation() {
        // Only verifies socket setup; exchange tests live in tests/.
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let transport = UdpTransport::new(addr, Duration::from_millis(100)).unwrap();
        assert_eq!(transport.remote_addr(), addr);
    }

    #[test]
    fn test_transport_with_default_timeout() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        assert!(UdpTransport::with_default_timeout(addr).is_ok());
    }

    #[test]
    fn test_drain_pending_on_empty_socket() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let transport = UdpTransport::new(addr, Duration::from_millis(100)).unwrap();
        transport.drain_pending();
    }

    #[test]
    fn test_transport_debug() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let transport = UdpTransport::new(addr, Duration::from_millis(100)).unwrap();
        let debug_str = format!("{:?}", transport);
        assert!(debug_str.contains("UdpTransport"));
        assert!(debug_str.contains("127.0.0.1:9600"));
    }
}
