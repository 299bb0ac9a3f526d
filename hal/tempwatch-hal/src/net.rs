//! Network transport abstraction
//!
//! A blocking, point-to-point connection primitive over a single numeric
//! IPv4 destination. Every operation is bounded by the timeouts configured
//! on the handle; nothing can be cancelled mid-flight.

use core::fmt;
use core::net::SocketAddrV4;

/// Default send and receive timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u32 = 5000;

/// Errors reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The platform could not allocate a socket
    SocketCreation,
    /// The remote endpoint refused or did not accept within the timeout
    ConnectRefused,
    /// The full payload could not be written
    SendError,
    /// Nothing arrived within the timeout, or the peer reset the connection
    ReceiveTimeoutOrReset,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TransportError::SocketCreation => "socket creation failed",
            TransportError::ConnectRefused => "connection refused",
            TransportError::SendError => "send failed",
            TransportError::ReceiveTimeoutOrReset => "receive timeout or reset",
        };
        f.write_str(text)
    }
}

/// Blocking network transport
///
/// A handle returned by [`open`](NetworkTransport::open) must be passed to
/// [`close`](NetworkTransport::close) exactly once, including on every error
/// path after a successful open.
pub trait NetworkTransport {
    /// Platform socket handle
    type Handle;

    /// Allocate a new stream socket
    fn open(&mut self) -> Result<Self::Handle, TransportError>;

    /// Configure the send and receive timeouts of a handle
    ///
    /// Both timeouts apply independently to each blocking call.
    fn set_timeouts(&mut self, handle: &mut Self::Handle, send_ms: u32, recv_ms: u32);

    /// Connect the handle to the remote endpoint
    fn connect(
        &mut self,
        handle: &mut Self::Handle,
        addr: SocketAddrV4,
    ) -> Result<(), TransportError>;

    /// Write the entire payload
    fn send_all(&mut self, handle: &mut Self::Handle, bytes: &[u8]) -> Result<(), TransportError>;

    /// Perform a single receive into `buf`
    ///
    /// Returns the number of bytes received, which may be less than the
    /// buffer length. A receive that yields no bytes within the timeout is
    /// reported as [`TransportError::ReceiveTimeoutOrReset`].
    fn receive_into(
        &mut self,
        handle: &mut Self::Handle,
        buf: &mut [u8],
    ) -> Result<usize, TransportError>;

    /// Release the handle
    fn close(&mut self, handle: Self::Handle);
}
