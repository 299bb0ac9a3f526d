//! Blocking HTTP GET client
//!
//! One fetch is one short-lived connection:
//!
//! 1. open a socket and configure both timeouts
//! 2. parse the host as an IPv4 literal
//! 3. connect
//! 4. send the request in one write
//! 5. zero-fill the buffer and receive once
//! 6. close the socket, on every path
//!
//! The client does not loop to drain the body. A stuck peer costs at most
//! the connect and receive timeouts before control returns to the caller.

use core::fmt;
use core::net::{Ipv4Addr, SocketAddrV4};

use tempwatch_hal::net::{NetworkTransport, TransportError, DEFAULT_TIMEOUT_MS};

use crate::buffer::ResponseBuffer;
use crate::request::format_request;

/// Why a fetch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// The platform could not allocate a socket
    SocketCreation,
    /// The host is not a dotted-quad IPv4 literal
    InvalidAddress,
    /// The server could not be reached
    ConnectRefused,
    /// The request could not be written
    SendError,
    /// No bytes arrived within the timeout, or the connection was reset
    ReceiveTimeoutOrReset,
}

impl From<TransportError> for FetchError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::SocketCreation => FetchError::SocketCreation,
            TransportError::ConnectRefused => FetchError::ConnectRefused,
            TransportError::SendError => FetchError::SendError,
            TransportError::ReceiveTimeoutOrReset => FetchError::ReceiveTimeoutOrReset,
        }
    }
}

impl FetchError {
    /// Numeric code shown on the error screen
    pub fn code(&self) -> i8 {
        match self {
            FetchError::SocketCreation => -1,
            FetchError::InvalidAddress => -2,
            FetchError::ConnectRefused => -3,
            FetchError::SendError => -4,
            FetchError::ReceiveTimeoutOrReset => -5,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FetchError::SocketCreation => "socket creation failed",
            FetchError::InvalidAddress => "invalid server address",
            FetchError::ConnectRefused => "could not connect",
            FetchError::SendError => "send failed",
            FetchError::ReceiveTimeoutOrReset => "timeout receiving data",
        };
        f.write_str(text)
    }
}

/// Result of one poll attempt: bytes received, or why it failed
pub type ConnectionOutcome = Result<usize, FetchError>;

/// Progress through a fetch, reported to an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchStage {
    /// Allocating the socket
    Socket,
    /// Configuring timeouts
    Timeouts,
    /// Parsing the server address
    Address,
    /// Connecting
    Connect,
    /// Sending the request
    Send,
    /// Waiting for the response
    Receive,
    /// Closing the socket after receiving `received` bytes (0 on failure)
    Close { received: usize },
    /// Fetch succeeded
    Done,
}

impl FetchStage {
    /// One-based step number
    pub fn number(&self) -> u8 {
        match self {
            FetchStage::Socket => 1,
            FetchStage::Timeouts => 2,
            FetchStage::Address => 3,
            FetchStage::Connect => 4,
            FetchStage::Send => 5,
            FetchStage::Receive => 6,
            FetchStage::Close { .. } => 7,
            FetchStage::Done => 8,
        }
    }

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            FetchStage::Socket => "Socket",
            FetchStage::Timeouts => "Timeout",
            FetchStage::Address => "Config addr",
            FetchStage::Connect => "Connect",
            FetchStage::Send => "Send",
            FetchStage::Receive => "Recv",
            FetchStage::Close { .. } => "Close",
            FetchStage::Done => "OK!",
        }
    }
}

/// Open socket that is closed when dropped
struct OpenSocket<'t, T: NetworkTransport> {
    transport: &'t mut T,
    handle: Option<T::Handle>,
}

impl<'t, T: NetworkTransport> OpenSocket<'t, T> {
    fn open(transport: &'t mut T) -> Result<Self, TransportError> {
        let handle = transport.open()?;
        Ok(Self {
            transport,
            handle: Some(handle),
        })
    }

    fn with_handle<R>(
        &mut self,
        op: impl FnOnce(&mut T, &mut T::Handle) -> Result<R, TransportError>,
    ) -> Result<R, TransportError> {
        match self.handle.as_mut() {
            Some(handle) => op(&mut *self.transport, handle),
            None => Err(TransportError::SocketCreation),
        }
    }
}

impl<T: NetworkTransport> Drop for OpenSocket<'_, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.transport.close(handle);
        }
    }
}

/// HTTP GET client over a blocking transport
#[derive(Debug)]
pub struct HttpClient<T> {
    transport: T,
    send_timeout_ms: u32,
    recv_timeout_ms: u32,
}

impl<T: NetworkTransport> HttpClient<T> {
    /// Create a client with the default 5 s send and receive timeouts
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            send_timeout_ms: DEFAULT_TIMEOUT_MS,
            recv_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Override the send and receive timeouts
    pub fn with_timeouts(mut self, send_ms: u32, recv_ms: u32) -> Self {
        self.send_timeout_ms = send_ms;
        self.recv_timeout_ms = recv_ms;
        self
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Fetch `path` from `host:port` into `buffer`
    ///
    /// Returns the number of bytes received. The buffer is zero-filled
    /// first, so a failed fetch always leaves it empty.
    pub fn fetch<const N: usize>(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        buffer: &mut ResponseBuffer<N>,
    ) -> ConnectionOutcome {
        self.fetch_observed(host, port, path, buffer, |_| {})
    }

    /// Like [`fetch`](Self::fetch), reporting each stage to `observer`
    pub fn fetch_observed<const N: usize>(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        buffer: &mut ResponseBuffer<N>,
        mut observer: impl FnMut(FetchStage),
    ) -> ConnectionOutcome {
        buffer.clear();

        observer(FetchStage::Socket);
        let mut socket = OpenSocket::open(&mut self.transport)?;

        observer(FetchStage::Timeouts);
        let (send_ms, recv_ms) = (self.send_timeout_ms, self.recv_timeout_ms);
        socket.with_handle(|t, h| {
            t.set_timeouts(h, send_ms, recv_ms);
            Ok(())
        })?;

        observer(FetchStage::Address);
        let ip: Ipv4Addr = host.parse().map_err(|_| FetchError::InvalidAddress)?;
        let addr = SocketAddrV4::new(ip, port);

        observer(FetchStage::Connect);
        socket
            .with_handle(|t, h| t.connect(h, addr))
            .map_err(|_| FetchError::ConnectRefused)?;

        observer(FetchStage::Send);
        // Host and path come from validated configuration; an oversized
        // request is reported as a failed write.
        let request = format_request(host, path).map_err(|_| FetchError::SendError)?;
        socket
            .with_handle(|t, h| t.send_all(h, request.as_bytes()))
            .map_err(|_| FetchError::SendError)?;

        observer(FetchStage::Receive);
        let received = socket.with_handle(|t, h| t.receive_into(h, buffer.receive_slot()));

        let received = match received {
            Ok(n) => n,
            Err(_) => 0,
        };
        observer(FetchStage::Close { received });
        drop(socket);

        if received == 0 {
            return Err(FetchError::ReceiveTimeoutOrReset);
        }
        buffer.set_len(received);

        observer(FetchStage::Done);
        Ok(buffer.len())
    }
}
