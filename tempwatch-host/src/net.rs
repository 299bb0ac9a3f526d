//! TCP transport over `std::net`
//!
//! `std` has no unconnected socket type, so `open` only reserves the
//! handle; the stream itself is created by `connect` with the configured
//! timeout.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, SocketAddrV4, TcpStream};
use std::time::Duration;

use log::{debug, trace};
use tempwatch_hal::{NetworkTransport, TransportError, DEFAULT_TIMEOUT_MS};

/// Socket handle: timeouts plus the stream once connected
#[derive(Debug)]
pub struct TcpHandle {
    send_timeout: Duration,
    recv_timeout: Duration,
    stream: Option<TcpStream>,
}

/// Blocking TCP transport
#[derive(Debug, Default)]
pub struct StdTcpTransport {
    opened: u64,
}

impl StdTcpTransport {
    /// Create a transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sockets opened so far
    pub fn opened(&self) -> u64 {
        self.opened
    }
}

fn millis(ms: u32) -> Duration {
    // std rejects zero timeouts
    Duration::from_millis(u64::from(ms.max(1)))
}

impl NetworkTransport for StdTcpTransport {
    type Handle = TcpHandle;

    fn open(&mut self) -> Result<TcpHandle, TransportError> {
        self.opened += 1;
        Ok(TcpHandle {
            send_timeout: millis(DEFAULT_TIMEOUT_MS),
            recv_timeout: millis(DEFAULT_TIMEOUT_MS),
            stream: None,
        })
    }

    fn set_timeouts(&mut self, handle: &mut TcpHandle, send_ms: u32, recv_ms: u32) {
        handle.send_timeout = millis(send_ms);
        handle.recv_timeout = millis(recv_ms);
    }

    fn connect(&mut self, handle: &mut TcpHandle, addr: SocketAddrV4) -> Result<(), TransportError> {
        let stream = TcpStream::connect_timeout(&SocketAddr::V4(addr), handle.send_timeout)
            .map_err(|e| {
                debug!("connect to {} failed: {}", addr, e);
                TransportError::ConnectRefused
            })?;

        stream
            .set_write_timeout(Some(handle.send_timeout))
            .and_then(|_| stream.set_read_timeout(Some(handle.recv_timeout)))
            .map_err(|e| {
                debug!("setting timeouts failed: {}", e);
                TransportError::ConnectRefused
            })?;

        handle.stream = Some(stream);
        Ok(())
    }

    fn send_all(&mut self, handle: &mut TcpHandle, bytes: &[u8]) -> Result<(), TransportError> {
        let stream = handle.stream.as_mut().ok_or(TransportError::SendError)?;
        stream
            .write_all(bytes)
            .and_then(|_| stream.flush())
            .map_err(|e| {
                debug!("send failed: {}", e);
                TransportError::SendError
            })
    }

    fn receive_into(&mut self, handle: &mut TcpHandle, buf: &mut [u8]) -> Result<usize, TransportError> {
        let stream = handle
            .stream
            .as_mut()
            .ok_or(TransportError::ReceiveTimeoutOrReset)?;

        match stream.read(buf) {
            Ok(0) => {
                debug!("peer closed without data");
                Err(TransportError::ReceiveTimeoutOrReset)
            }
            Ok(n) => {
                trace!("received {} bytes", n);
                Ok(n)
            }
            Err(e) => {
                debug!("receive failed: {}", e);
                Err(TransportError::ReceiveTimeoutOrReset)
            }
        }
    }

    fn close(&mut self, handle: TcpHandle) {
        if let Some(stream) = handle.stream {
            // The peer may already have closed its side
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}
