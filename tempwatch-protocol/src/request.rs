//! Request formatting
//!
//! Request format:
//! - `GET {path} HTTP/1.1` request line
//! - `Host: {host}` header
//! - `Connection: close` header
//! - empty line, no body

use core::fmt::Write;

use heapless::String;

/// Maximum formatted request size in bytes
pub const REQUEST_CAPACITY: usize = 512;

/// Request did not fit in [`REQUEST_CAPACITY`] bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RequestTooLarge;

/// Format the GET request for `path` on `host`
pub fn format_request(host: &str, path: &str) -> Result<String<REQUEST_CAPACITY>, RequestTooLarge> {
    let mut request = String::new();
    write!(
        request,
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, host
    )
    .map_err(|_| RequestTooLarge)?;
    Ok(request)
}
