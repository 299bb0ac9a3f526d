//! Sensor report protocol
//!
//! This crate implements the client side of the single exchange the handheld
//! performs: one unauthenticated HTTP/1.1 GET, answered by a short plain-text
//! report.
//!
//! # Exchange Overview
//!
//! ```text
//! GET /api/temps/simple HTTP/1.1\r\n
//! Host: 192.168.1.35\r\n
//! Connection: close\r\n
//! \r\n
//!
//! HTTP/1.1 200 OK\r\n
//! ...headers...\r\n
//! \r\n
//! CPU Package: 45.2C\n
//! GPU: 88.0C\n
//! ```
//!
//! The response is read with a single receive call into a fixed-capacity
//! [`ResponseBuffer`]. Reports larger than one read are truncated; the server
//! is expected to send a few hundred bytes and close.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod client;
pub mod report;
pub mod request;
pub mod response;

pub use buffer::{ResponseBuffer, RESPONSE_CAPACITY};
pub use client::{ConnectionOutcome, FetchError, FetchStage, HttpClient};
pub use report::{decode_lossy, parse_record, readings, records, scan_celsius, SensorReading};
pub use report::{LABEL_WIDTH, MAX_RECORDS, VALUE_WIDTH};
pub use request::{format_request, REQUEST_CAPACITY};
pub use response::{extract_body, find_subsequence, CRLF_BOUNDARY, LF_BOUNDARY};
