//! Sensor report records
//!
//! The report body is line-oriented text:
//!
//! ```text
//! CPU Package: 45.2C
//!   GPU: 88.0C
//! Uptime 3d
//! ```
//!
//! Each line is one record. Leading whitespace and a trailing carriage
//! return are ignored, and only the first [`MAX_RECORDS`] non-empty records
//! are considered. Records without a colon are not readings and are skipped.

use heapless::String;

/// Maximum number of records considered per report
pub const MAX_RECORDS: usize = 18;

/// Maximum label width in characters
pub const LABEL_WIDTH: usize = 20;

/// Maximum width of the value column in characters
pub const VALUE_WIDTH: usize = 10;

/// One `label: value` record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Label, truncated to [`LABEL_WIDTH`] characters
    pub label: String<LABEL_WIDTH>,
    /// Text after the colon, trimmed and truncated to [`VALUE_WIDTH`]
    pub value_text: String<VALUE_WIDTH>,
    /// Temperature in degrees Celsius, if the value parsed as a number
    pub celsius: Option<f32>,
}

/// Iterate over the first [`MAX_RECORDS`] non-empty records of `body`
///
/// The body is split on raw bytes, so a malformed byte sequence stays
/// inside the record that contains it.
pub fn records(body: &[u8]) -> impl Iterator<Item = &[u8]> {
    body.split(|&b| b == b'\n')
        .map(|line| {
            let line = trim_start(line);
            line.strip_suffix(b"\r").unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .take(MAX_RECORDS)
}

/// Parse one trimmed record
///
/// Returns `None` for records without a colon.
pub fn parse_record(record: &[u8]) -> Option<SensorReading> {
    let colon = record.iter().position(|&b| b == b':')?;
    let (raw_label, raw_value) = (&record[..colon], &record[colon + 1..]);

    Some(SensorReading {
        label: decode_lossy(trim_end(raw_label)),
        value_text: decode_lossy(trim_end(trim_start(raw_value))),
        celsius: scan_celsius(valid_prefix(raw_value)),
    })
}

/// Readings of the first [`MAX_RECORDS`] records of `body`
pub fn readings(body: &[u8]) -> impl Iterator<Item = SensorReading> + '_ {
    records(body).filter_map(parse_record)
}

/// Decode as many whole characters of `bytes` as fit in `N` bytes
///
/// Each malformed sequence becomes U+FFFD.
pub fn decode_lossy<const N: usize>(mut bytes: &[u8]) -> String<N> {
    let mut out = String::new();
    loop {
        match core::str::from_utf8(bytes) {
            Ok(text) => {
                push_fitting(&mut out, text);
                return out;
            }
            Err(e) => {
                let (valid, invalid) = bytes.split_at(e.valid_up_to());
                if !push_fitting(&mut out, valid_prefix(valid))
                    || out.push(char::REPLACEMENT_CHARACTER).is_err()
                {
                    return out;
                }
                // A sequence cut off by the end of input has no error length
                bytes = &invalid[e.error_len().unwrap_or(invalid.len())..];
            }
        }
    }
}

/// Longest valid UTF-8 prefix of `bytes`
fn valid_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
    }
}

/// Push whole characters of `text` until `out` is full; false once full
fn push_fitting<const N: usize>(out: &mut String<N>, text: &str) -> bool {
    for ch in text.chars() {
        if out.push(ch).is_err() {
            return false;
        }
    }
    true
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[skip..]
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let keep = bytes.len() - bytes.iter().rev().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[..keep]
}

/// Scan a temperature such as ` 45.2C`
///
/// Leading whitespace is skipped and the longest numeric prefix is parsed.
/// Anything after the number, including the `C` unit, is ignored. Returns
/// `None` when no digits are found.
pub fn scan_celsius(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
