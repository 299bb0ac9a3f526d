//! Header/body split
//!
//! Conforming servers separate headers from the body with `\r\n\r\n`. Some
//! embedded servers only emit bare line feeds, so `\n\n` is accepted as a
//! fallback. The body is returned as a view into the raw response.

/// Standard header/body separator
pub const CRLF_BOUNDARY: &[u8] = b"\r\n\r\n";

/// Separator used by servers that omit carriage returns
pub const LF_BOUNDARY: &[u8] = b"\n\n";

/// Find the first occurrence of `needle` in `haystack`
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Return the body of a raw response
///
/// Returns `None` when neither separator is present. A response that ends
/// right after the separator yields `Some` of an empty slice.
pub fn extract_body(raw: &[u8]) -> Option<&[u8]> {
    if let Some(pos) = find_subsequence(raw, CRLF_BOUNDARY) {
        return Some(&raw[pos + CRLF_BOUNDARY.len()..]);
    }

    find_subsequence(raw, LF_BOUNDARY).map(|pos| &raw[pos + LF_BOUNDARY.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crlf_boundary() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nCPU: 45.2C\n";
        assert_eq!(extract_body(raw), Some(&b"CPU: 45.2C\n"[..]));
    }

    #[test]
    fn test_lf_boundary_fallback() {
        let raw = b"HTTP/1.1 200 OK\nServer: tiny\n\nGPU: 70.0C";
        assert_eq!(extract_body(raw), Some(&b"GPU: 70.0C"[..]));
    }

    #[test]
    fn test_crlf_preferred_over_earlier_lf() {
        // A bare "\n\n" before the real separator must not win
        let raw = b"X-A: 1\n\nignored\r\n\r\nbody";
        assert_eq!(extract_body(raw), Some(&b"body"[..]));
    }

    #[test]
    fn test_repeated_crlf_separator_stays_in_body() {
        let raw = b"H: 1\r\n\r\nA\r\n\r\nB";
        assert_eq!(extract_body(raw), Some(&b"A\r\n\r\nB"[..]));
    }

    #[test]
    fn test_repeated_lf_separator_stays_in_body() {
        let raw = b"HTTP/1.1 200 OK\nH: 1\n\nA\n\nB\n\n";
        assert_eq!(extract_body(raw), Some(&b"A\n\nB\n\n"[..]));
    }

    #[test]
    fn test_no_boundary() {
        assert_eq!(extract_body(b"HTTP/1.1 200 OK\r\nServer: x\r\n"), None);
        assert_eq!(extract_body(b""), None);
    }

    #[test]
    fn test_empty_body_is_not_missing() {
        assert_eq!(extract_body(b"HTTP/1.1 204 No Content\r\n\r\n"), Some(&b""[..]));
    }

    #[test]
    fn test_find_subsequence_edges() {
        assert_eq!(find_subsequence(b"abc", b""), None);
        assert_eq!(find_subsequence(b"ab", b"abc"), None);
        assert_eq!(find_subsequence(b"abcabc", b"ca"), Some(2));
    }

    fn header_bytes() -> impl Strategy<Value = Vec<u8>> {
        // Header text without any newline, so it cannot contain a separator
        proptest::collection::vec(prop_oneof![Just(b'\r'), 0x20u8..0x7f], 0..64)
    }

    proptest! {
        #[test]
        fn prop_first_crlf_boundary_wins(
            head in header_bytes(),
            body in proptest::collection::vec(any::<u8>(), 0..128),
        ) {
            let mut raw = head;
            raw.extend_from_slice(CRLF_BOUNDARY);
            raw.extend_from_slice(&body);

            prop_assert_eq!(extract_body(&raw), Some(&body[..]));
        }

        #[test]
        fn prop_lf_boundary_used_without_crlf(
            head in header_bytes(),
            body in "[A-Za-z0-9 :.\\n]{0,64}",
        ) {
            prop_assume!(!body.contains("\n\n"));
            let mut raw = head;
            raw.extend_from_slice(LF_BOUNDARY);
            raw.extend_from_slice(body.as_bytes());

            prop_assume!(find_subsequence(&raw, CRLF_BOUNDARY).is_none());
            prop_assert_eq!(extract_body(&raw), Some(body.as_bytes()));
        }

        #[test]
        fn prop_no_separator_no_body(raw in proptest::collection::vec(0x20u8..0x7f, 0..256)) {
            prop_assert_eq!(extract_body(&raw), None);
        }
    }
}
