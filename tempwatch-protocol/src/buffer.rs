//! Fixed-capacity response buffer
//!
//! The buffer is owned by the caller and lent to the client for one fetch.
//! Its last byte is never written, so the contents always end in a zero
//! terminator.

/// Response buffer capacity in bytes
pub const RESPONSE_CAPACITY: usize = 4096;

/// Fixed-capacity byte buffer for one response
#[derive(Clone)]
pub struct ResponseBuffer<const N: usize = RESPONSE_CAPACITY> {
    data: [u8; N],
    len: usize,
}

impl<const N: usize> Default for ResponseBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ResponseBuffer<N> {
    /// Create a new zero-filled buffer
    pub const fn new() -> Self {
        Self { data: [0; N], len: 0 }
    }

    /// Zero-fill the buffer and forget the previous response
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.len = 0;
    }

    /// Total capacity, including the terminator slot
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of response bytes currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no response is held
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Received bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// At most the first `max` received bytes
    pub fn preview(&self, max: usize) -> &[u8] {
        &self.data[..self.len.min(max)]
    }

    /// Writable region for a receive call
    ///
    /// Excludes the terminator slot.
    pub(crate) fn receive_slot(&mut self) -> &mut [u8] {
        let end = N.saturating_sub(1);
        &mut self.data[..end]
    }

    /// Record how many bytes the last receive wrote
    pub(crate) fn set_len(&mut self, len: usize) {
        self.len = len.min(N.saturating_sub(1));
    }
}

impl<const N: usize> core::fmt::Debug for ResponseBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResponseBuffer")
            .field("capacity", &N)
            .field("len", &self.len)
            .finish()
    }
}
