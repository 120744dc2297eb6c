//! Fixed-capacity input buffer for unconsumed stream bytes.
//!
//! The buffer holds everything read from the producer that has not yet been
//! handed to the line processor, including a possibly-incomplete trailing
//! line. Capacity is fixed for the life of the process — the read loop's
//! force-flush failsafe guarantees room before every append, which bounds
//! worst-case memory regardless of producer behaviour.

/// Maximum bytes held pending, and the upper bound on a single read chunk.
pub const INPUT_MAX: usize = 16 * 1024;

/// Byte buffer with `append` and `consume_prefix` as the only mutators.
#[derive(Debug)]
pub struct InputBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(INPUT_MAX)
    }
}

impl InputBuffer {
    /// Create a buffer with the given fixed capacity. Tests use small
    /// capacities to exercise the overflow failsafe.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of valid (pending, unprocessed) bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes that can still be appended before the buffer is full.
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// True when at least one more byte fits.
    pub fn has_room(&self) -> bool {
        self.remaining() > 0
    }

    /// The valid region, in arrival order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Append `bytes` at the end of the valid region.
    ///
    /// Callers must guarantee room; the read loop force-flushes first when a
    /// chunk would not fit.
    pub fn append(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= self.remaining(),
            "input buffer overflow: {} pending + {} new > {} capacity",
            self.data.len(),
            bytes.len(),
            self.capacity
        );
        self.data.extend_from_slice(bytes);
    }

    /// Declare the first `n` bytes processed: drop them and shift the
    /// remainder down to offset 0.
    pub fn consume_prefix(&mut self, n: usize) {
        assert!(n <= self.data.len(), "consume_prefix past end of buffer");
        self.data.drain(..n);
    }

    /// Offset one past the last `\n` in the valid region, if any. This is
    /// the strict-line eligibility boundary.
    pub fn last_line_end(&self) -> Option<usize> {
        self.data.iter().rposition(|&b| b == b'\n').map(|i| i + 1)
    }
}
