use std::io;

use crate::http::io::ByteSource;

/// Default capacity of a connection's read buffer.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Fixed-capacity byte accumulator.
///
/// Valid bytes always sit at the front of the storage; `len` marks how many
/// there are. The storage is allocated once and never grows.
#[derive(Debug)]
pub struct ByteBuffer {
    storage: Box<[u8]>,
    len: usize,
}

impl ByteBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.storage.len()
    }

    /// The valid bytes, front first.
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Asks `source` to fill the free tail and appends whatever it returned.
    ///
    /// Returns the number of bytes appended. `Ok(0)` is end-of-stream, or a
    /// full buffer; callers check [`is_full`](Self::is_full) first.
    pub async fn read_from<S: ByteSource>(&mut self, source: &mut S) -> io::Result<usize> {
        debug_assert!(!self.is_full(), "read_from called on a full buffer");

        let n = source.pull(&mut self.storage[self.len..]).await?;
        self.len += n;
        Ok(n)
    }

    /// Offset of the first `delimiter`, if buffered.
    pub fn find(&self, delimiter: u8) -> Option<usize> {
        self.as_slice().iter().position(|&b| b == delimiter)
    }

    /// Drops the first `n` bytes and compacts the remainder to the front.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.len);
        self.storage.copy_within(n..self.len, 0);
        self.len -= n;
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
