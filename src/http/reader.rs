use std::io;

use thiserror::Error;

use crate::http::buffer::ByteBuffer;
use crate::http::io::ByteSource;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line exceeds the {capacity} byte read buffer")]
    LineTooLong { capacity: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Line and length oriented reads over a [`ByteSource`].
///
/// One reader lives for the whole connection, so bytes of a pipelined
/// request that arrive with the previous one stay buffered for the next
/// parse.
#[derive(Debug)]
pub struct BufferedReader<S> {
    source: S,
    buffer: ByteBuffer,
}

impl<S: ByteSource> BufferedReader<S> {
    pub fn new(source: S, capacity: usize) -> Self {
        Self {
            source,
            buffer: ByteBuffer::new(capacity),
        }
    }

    /// Reads the next `\n` terminated line, without the terminator.
    ///
    /// With `strip_cr`, a trailing `\r` is dropped as well. Returns `Ok(None)`
    /// when the source ends before a full line arrived; an empty line comes
    /// back as `Ok(Some(vec![]))`.
    pub async fn read_line(&mut self, strip_cr: bool) -> Result<Option<Vec<u8>>, ReadError> {
        let end = loop {
            if let Some(pos) = self.buffer.find(b'\n') {
                break pos;
            }

            if self.buffer.is_full() {
                return Err(ReadError::LineTooLong {
                    capacity: self.buffer.capacity(),
                });
            }

            if self.buffer.read_from(&mut self.source).await? == 0 {
                return Ok(None);
            }
        };

        let mut line = self.buffer.as_slice()[..end].to_vec();
        self.buffer.consume(end + 1);

        if strip_cr && line.last() == Some(&b'\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    /// Reads `n` bytes, draining buffered bytes before pulling more.
    ///
    /// If the source ends first, the bytes obtained so far are returned and
    /// the result is shorter than `n`. Callers must treat that as truncated.
    pub async fn read_exact(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(n);

        while out.len() < n {
            if self.buffer.is_empty() && self.buffer.read_from(&mut self.source).await? == 0 {
                break;
            }

            let take = self.buffer.len().min(n - out.len());
            out.extend_from_slice(&self.buffer.as_slice()[..take]);
            self.buffer.consume(take);
        }

        Ok(out)
    }

    /// Pulls once from the source if nothing is buffered.
    ///
    /// Returns the number of bytes now buffered; `Ok(0)` means the source
    /// ended with nothing pending.
    pub async fn fill(&mut self) -> io::Result<usize> {
        if self.buffer.is_empty() {
            self.buffer.read_from(&mut self.source).await?;
        }
        Ok(self.buffer.len())
    }

    /// Bytes already buffered but not yet consumed.
    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_slice()
    }
}
