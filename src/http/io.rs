//! Raw byte source and sink seams.
//!
//! The reader and the session never touch a socket type directly. They pull
//! from a [`ByteSource`] and push into a [`ByteSink`], so the whole engine can
//! be driven from in-memory buffers in tests. Any tokio `AsyncRead` /
//! `AsyncWrite` type gets both for free.

use std::future::Future;
use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// A connection-scoped pull function.
///
/// `pull` fills at most `buf.len()` bytes and returns how many were written.
/// `Ok(0)` means the peer closed the stream.
pub trait ByteSource: Send {
    fn pull(&mut self, buf: &mut [u8]) -> impl Future<Output = io::Result<usize>> + Send;
}

/// A connection-scoped push function.
///
/// `push` returns the number of bytes actually accepted, which may be fewer
/// than `bytes.len()`. `Ok(0)` means the sink can take nothing more.
pub trait ByteSink: Send {
    fn push(&mut self, bytes: &[u8]) -> impl Future<Output = io::Result<usize>> + Send;
}

impl<T> ByteSource for T
where
    T: AsyncRead + Unpin + Send,
{
    fn pull(&mut self, buf: &mut [u8]) -> impl Future<Output = io::Result<usize>> + Send {
        async move { self.read(buf).await }
    }
}

impl<T> ByteSink for T
where
    T: AsyncWrite + Unpin + Send,
{
    fn push(&mut self, bytes: &[u8]) -> impl Future<Output = io::Result<usize>> + Send {
        async move { self.write(bytes).await }
    }
}
