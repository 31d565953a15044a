use anyhow::Context;
use bytes::{BufMut, BytesMut};

use crate::http::io::ByteSink;
use crate::http::response::Response;

/// Serializes a response into its HTTP/1.1 wire form.
///
/// Header order is fixed: an injected `Content-Length` (only when the
/// response carries none) comes first, then the response headers in
/// insertion order.
pub fn encode_response(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    if !resp.headers.contains_key("Content-Length") {
        put_header(&mut buf, "Content-Length", &resp.body.len().to_string());
    }

    for (name, value) in resp.headers.iter() {
        put_header(&mut buf, name, value);
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    // Body
    buf.put_slice(&resp.body);

    buf
}

fn put_header(buf: &mut BytesMut, name: &str, value: &str) {
    buf.put_slice(name.as_bytes());
    buf.put_slice(b": ");
    buf.put_slice(value.as_bytes());
    buf.put_slice(b"\r\n");
}

/// An encoded response and how much of it has been sent.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: BytesMut,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: encode_response(response),
            written: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Pushes the remaining bytes until everything is sent.
    pub async fn write_to<W: ByteSink>(&mut self, sink: &mut W) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = sink
                .push(&self.buffer[self.written..])
                .await
                .context("failed to write response")?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}
