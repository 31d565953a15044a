use std::io;

use thiserror::Error;

use crate::http::headers::HeaderMap;
use crate::http::io::ByteSource;
use crate::http::reader::{BufferedReader, ReadError};
use crate::http::request::{Method, Request};

/// Upper bound on a request body when nothing else is configured.
pub const DEFAULT_MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Upper bound on header lines per request when nothing else is configured.
pub const DEFAULT_MAX_HEADERS: usize = 100;

/// Framing and transport failures. Every variant is fatal to the connection.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line exceeds the {capacity} byte read buffer")]
    LineTooLong { capacity: usize },

    #[error("request head is not valid UTF-8")]
    InvalidEncoding,

    #[error("invalid header line: {line:?}")]
    InvalidHeader { line: String },

    #[error("header number exceed the limit {max}")]
    TooManyHeaders { max: usize },

    #[error("stream ended before the end of the headers")]
    IncompleteHeaders,

    #[error("invalid content-length header: {value:?}")]
    InvalidContentLength { value: String },

    #[error("content-length {length} exceeds the limit {max}")]
    BodyTooLarge { length: usize, max: usize },

    #[error("body truncated: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: usize, received: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl From<ReadError> for ParseError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::LineTooLong { capacity } => ParseError::LineTooLong { capacity },
            ReadError::Io { source } => ParseError::Io { source },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParseLimits {
    pub max_body_size: usize,
    pub max_headers: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_headers: DEFAULT_MAX_HEADERS,
        }
    }
}

/// Reads the next request off the connection.
///
/// `Ok(None)` means the client has no more requests: the stream ended before
/// a request line, or the request line was blank.
pub async fn parse_request<S: ByteSource>(
    reader: &mut BufferedReader<S>,
    limits: ParseLimits,
) -> Result<Option<Request>, ParseError> {
    // Request line
    let line = match reader.read_line(true).await? {
        Some(line) if !line.is_empty() => into_text(line)?,
        _ => return Ok(None),
    };

    let mut parts = line.splitn(3, ' ');
    let method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    let version = parts.next().unwrap_or_default();

    // Headers
    let mut headers = HeaderMap::new();
    let mut header_lines = 0;

    loop {
        let line = reader
            .read_line(true)
            .await?
            .ok_or(ParseError::IncompleteHeaders)?;

        if line.is_empty() {
            break;
        }

        header_lines += 1;
        if header_lines > limits.max_headers {
            return Err(ParseError::TooManyHeaders {
                max: limits.max_headers,
            });
        }

        let line = into_text(line)?;
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidHeader { line: line.clone() })?;

        headers.insert(name, value.trim_start());
    }

    // Body
    let body = if headers.contains_key("Transfer-Encoding") {
        Vec::new()
    } else if let Some(value) = headers.get("Content-Length") {
        let length = parse_content_length(value).ok_or_else(|| {
            ParseError::InvalidContentLength {
                value: value.to_string(),
            }
        })?;

        if length > limits.max_body_size {
            return Err(ParseError::BodyTooLarge {
                length,
                max: limits.max_body_size,
            });
        }

        let body = reader.read_exact(length).await?;
        if body.len() < length {
            return Err(ParseError::TruncatedBody {
                expected: length,
                received: body.len(),
            });
        }
        body
    } else {
        Vec::new()
    };

    Ok(Some(Request {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    }))
}

/// `1*DIGIT`, with trailing whitespace allowed. Signs are rejected.
fn parse_content_length(value: &str) -> Option<usize> {
    let digits = value.trim_end_matches([' ', '\t']);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn into_text(line: Vec<u8>) -> Result<String, ParseError> {
    String::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)
}
