//! HTTP protocol implementation.
//!
//! This module implements the connection engine of an HTTP/1.1 server with
//! support for keep-alive and pipelined requests.
//!
//! # Architecture
//!
//! - **`io`**: `ByteSource` / `ByteSink`, the raw pull and push seams
//! - **`buffer`**: fixed-capacity byte buffer with front compaction
//! - **`reader`**: line and exact-length reads on top of the buffer
//! - **`headers`**: case-insensitive, insertion-ordered header map
//! - **`parser`**: reads one `Request` off a `BufferedReader`
//! - **`request`** / **`response`**: message types and builders
//! - **`writer`**: serializes a `Response` and pushes it to a sink
//! - **`connection`**: the per-connection session loop
//!
//! # Session State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Parse the next request
//!        └──────┬───────────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │ ← Run the handler
//!        └──────┬───────────┘
//!               │ Response encoded
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatched     │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → AwaitingRequest (same connection)
//!               └─ Close → Closed
//! ```
//!
//! End-of-stream, a blank request line, or any framing or transport error
//! also leads to `Closed`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use plinth::config::ServerConfig;
//! use plinth::http::connection::Session;
//! use plinth::routes::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new("."));
//!     let cfg = ServerConfig::default();
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let (source, sink) = socket.into_split();
//!         let session = Session::new(source, sink, Arc::clone(&router), &cfg);
//!         tokio::spawn(async move {
//!             if let Err(e) = session.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod buffer;
pub mod connection;
pub mod headers;
pub mod io;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
