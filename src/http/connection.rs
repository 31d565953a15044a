use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::time::timeout;

use crate::config::ServerConfig;
use crate::http::io::{ByteSink, ByteSource};
use crate::http::parser::{ParseLimits, parse_request};
use crate::http::reader::BufferedReader;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routes::Handler;

/// One accepted connection: its reader, its sink and the handler it feeds.
pub struct Session<S, W, H> {
    reader: BufferedReader<S>,
    sink: W,
    handler: Arc<H>,
    limits: ParseLimits,
    read_timeout: Duration,
    write_timeout: Duration,
    state: SessionState,
}

pub enum SessionState {
    AwaitingRequest,
    Parsed(Request),
    Dispatched(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S, W, H> Session<S, W, H>
where
    S: ByteSource,
    W: ByteSink,
    H: Handler,
{
    pub fn new(source: S, sink: W, handler: Arc<H>, cfg: &ServerConfig) -> Self {
        Self {
            reader: BufferedReader::new(source, cfg.buffer_capacity),
            sink,
            handler,
            limits: cfg.parse_limits(),
            read_timeout: cfg.read_timeout(),
            write_timeout: cfg.write_timeout(),
            state: SessionState::AwaitingRequest,
        }
    }

    /// Serves requests until the client is done or the connection breaks.
    ///
    /// Returns the number of completed exchanges on a clean close. A framing
    /// or transport failure closes the connection without a response for the
    /// broken message and comes back as the error.
    pub async fn run(mut self) -> anyhow::Result<usize> {
        let mut exchanges = 0;

        loop {
            match std::mem::replace(&mut self.state, SessionState::Closed) {
                SessionState::AwaitingRequest => {
                    // An idle keep-alive connection that never sends another
                    // byte is closed quietly rather than as an error.
                    match timeout(self.read_timeout, self.reader.fill()).await {
                        Err(_) => {
                            tracing::debug!("Idle connection timed out");
                            continue;
                        }
                        Ok(filled) => {
                            if filled.context("failed to read request")? == 0 {
                                continue;
                            }
                        }
                    }

                    let parse = parse_request(&mut self.reader, self.limits);
                    let parsed = timeout(self.read_timeout, parse)
                        .await
                        .context("timed out waiting for request")?
                        .context("HTTP parse error")?;

                    self.state = match parsed {
                        Some(req) => SessionState::Parsed(req),
                        None => SessionState::Closed,
                    };
                }

                SessionState::Parsed(req) => {
                    let (writer, keep_alive) = dispatch(self.handler.as_ref(), &req).await;
                    self.state = SessionState::Dispatched(writer, keep_alive);
                }

                SessionState::Dispatched(mut writer, keep_alive) => {
                    timeout(self.write_timeout, writer.write_to(&mut self.sink))
                        .await
                        .context("timed out writing response")??;

                    exchanges += 1;

                    if keep_alive {
                        self.state = SessionState::AwaitingRequest; // go back for next request
                    }
                }

                SessionState::Closed => {
                    break;
                }
            }
        }

        Ok(exchanges)
    }
}

async fn dispatch<H: Handler>(handler: &H, req: &Request) -> (ResponseWriter, bool) {
    if req.has_unsupported_framing() {
        let response = Response::not_implemented();
        log_exchange(req, &response);
        return (ResponseWriter::new(&response), false);
    }

    let keep_alive = req.keep_alive();
    let mut response = handler.handle(req).await;

    if !response.headers.contains_key("Connection") {
        let value = if keep_alive { "keep-alive" } else { "close" };
        response.headers.insert("Connection", value);
    }

    log_exchange(req, &response);
    (ResponseWriter::new(&response), keep_alive)
}

fn log_exchange(req: &Request, resp: &Response) {
    tracing::info!(
        status = resp.status.as_u16(),
        method = %req.method,
        path = %req.path,
        version = %req.version,
        "Request served"
    );
}
