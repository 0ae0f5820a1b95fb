use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwap;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::http::error::{HttpError, ParseError};
use crate::http::parser::{self, MAX_MESSAGE_SIZE};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::session::{self, Session};
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Settings snapshot shared by every connection, replaceable at runtime.
pub type SharedSettings = Arc<ArcSwap<Settings>>;

pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    buffer: BytesMut,
    state: ConnectionState,
    session: Arc<Session>,
    router: Arc<Router>,
    settings: SharedSettings,
}

pub enum ConnectionState {
    /// Fresh connection, idle timeout armed.
    AwaitingFirstByte,
    Processing(Request),
    Writing(ResponseWriter, Disposition),
    /// Response sent on a connection that stays open; arms the keep-alive timeout.
    KeepAliveWait,
    AwaitingNextRequest,
    Closed,
}

/// What happens to the connection once a response is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    KeepAlive,
    Close,
}

enum Inbound {
    Request(Request),
    Malformed(ParseError),
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        router: Arc<Router>,
        settings: SharedSettings,
    ) -> Self {
        Self {
            stream,
            peer,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::AwaitingFirstByte,
            session: Session::new(),
            router,
            settings,
        }
    }

    /// Serves the connection until it closes.
    ///
    /// Errors are only returned for failures that are not part of a normal
    /// shutdown: a receive failure before any request arrived, or a failed write.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let settings = self.settings.load_full();
        let timer = session::watchdog(self.session.clone(), settings.tick());
        self.session.arm(settings.timeout());

        let result = self.drive().await;

        self.close().await;
        if let Err(e) = timer.await {
            warn!(peer = %self.peer, error = %e, "Deadline timer failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::AwaitingFirstByte | ConnectionState::AwaitingNextRequest => {
                    self.state = match self.read_request().await {
                        Ok(Some(Inbound::Request(request))) => {
                            self.session.record_request();
                            ConnectionState::Processing(request)
                        }
                        Ok(Some(Inbound::Malformed(err))) => {
                            warn!(peer = %self.peer, error = %err, "Malformed request");
                            let response = self.closing_response(HttpError::from(err));
                            ConnectionState::Writing(ResponseWriter::new(&response), Disposition::Close)
                        }
                        Ok(None) => ConnectionState::Closed,
                        Err(e) if self.session.requests() > 0 => {
                            debug!(peer = %self.peer, error = %e, "Receive failed after serving requests");
                            ConnectionState::Closed
                        }
                        Err(e) => return Err(e),
                    };
                }

                ConnectionState::Processing(request) => {
                    let (response, disposition) = self.handle_request(&request);

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, disposition);
                }

                ConnectionState::Writing(mut writer, disposition) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    self.state = match disposition {
                        Disposition::KeepAlive => ConnectionState::KeepAliveWait,
                        Disposition::Close => ConnectionState::Closed,
                    };
                }

                ConnectionState::KeepAliveWait => {
                    self.session.arm(self.settings.load().keep_alive_timeout());
                    self.state = ConnectionState::AwaitingNextRequest;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<Option<Inbound>> {
        loop {
            if parser::message_complete(&self.buffer) {
                // No pipelining: whatever arrived with this message belongs to it.
                let message = self.buffer.split();

                match parser::parse_request(&message) {
                    Ok(request) => return Ok(Some(Inbound::Request(request))),
                    Err(ParseError::Empty) => continue,
                    Err(e) => return Ok(Some(Inbound::Malformed(e))),
                }
            }

            if self.buffer.len() > MAX_MESSAGE_SIZE {
                self.buffer.clear();
                return Ok(Some(Inbound::Malformed(ParseError::TooLarge {
                    limit: MAX_MESSAGE_SIZE,
                })));
            }

            let n = tokio::select! {
                res = self.stream.read_buf(&mut self.buffer) => res.context("receive failed")?,
                _ = self.session.closed() => return Ok(None),
            };

            if n == 0 {
                // Client closed connection
                return Ok(None);
            }
        }
    }

    fn handle_request(&self, request: &Request) -> (Response, Disposition) {
        let settings = self.settings.load();
        let mut headers = settings.default_headers();

        info!(
            peer = %self.peer,
            method = request.method(),
            path = request.path(),
            body = if request.body().is_empty() { "null" } else { request.body() },
            "Request received"
        );

        if !request.has_host() {
            let response = self.closing_response(HttpError::bad_request("Host header is required"));
            return (response, Disposition::Close);
        }

        let served = self.session.requests();
        let disposition = if settings.keep_alive_exhausted(served) {
            debug!(peer = %self.peer, requests = served, "Keep-alive limit reached");
            headers.insert("Connection", "close");
            Disposition::Close
        } else {
            Disposition::KeepAlive
        };

        let outcome = if request.method() == "options" {
            self.router.options(headers.clone(), request, settings.allow_header())
        } else if !settings.allows(request.method()) {
            Err(HttpError::bad_request(format!(
                "Method {} is not allowed",
                request.method().to_ascii_uppercase()
            )))
        } else {
            self.router.dispatch(headers.clone(), request)
        };

        match outcome {
            Ok(response) => {
                debug!(peer = %self.peer, status = response.status, "Request handled");
                (response, disposition)
            }
            Err(err) => {
                warn!(
                    peer = %self.peer,
                    status = err.status,
                    error = %err.body,
                    "Request failed"
                );
                (err.into_response(headers), disposition)
            }
        }
    }

    /// Error response that also tells the client the connection is going away.
    fn closing_response(&self, err: HttpError) -> Response {
        let mut headers = self.settings.load().default_headers();
        headers.insert("Connection", "close");
        err.into_response(headers)
    }

    async fn close(&mut self) {
        self.state = ConnectionState::Closed;
        self.session.close();
        let _ = self.stream.shutdown().await;

        debug!(
            peer = %self.peer,
            requests = self.session.requests(),
            "Connection closed"
        );
    }
}
