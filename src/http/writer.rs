use std::time::SystemTime;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::headers::HeaderMap;
use crate::http::parser::HTTP_VERSION;
use crate::http::response::Response;

/// Serializes a response onto the wire.
///
/// With an empty body no `Content-Length` and no header terminator are
/// written; the caller owns connection semantics in that case.
pub fn build(
    status: u16,
    status_text: &str,
    body: &str,
    headers: &HeaderMap,
    include_date: bool,
) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!("{} {} {}\r\n", HTTP_VERSION, status, status_text);
    buf.extend_from_slice(status_line.as_bytes());

    if include_date {
        let date = httpdate::fmt_http_date(SystemTime::now());
        buf.extend_from_slice(format!("Date: {}\r\n", date).as_bytes());
    }

    // Headers
    for (k, v) in headers.iter() {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_str().as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Body
    if !body.is_empty() {
        buf.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
        buf.extend_from_slice(body.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf
}

pub fn serialize_response(resp: &Response) -> Vec<u8> {
    build(
        resp.status,
        &resp.status_text,
        &resp.body,
        &resp.headers,
        resp.include_date,
    )
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream(
        &mut self,
        stream: &mut TcpStream,
    ) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}
