use crate::http::error::ParseError;
use crate::http::headers::HeaderMap;
use crate::http::request::Request;
use crate::http::url::Url;

pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Upper bound on a buffered inbound message.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Parses one complete request message.
///
/// The header section ends at the first blank line, or early at the first line
/// without a `:`. A body is only read when `Content-Length` parses as a
/// non-negative integer; it is then cut to that many bytes.
pub fn parse_request(buf: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(buf);

    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut lines = split_lines(&text);

    // Request line
    let start_line = lines.next().ok_or(ParseError::Empty)?;
    let tokens: Vec<&str> = start_line.split_whitespace().collect();

    let [method, target, version] = tokens[..] else {
        return Err(ParseError::MalformedStartLine);
    };
    if version != HTTP_VERSION {
        return Err(ParseError::MalformedStartLine);
    }

    let headers = read_headers(&mut lines);

    // Body
    let body = match declared_length(&headers) {
        Some(limit) => {
            let mut body = lines.collect::<Vec<_>>().join("\r\n");
            truncate_at_boundary(&mut body, limit);
            body
        }
        None => String::new(),
    };

    let (path, params) = Url::parse(target)?.into_parts();

    Request::builder()
        .method(method)
        .path(path)
        .params(params)
        .headers(headers)
        .body(body)
        .build()
        .map_err(|_| ParseError::MalformedStartLine)
}

/// Reports whether `buf` holds a full message: the header terminator plus as
/// many body bytes as `Content-Length` declares.
pub fn message_complete(buf: &[u8]) -> bool {
    let Some(headers_end) = find_headers_end(buf) else {
        return false;
    };

    let head = String::from_utf8_lossy(&buf[..headers_end]);
    let mut lines = split_lines(&head).skip(1);
    let declared = declared_length(&read_headers(&mut lines)).unwrap_or(0);

    buf.len() - (headers_end + 4) >= declared
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Reads header lines up to the first blank line or line without a `:`.
/// Later duplicates replace earlier ones.
fn read_headers<'a>(lines: &mut impl Iterator<Item = &'a str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            break;
        };

        headers.insert(name.trim().to_ascii_lowercase(), value.trim());
    }

    headers
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get("content-length")
        .and_then(|v| v.as_int().ok())
        .and_then(|n| usize::try_from(n).ok())
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

fn truncate_at_boundary(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request(req).unwrap();

        assert_eq!(parsed.path(), "/");
        assert_eq!(parsed.header("host").unwrap(), "example.com");
        assert!(message_complete(req));
    }

    #[test]
    fn waits_for_declared_body() {
        let req = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";

        assert!(!message_complete(req));
        assert!(!message_complete(b"GET / HTTP/1.1\r\nHost: x\r\n"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut text = String::from("héllo");
        truncate_at_boundary(&mut text, 2);
        assert_eq!(text, "h");
    }
}
