use rawhttp::http::error::{ParseError, UrlError};
use rawhttp::http::parser::{message_complete, parse_request};

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET /ping HTTP/1.1\r\nHost: x\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method(), "get");
    assert_eq!(parsed.path(), "/ping");
    assert_eq!(parsed.headers().len(), 1);
    assert_eq!(parsed.header("host").unwrap(), "x");
    assert_eq!(parsed.body(), "");
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method(), "post");
    assert_eq!(parsed.path(), "/api");
    assert_eq!(parsed.body(), "hello");
    assert_eq!(parsed.content_length(), Some(5));
}

#[test]
fn test_body_truncated_to_content_length() {
    let req = b"POST /api HTTP/1.1\r\nHost: x\r\nContent-Length: 5\r\n\r\nhello world";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.body(), "hello");
}

#[test]
fn test_multiline_body_rejoined_with_crlf() {
    let req = b"POST /api HTTP/1.1\r\nHost: x\r\nContent-Length: 100\r\n\r\nline one\nline two";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.body(), "line one\r\nline two");
}

#[test]
fn test_body_ignored_without_content_length() {
    let req = b"POST /api HTTP/1.1\r\nHost: x\r\n\r\nhello";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.body(), "");
}

#[test]
fn test_body_ignored_with_unparsable_content_length() {
    let req = b"POST /api HTTP/1.1\r\nHost: x\r\nContent-Length: five\r\n\r\nhello";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.body(), "");
    assert_eq!(parsed.content_length(), None);
}

#[test]
fn test_parse_multiple_headers_lower_cases_names() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept:   */*  \r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.header("host").unwrap(), "example.com");
    assert_eq!(parsed.header("user-agent").unwrap(), "test-client");
    assert_eq!(parsed.header("accept").unwrap(), "*/*");

    let names: Vec<&str> = parsed.headers().iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["host", "user-agent", "accept"]);
}

#[test]
fn test_header_value_keeps_colons() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:8080\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.header("host").unwrap(), "localhost:8080");
}

#[test]
fn test_line_without_colon_ends_headers() {
    let req = b"GET / HTTP/1.1\r\nHost: x\r\nBrokenHeader\r\nX-After: 1\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert!(parsed.header("host").is_some());
    assert!(parsed.header("x-after").is_none());
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search?q=rust&page=2 HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.path(), "/search");
    assert_eq!(parsed.param("q").unwrap(), "rust");
    assert_eq!(parsed.param("page").unwrap().as_number(), Ok(2.0));
}

#[test]
fn test_method_is_lower_cased() {
    let parsed = parse_request(b"DELETE /item HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();

    assert_eq!(parsed.method(), "delete");
}

#[test]
fn test_empty_message() {
    assert_eq!(parse_request(b"").unwrap_err(), ParseError::Empty);
    assert_eq!(parse_request(b"\r\n\r\n").unwrap_err(), ParseError::Empty);
}

#[test]
fn test_malformed_start_lines() {
    let cases: [&[u8]; 4] = [
        b"GET /\r\n\r\n",
        b"GET / HTTP/1.0\r\n\r\n",
        b"GET / HTTP/1.1 extra\r\n\r\n",
        b"hello\r\n\r\n",
    ];

    for req in cases {
        assert_eq!(parse_request(req).unwrap_err(), ParseError::MalformedStartLine);
    }
}

#[test]
fn test_ambiguous_query_is_a_parse_error() {
    let result = parse_request(b"GET /a?b?c HTTP/1.1\r\nHost: x\r\n\r\n");

    assert_eq!(result.unwrap_err(), ParseError::Url(UrlError::UnexpectedQuery));
}

#[test]
fn test_message_complete_framing() {
    assert!(!message_complete(b"GET / HTTP/1.1\r\nHost: x\r\n"));
    assert!(message_complete(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n"));
    assert!(!message_complete(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello"));
    assert!(message_complete(b"POST / HTTP/1.1\r\ncontent-length: 5\r\n\r\nhello"));
    assert!(message_complete(b"POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n"));
}

#[test]
fn test_framing_stops_at_line_without_colon() {
    let req = b"GET /ping HTTP/1.1\r\nHost: x\r\nbogus\r\nContent-Length: 5\r\n\r\n";

    assert!(message_complete(req));
    let parsed = parse_request(req).unwrap();
    assert_eq!(parsed.content_length(), None);
    assert_eq!(parsed.body(), "");
}

#[test]
fn test_framing_uses_last_content_length() {
    let head = b"POST /api HTTP/1.1\r\nContent-Length: 3\r\nContent-Length: 10\r\n\r\n";
    let mut req = head.to_vec();
    req.extend_from_slice(b"abc");
    assert!(!message_complete(&req));

    req.extend_from_slice(b"defghij");
    assert!(message_complete(&req));
    let parsed = parse_request(&req).unwrap();
    assert_eq!(parsed.content_length(), Some(10));
    assert_eq!(parsed.body(), "abcdefghij");
}
