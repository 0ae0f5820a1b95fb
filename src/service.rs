//! Built-in demo routes.

use crate::http::error::HttpError;
use crate::http::headers::HeaderMap;
use crate::http::request::Request;
use crate::http::response::{self, Response, StatusCode};
use crate::http::url::{Url, default_port};
use crate::router::Router;

pub fn ping(mut headers: HeaderMap, _request: &Request) -> Result<Response, HttpError> {
    headers.insert("Content-Type", "text/plain; charset=utf-8");
    Ok(Response::ok("Hello, world!", headers))
}

/// Permanently redirects to the same path on the next port of the requested host.
pub fn greeting(headers: HeaderMap, request: &Request) -> Result<Response, HttpError> {
    let host = request
        .header("host")
        .map(|h| h.as_str())
        .unwrap_or_default();
    let url = Url::parse(host).map_err(|e| HttpError::bad_request(format!("Invalid Host header: {e}")))?;

    let port = url
        .port()
        .value
        .or_else(|| default_port("http"))
        .and_then(|port| port.checked_add(1))
        .ok_or_else(|| HttpError::bad_request("Host header has no usable port"))?;

    let location = format!("http://{}:{}{}", url.host(), port, request.path());
    response::redirect(headers, StatusCode::PermanentRedirect, &location)
}

/// Route table served by the binary.
pub fn router() -> Router {
    let mut router = Router::new();
    router.register("GET", "/ping", ping);
    router.register("POST", "/greeting", greeting);
    router
}
