use crate::http::headers::HeaderMap;
use crate::http::url::Params;
use crate::http::value::{HeaderValue, Param};

/// Represents a parsed HTTP request from a client.
///
/// Requests are immutable once built. The method is always lower-cased, the
/// path excludes the query string, and the query parameters are kept in the
/// order they appeared.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    params: Params,
    headers: HeaderMap,
    body: String,
}

/// Builder for constructing Request objects.
#[derive(Default)]
pub struct RequestBuilder {
    method: Option<String>,
    path: Option<String>,
    params: Params,
    headers: HeaderMap,
    body: String,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into().to_ascii_lowercase());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            params: self.params,
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// The lower-cased request method, e.g. `"get"`.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&Param> {
        self.params.get(key)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&HeaderValue> {
        self.headers.get(key)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Declared Content-Length, if present and a non-negative integer.
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")
            .and_then(|v| v.as_int().ok())
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Whether the request carries a non-empty `Host` header.
    pub fn has_host(&self) -> bool {
        self.header("host").is_some_and(|host| !host.is_empty())
    }
}
