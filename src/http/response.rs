use crate::http::error::HttpError;
use crate::http::headers::HeaderMap;
use crate::http::value::HeaderValue;

/// HTTP status codes the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 204 No Content
    NoContent,
    /// 302 Found
    Found,
    /// 307 Temporary Redirect
    TemporaryRedirect,
    /// 308 Permanent Redirect
    PermanentRedirect,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use rawhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::PermanentRedirect.as_u16(), 308);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NoContent => 204,
            StatusCode::Found => 302,
            StatusCode::TemporaryRedirect => 307,
            StatusCode::PermanentRedirect => 308,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NoContent => "No Content",
            StatusCode::Found => "Found",
            StatusCode::TemporaryRedirect => "Temporary Redirect",
            StatusCode::PermanentRedirect => "Permanent Redirect",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            204 => Some(StatusCode::NoContent),
            302 => Some(StatusCode::Found),
            307 => Some(StatusCode::TemporaryRedirect),
            308 => Some(StatusCode::PermanentRedirect),
            400 => Some(StatusCode::BadRequest),
            404 => Some(StatusCode::NotFound),
            500 => Some(StatusCode::InternalServerError),
            _ => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(
            self,
            StatusCode::Found | StatusCode::TemporaryRedirect | StatusCode::PermanentRedirect
        )
    }
}

/// A complete HTTP response ready to be serialized.
///
/// The status text is free-form so that handler errors can carry their own.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderMap,
    pub body: String,
    /// Whether to emit a `Date` header when serialized.
    pub include_date: bool,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use rawhttp::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body("pong")
///     .build();
/// assert_eq!(response.status, 200);
/// ```
pub struct ResponseBuilder {
    status: u16,
    status_text: String,
    headers: HeaderMap,
    body: String,
    include_date: bool,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self::with_status(status.as_u16(), status.reason_phrase())
    }

    /// Starts a response with an arbitrary status line.
    pub fn with_status(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: HeaderMap::new(),
            body: String::new(),
            include_date: true,
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Replaces the whole header set, typically with the server defaults.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn include_date(mut self, include: bool) -> Self {
        self.include_date = include;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            body: self.body,
            include_date: self.include_date,
        }
    }
}

impl Response {
    /// Creates a 200 OK response on top of `headers`.
    pub fn ok(body: impl Into<String>, headers: HeaderMap) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .headers(headers)
            .body(body)
            .build()
    }

    /// Creates a 204 No Content response on top of `headers`.
    pub fn no_content(headers: HeaderMap) -> Self {
        ResponseBuilder::new(StatusCode::NoContent)
            .headers(headers)
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&HeaderValue> {
        self.headers.get(key)
    }
}

/// Redirects to `location` with 302 Found.
pub fn found(headers: HeaderMap, location: &str) -> Response {
    build_redirect(headers, StatusCode::Found, location)
}

/// Redirects to `location` with one of the 302, 307 or 308 statuses.
///
/// Any other status is refused with a 500 error, since it would produce a
/// `Location` header without redirect semantics.
pub fn redirect(headers: HeaderMap, status: StatusCode, location: &str) -> Result<Response, HttpError> {
    if !status.is_redirect() {
        return Err(HttpError::internal(format!(
            "{} is not a redirect status",
            status.as_u16()
        )));
    }

    Ok(build_redirect(headers, status, location))
}

fn build_redirect(mut headers: HeaderMap, status: StatusCode, location: &str) -> Response {
    headers.insert("Location", location);

    ResponseBuilder::new(status)
        .headers(headers)
        .body(format!("{}. Redirecting to {}", status.reason_phrase(), location))
        .build()
}
