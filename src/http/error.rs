//! Error taxonomy for the protocol engine.

use thiserror::Error;

use crate::http::headers::HeaderMap;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// A typed value could not be coerced to the requested representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("not a numeric value: {0:?}")]
    NotNumeric(String),
}

/// Errors raised while parsing a URL or request target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The target carried more than one `?`.
    #[error("unexpected token: ?")]
    UnexpectedQuery,

    #[error("invalid port: {0:?}")]
    InvalidPort(String),
}

/// Errors raised while turning inbound bytes into a [`Request`](crate::http::request::Request).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty message")]
    Empty,

    #[error("malformed start line")]
    MalformedStartLine,

    #[error("message exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error(transparent)]
    Url(#[from] UrlError),
}

/// A protocol-level failure carrying everything needed to answer the client.
///
/// Handlers return this to short-circuit with a specific status; the connection
/// turns it into a response verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status} {status_text}: {body}")]
pub struct HttpError {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpError {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            status_text: status.reason_phrase().to_string(),
            body: body.into(),
        }
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        Self::new(StatusCode::BadRequest, body)
    }

    pub fn not_found(body: impl Into<String>) -> Self {
        Self::new(StatusCode::NotFound, body)
    }

    pub fn internal(body: impl Into<String>) -> Self {
        Self::new(StatusCode::InternalServerError, body)
    }

    /// Builds the response for this error on top of the given header set.
    ///
    /// An empty status text is filled in from the status table when the code
    /// is one the server knows.
    pub fn into_response(self, headers: HeaderMap) -> Response {
        let status_text = if self.status_text.is_empty() {
            StatusCode::from_u16(self.status)
                .map(|code| code.reason_phrase().to_string())
                .unwrap_or_default()
        } else {
            self.status_text
        };

        ResponseBuilder::with_status(self.status, status_text)
            .headers(headers)
            .body(self.body)
            .build()
    }
}

impl From<ParseError> for HttpError {
    fn from(err: ParseError) -> Self {
        HttpError::bad_request(err.to_string())
    }
}
