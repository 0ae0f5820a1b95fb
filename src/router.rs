//! Request routing.
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Routes match on the exact `(method, path)` pair. Anything unmatched, including
//! a known path requested with an unregistered verb, is answered with
//! `404 Cannot {METHOD} {path}`.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::http::error::HttpError;
use crate::http::headers::HeaderMap;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::value::HeaderValue;

/// A route handler.
///
/// Receives its own copy of the default response headers, which it may extend.
pub type Handler = Arc<dyn Fn(HeaderMap, &Request) -> Result<Response, HttpError> + Send + Sync>;

#[derive(Default)]
pub struct Router {
    /// path → lower-cased method → handler
    routes: IndexMap<String, HashMap<String, Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` on `path`, replacing any previous one.
    pub fn register<F>(&mut self, method: &str, path: &str, handler: F)
    where
        F: Fn(HeaderMap, &Request) -> Result<Response, HttpError> + Send + Sync + 'static,
    {
        self.routes
            .entry(path.to_string())
            .or_default()
            .insert(method.to_ascii_lowercase(), Arc::new(handler));
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the handler registered for the request's method and path.
    pub fn dispatch(&self, headers: HeaderMap, request: &Request) -> Result<Response, HttpError> {
        let handler = self
            .routes
            .get(request.path())
            .and_then(|methods| methods.get(request.method()))
            .ok_or_else(|| not_found(request))?;

        (**handler)(headers, request)
    }

    /// Answers `OPTIONS` for a registered path with the allowed verbs.
    pub fn options(
        &self,
        mut headers: HeaderMap,
        request: &Request,
        allowed: HeaderValue,
    ) -> Result<Response, HttpError> {
        if !self.has_path(request.path()) {
            return Err(not_found(request));
        }

        headers.insert("Access-Control-Allow-Methods", allowed);
        Ok(Response::no_content(headers))
    }
}

fn not_found(request: &Request) -> HttpError {
    HttpError::not_found(format!(
        "Cannot {} {}",
        request.method().to_ascii_uppercase(),
        request.path()
    ))
}
