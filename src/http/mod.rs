//! HTTP protocol implementation.
//!
//! This module implements an HTTP/1.1 server with keep-alive connections on top
//! of raw TCP.
//!
//! # Architecture
//!
//! - **`value`**: Header and query-parameter values with lazy coercion
//! - **`headers`**: Case-insensitive, insertion-ordered header map
//! - **`url`**: URL and request-target parsing
//! - **`request`**: HTTP request representation
//! - **`parser`**: Parses and frames incoming requests from byte buffers
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`session`**: Request counter, close signal and deadline timer per connection
//! - **`connection`**: The per-connection request-response state machine
//! - **`error`**: Error types shared by the modules above
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌───────────────────┐
//!        │ AwaitingFirstByte │ ← idle timeout armed
//!        └─────────┬─────────┘
//!                  │ Request received
//!                  ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Host check, keep-alive cap, method gating, dispatch
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               ├─ Close → Closed
//!               ▼
//!        ┌──────────────────┐
//!        │  KeepAliveWait   │ ← arm keep-alive timeout
//!        └──────┬───────────┘
//!               ▼
//!        ┌─────────────────────┐
//!        │ AwaitingNextRequest │ → Processing
//!        └─────────────────────┘
//! ```
//!
//! Every state can reach `Closed`: the deadline timer closes the session, which
//! wakes any pending receive.

pub mod connection;
pub mod error;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod session;
pub mod url;
pub mod value;
pub mod writer;
